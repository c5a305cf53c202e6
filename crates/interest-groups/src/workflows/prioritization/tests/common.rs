use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::prioritization::domain::{CaseMetric, CaseRecord, PRIORITY_FIELD};
use crate::workflows::prioritization::{
    prioritization_router, BatchFailurePolicy, EvaluationConfig, GroupFormation,
};

pub(super) fn case(id: &str) -> CaseRecord {
    CaseRecord::new().with_field("case_id", id)
}

pub(super) fn scored_case(id: &str, unity: f64, respect: f64) -> CaseRecord {
    case(id)
        .with_metric(CaseMetric::UnityMetric, unity)
        .with_metric(CaseMetric::RespectMetric, respect)
}

/// Case whose evaluation lands on the requested priority with the default thresholds.
pub(super) fn case_with_priority(id: &str, priority: u8) -> CaseRecord {
    match priority {
        0 => case(id),
        1 => scored_case(id, 0.6, 0.6),
        2 => scored_case(id, 0.9, 0.9),
        3 => case(id).with_metric(CaseMetric::LuckCoefficient, 0.99),
        other => panic!("no fixture for priority {other}"),
    }
}

pub(super) fn malformed_case(id: &str) -> CaseRecord {
    case(id).with_field(CaseMetric::UnityMetric.field_name(), "very united")
}

pub(super) fn case_ids(cases: &[CaseRecord]) -> Vec<String> {
    cases
        .iter()
        .map(|case| {
            case.get("case_id")
                .and_then(Value::as_str)
                .expect("fixture has case_id")
                .to_string()
        })
        .collect()
}

pub(super) fn priorities(cases: &[CaseRecord]) -> Vec<u64> {
    cases
        .iter()
        .map(|case| {
            case.get(PRIORITY_FIELD)
                .and_then(Value::as_u64)
                .expect("annotated with priority")
        })
        .collect()
}

pub(super) fn group_formation(policy: BatchFailurePolicy) -> GroupFormation {
    GroupFormation::new(EvaluationConfig::default(), policy)
}

pub(super) fn router_with_policy(policy: BatchFailurePolicy) -> axum::Router {
    prioritization_router(Arc::new(group_formation(policy)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

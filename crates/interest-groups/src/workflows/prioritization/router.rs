use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CaseBatch, CaseRecord, PriorityLevel};
use super::grouping::{GroupFormation, GroupingError, GroupingOutcome, PriorityTier, RejectedCase};

/// Router builder exposing HTTP endpoints for single-case evaluation and batch grouping.
pub fn prioritization_router(groups: Arc<GroupFormation>) -> Router {
    Router::new()
        .route("/api/v1/cases/evaluate", post(evaluate_handler))
        .route("/api/v1/cases/groups", post(groups_handler))
        .with_state(groups)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationView {
    pub priority: PriorityLevel,
    pub reasoning: String,
}

/// Response body for a formed interest group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestGroupView {
    pub cases: Vec<CaseRecord>,
    pub tiers: Vec<PriorityTier>,
    pub rejected: Vec<RejectedCase>,
}

impl From<GroupingOutcome> for InterestGroupView {
    fn from(outcome: GroupingOutcome) -> Self {
        let tiers = outcome.tiers();
        Self {
            cases: outcome.cases,
            tiers,
            rejected: outcome.rejected,
        }
    }
}

pub(crate) async fn evaluate_handler(
    State(groups): State<Arc<GroupFormation>>,
    Json(record): Json<CaseRecord>,
) -> Response {
    match groups.evaluator().evaluate(&record) {
        Ok((priority, reasoning)) => {
            (StatusCode::OK, Json(EvaluationView { priority, reasoning })).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn groups_handler(
    State(groups): State<Arc<GroupFormation>>,
    Json(batch): Json<CaseBatch>,
) -> Response {
    match groups.form(batch.into_cases()) {
        Ok(outcome) => (StatusCode::OK, Json(InterestGroupView::from(outcome))).into_response(),
        Err(GroupingError::Evaluation { index, source }) => {
            let payload = json!({
                "error": format!("case #{index} could not be evaluated: {source}"),
                "index": index,
                "field": source.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

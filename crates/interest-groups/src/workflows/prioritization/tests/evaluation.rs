use super::common::*;
use crate::workflows::prioritization::domain::{CaseMetric, CaseRecord, PriorityLevel};
use crate::workflows::prioritization::{
    evaluate_priority_case, EvaluationConfig, EvaluationError, NonNumericPolicy,
    PriorityEvaluator, PriorityRule,
};

const EXCEPTIONAL: &str = "Exceptional case detected: Bypassing standard criteria";

fn priority(value: u8) -> PriorityLevel {
    PriorityLevel::new(value).expect("valid priority")
}

#[test]
fn empty_case_has_no_priority_and_empty_reasoning() {
    let (level, reasoning) = evaluate_priority_case(&CaseRecord::new()).expect("evaluates");

    assert_eq!(level, PriorityLevel::NONE);
    assert_eq!(reasoning, "");
}

#[test]
fn high_base_scores_earn_priority_two() {
    let record = scored_case("high", 1.0, 1.0)
        .with_metric(CaseMetric::PhaseImpact, 0.0)
        .with_metric(CaseMetric::DirectiveImpact, 0.0);

    let (level, reasoning) = evaluate_priority_case(&record).expect("evaluates");

    assert_eq!(level, priority(2));
    assert_eq!(reasoning, "High unity and respect scores");
}

#[test]
fn impact_stacks_on_top_of_moderate_scores() {
    let record = scored_case("moderate", 0.6, 0.6).with_metric(CaseMetric::PhaseImpact, 0.8);

    let (level, reasoning) = evaluate_priority_case(&record).expect("evaluates");

    assert_eq!(level, priority(2));
    assert_eq!(
        reasoning,
        "Moderate unity and respect scores; Significant potential impact on phases/directives"
    );
}

#[test]
fn impact_alone_raises_an_unscored_case() {
    let record = case("impact-only").with_metric(CaseMetric::DirectiveImpact, 0.71);

    let (level, reasoning) = evaluate_priority_case(&record).expect("evaluates");

    assert_eq!(level, priority(1));
    assert_eq!(reasoning, "Significant potential impact on phases/directives");
}

#[test]
fn high_scores_with_impact_reach_priority_three() {
    let record = scored_case("top", 0.9, 0.8).with_metric(CaseMetric::DirectiveImpact, 0.9);

    let evaluator = PriorityEvaluator::default();
    let assessment = evaluator.assess(&record).expect("evaluates");

    assert_eq!(assessment.priority, priority(3));
    assert_eq!(
        assessment.applied_rules,
        vec![PriorityRule::HighBaseScores, PriorityRule::SignificantImpact]
    );
    assert!(!assessment.is_exceptional());
}

#[test]
fn exceptional_cases_bypass_every_other_rule() {
    let lucky = scored_case("lucky", 1.0, 1.0)
        .with_metric(CaseMetric::LuckCoefficient, 0.96)
        .with_metric(CaseMetric::PhaseImpact, 1.0);
    let ingenious = case("ingenious").with_metric(CaseMetric::IngenuityMetric, 9.5);

    for record in [lucky, ingenious] {
        let assessment = PriorityEvaluator::default()
            .assess(&record)
            .expect("evaluates");
        assert_eq!(assessment.priority, priority(3));
        assert_eq!(assessment.reasoning(), EXCEPTIONAL);
        assert!(assessment.is_exceptional());
        assert_eq!(assessment.base_score, None);
        assert_eq!(assessment.impact_score, None);
    }
}

#[test]
fn exceptional_cases_skip_malformed_later_fields() {
    let record = malformed_case("lucky-but-malformed")
        .with_metric(CaseMetric::LuckCoefficient, 0.99)
        .with_field("phase_impact", "enormous");

    let (level, reasoning) = evaluate_priority_case(&record).expect("short-circuits");

    assert_eq!(level, priority(3));
    assert_eq!(reasoning, EXCEPTIONAL);
}

#[test]
fn base_thresholds_are_inclusive() {
    let (level, reasoning) =
        evaluate_priority_case(&scored_case("high-edge", 0.8, 0.8)).expect("evaluates");
    assert_eq!(level, priority(2));
    assert_eq!(reasoning, "High unity and respect scores");

    let (level, reasoning) =
        evaluate_priority_case(&scored_case("moderate-edge", 0.5, 0.5)).expect("evaluates");
    assert_eq!(level, priority(1));
    assert_eq!(reasoning, "Moderate unity and respect scores");

    let (level, _) =
        evaluate_priority_case(&scored_case("below", 0.49, 0.5)).expect("evaluates");
    assert_eq!(level, PriorityLevel::NONE);
}

#[test]
fn strict_thresholds_exclude_the_boundary() {
    let impact_edge = case("impact-edge").with_metric(CaseMetric::PhaseImpact, 0.7);
    let luck_edge = case("luck-edge").with_metric(CaseMetric::LuckCoefficient, 0.95);
    let ingenuity_edge = case("ingenuity-edge").with_metric(CaseMetric::IngenuityMetric, 9.0);

    for record in [impact_edge, luck_edge, ingenuity_edge] {
        let (level, reasoning) = evaluate_priority_case(&record).expect("evaluates");
        assert_eq!(level, PriorityLevel::NONE, "{record:?}");
        assert_eq!(reasoning, "");
    }
}

#[test]
fn evaluation_is_idempotent_and_ignores_annotations() {
    let record = scored_case("repeat", 0.7, 0.6).with_metric(CaseMetric::DirectiveImpact, 0.9);
    let evaluator = PriorityEvaluator::default();

    let first = evaluator.evaluate(&record).expect("first run");
    let second = evaluator.evaluate(&record).expect("second run");
    assert_eq!(first, second);

    let annotated = record
        .clone()
        .with_field("priority", 0)
        .with_field("reasoning", "stale");
    assert_eq!(evaluator.evaluate(&annotated).expect("annotated run"), first);
}

#[test]
fn reject_policy_reports_the_offending_field() {
    let error = evaluate_priority_case(&malformed_case("bad")).expect_err("type mismatch");

    assert_eq!(
        error,
        EvaluationError::TypeMismatch {
            field: "unity_metric",
            found: "string",
        }
    );
    assert_eq!(error.field(), "unity_metric");
    assert!(error.to_string().contains("unity_metric"));
}

#[test]
fn reject_policy_treats_null_as_malformed() {
    let record = case("null").with_field("luck_coefficient", serde_json::Value::Null);

    let error = evaluate_priority_case(&record).expect_err("null is not numeric");

    assert_eq!(error.field(), "luck_coefficient");
}

#[test]
fn coerce_policy_reads_numeric_text() {
    let config = EvaluationConfig {
        non_numeric: NonNumericPolicy::Coerce,
        ..EvaluationConfig::default()
    };
    let evaluator = PriorityEvaluator::new(config);
    let record = case("text")
        .with_field("unity_metric", "0.9")
        .with_field("respect_metric", "0.9")
        .with_field("phase_impact", serde_json::Value::Null);

    let (level, reasoning) = evaluator.evaluate(&record).expect("coerces");

    assert_eq!(level, priority(2));
    assert_eq!(reasoning, "High unity and respect scores");
}

#[test]
fn custom_thresholds_change_the_tiers() {
    let config = EvaluationConfig {
        high_base_threshold: 0.95,
        impact_threshold: 0.5,
        ..EvaluationConfig::default()
    };
    let evaluator = PriorityEvaluator::new(config);
    let record = scored_case("custom", 0.9, 0.9).with_metric(CaseMetric::PhaseImpact, 0.6);

    let assessment = evaluator.assess(&record).expect("evaluates");

    assert_eq!(assessment.priority, priority(2));
    assert_eq!(
        assessment.applied_rules,
        vec![
            PriorityRule::ModerateBaseScores,
            PriorityRule::SignificantImpact
        ]
    );
    assert_eq!(assessment.base_score, Some(0.9));
    assert_eq!(assessment.impact_score, Some(0.6));
}

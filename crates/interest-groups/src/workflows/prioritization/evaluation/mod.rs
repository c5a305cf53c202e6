mod config;
mod rules;

pub use config::{EvaluationConfig, NonNumericPolicy};

use super::domain::{CaseRecord, PriorityLevel};
use serde::{Deserialize, Serialize};

/// Stateless evaluator that applies the rule thresholds to a case record.
#[derive(Debug, Clone, Default)]
pub struct PriorityEvaluator {
    config: EvaluationConfig,
}

impl PriorityEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Full assessment, including the rules that fired and the intermediate scores.
    pub fn assess(&self, record: &CaseRecord) -> Result<PriorityAssessment, EvaluationError> {
        rules::assess_case(record, &self.config)
    }

    pub fn evaluate(&self, record: &CaseRecord) -> Result<(PriorityLevel, String), EvaluationError> {
        let assessment = self.assess(record)?;
        let reasoning = assessment.reasoning();
        Ok((assessment.priority, reasoning))
    }
}

/// Evaluates a single case with the default thresholds.
pub fn evaluate_priority_case(
    record: &CaseRecord,
) -> Result<(PriorityLevel, String), EvaluationError> {
    PriorityEvaluator::default().evaluate(record)
}

/// Rule that contributed to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityRule {
    ExceptionalCase,
    HighBaseScores,
    ModerateBaseScores,
    SignificantImpact,
}

impl PriorityRule {
    pub fn explanation(self) -> &'static str {
        match self {
            PriorityRule::ExceptionalCase => {
                "Exceptional case detected: Bypassing standard criteria"
            }
            PriorityRule::HighBaseScores => "High unity and respect scores",
            PriorityRule::ModerateBaseScores => "Moderate unity and respect scores",
            PriorityRule::SignificantImpact => "Significant potential impact on phases/directives",
        }
    }
}

/// Evaluation output with the decision trail, in the order the rules fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAssessment {
    pub priority: PriorityLevel,
    pub applied_rules: Vec<PriorityRule>,
    /// Average of unity and respect. `None` when the exceptional check short-circuited.
    pub base_score: Option<f64>,
    /// Larger of phase and directive impact. `None` when the exceptional check short-circuited.
    pub impact_score: Option<f64>,
}

impl PriorityAssessment {
    pub fn reasoning(&self) -> String {
        self.applied_rules
            .iter()
            .map(|rule| rule.explanation())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn is_exceptional(&self) -> bool {
        self.applied_rules.contains(&PriorityRule::ExceptionalCase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationError {
    #[error("field `{field}` must be numeric, found {found}")]
    TypeMismatch {
        field: &'static str,
        found: &'static str,
    },
}

impl EvaluationError {
    pub fn field(&self) -> &'static str {
        match self {
            EvaluationError::TypeMismatch { field, .. } => field,
        }
    }
}

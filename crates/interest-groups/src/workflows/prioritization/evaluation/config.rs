use serde::{Deserialize, Serialize};

/// How the evaluator treats a metric field that is present but not a JSON number.
///
/// Booleans are read as 1/0 under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonNumericPolicy {
    /// Fail the evaluation with a type mismatch.
    #[default]
    Reject,
    /// Read `null` as 0 and numeric strings as their value.
    Coerce,
}

impl NonNumericPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" | "strict" => Some(Self::Reject),
            "coerce" | "lenient" => Some(Self::Coerce),
            _ => None,
        }
    }
}

/// Thresholds driving the priority rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Luck strictly above this marks an exceptional case.
    pub luck_threshold: f64,
    /// Ingenuity strictly above this marks an exceptional case.
    pub ingenuity_threshold: f64,
    /// Base score at or above this earns the high tier.
    pub high_base_threshold: f64,
    /// Base score at or above this earns the moderate tier.
    pub moderate_base_threshold: f64,
    /// Impact strictly above this raises the priority by one.
    pub impact_threshold: f64,
    #[serde(default)]
    pub non_numeric: NonNumericPolicy,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            luck_threshold: 0.95,
            ingenuity_threshold: 9.0,
            high_base_threshold: 0.8,
            moderate_base_threshold: 0.5,
            impact_threshold: 0.7,
            non_numeric: NonNumericPolicy::Reject,
        }
    }
}

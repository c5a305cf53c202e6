use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::evaluation::PriorityAssessment;

/// Field written with the assigned priority level once a case is annotated.
pub const PRIORITY_FIELD: &str = "priority";
/// Field written with the `; `-joined rule explanations once a case is annotated.
pub const REASONING_FIELD: &str = "reasoning";

/// Numeric fields inspected by the priority rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMetric {
    UnityMetric,
    RespectMetric,
    LuckCoefficient,
    IngenuityMetric,
    PhaseImpact,
    DirectiveImpact,
}

impl CaseMetric {
    pub const ALL: [CaseMetric; 6] = [
        CaseMetric::UnityMetric,
        CaseMetric::RespectMetric,
        CaseMetric::LuckCoefficient,
        CaseMetric::IngenuityMetric,
        CaseMetric::PhaseImpact,
        CaseMetric::DirectiveImpact,
    ];

    pub fn from_field_name(field: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.field_name() == field)
    }

    pub fn field_name(self) -> &'static str {
        match self {
            CaseMetric::UnityMetric => "unity_metric",
            CaseMetric::RespectMetric => "respect_metric",
            CaseMetric::LuckCoefficient => "luck_coefficient",
            CaseMetric::IngenuityMetric => "ingenuity_metric",
            CaseMetric::PhaseImpact => "phase_impact",
            CaseMetric::DirectiveImpact => "directive_impact",
        }
    }
}

impl fmt::Display for CaseMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Priority tier assigned to a case. Always within `0..=4`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct PriorityLevel(u8);

impl PriorityLevel {
    pub const NONE: Self = Self(0);
    pub const MAX: Self = Self(4);

    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    pub(crate) const fn saturating(value: u8) -> Self {
        if value > Self::MAX.0 {
            Self::MAX
        } else {
            Self(value)
        }
    }

    pub(crate) fn raised(self) -> Self {
        Self::saturating(self.0 + 1)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PriorityLevel> for u8 {
    fn from(value: PriorityLevel) -> Self {
        value.0
    }
}

impl TryFrom<u8> for PriorityLevel {
    type Error = PriorityOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PriorityOutOfRange(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("priority level {0} is outside the supported range 0-4")]
pub struct PriorityOutOfRange(pub u8);

/// Free-form case record keyed by field name.
///
/// Fields the rules do not inspect (identifiers, notes) are carried through untouched so the
/// annotated record keeps the caller's shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord {
    fields: Map<String, Value>,
}

impl CaseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn with_metric(mut self, metric: CaseMetric, value: f64) -> Self {
        self.insert(metric.field_name(), value);
        self
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Priority written by the last annotation, if any.
    pub fn priority(&self) -> Option<PriorityLevel> {
        self.fields
            .get(PRIORITY_FIELD)
            .and_then(Value::as_u64)
            .and_then(|value| u8::try_from(value).ok())
            .and_then(PriorityLevel::new)
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.fields.get(REASONING_FIELD).and_then(Value::as_str)
    }

    pub(crate) fn annotate(&mut self, assessment: &PriorityAssessment) {
        self.insert(PRIORITY_FIELD, assessment.priority.value());
        self.insert(REASONING_FIELD, assessment.reasoning());
    }
}

impl From<Map<String, Value>> for CaseRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_fields(fields)
    }
}

/// Batch payload accepted by importers and HTTP handlers: either a bare array of records or an
/// object wrapping them under `cases`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CaseBatch {
    Bare(Vec<CaseRecord>),
    Wrapped { cases: Vec<CaseRecord> },
}

impl CaseBatch {
    pub fn into_cases(self) -> Vec<CaseRecord> {
        match self {
            CaseBatch::Bare(cases) | CaseBatch::Wrapped { cases } => cases,
        }
    }
}

/// JSON type name used when reporting a non-numeric metric.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

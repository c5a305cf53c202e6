//! Case prioritization: a fixed rule table assigns each case a priority tier with an audit
//! trail, and group formation ranks a batch of cases by that tier.
//!
//! Evaluation order matters. The exceptional-case check runs first and short-circuits every
//! other rule; otherwise the base tier is picked from the unity/respect average and a
//! significant impact adds one level on top.

pub mod domain;
pub(crate) mod evaluation;
pub mod grouping;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    CaseBatch, CaseMetric, CaseRecord, PriorityLevel, PriorityOutOfRange, PRIORITY_FIELD,
    REASONING_FIELD,
};
pub use evaluation::{
    evaluate_priority_case, EvaluationConfig, EvaluationError, NonNumericPolicy,
    PriorityAssessment, PriorityEvaluator, PriorityRule,
};
pub use grouping::{
    form_interest_group, BatchFailurePolicy, GroupFormation, GroupingError, GroupingOutcome,
    PriorityTier, RejectedCase,
};
pub use router::{prioritization_router, EvaluationView, InterestGroupView};

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{CaseRecord, PriorityLevel};
use super::evaluation::{EvaluationConfig, EvaluationError, PriorityEvaluator};

/// What to do with a batch when one of its cases fails evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchFailurePolicy {
    /// Stop at the first failing case and return its error.
    #[default]
    Abort,
    /// Set failing cases aside in [`GroupingOutcome::rejected`] and rank the rest.
    Isolate,
}

impl BatchFailurePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "abort" | "fail" => Some(Self::Abort),
            "isolate" | "skip" => Some(Self::Isolate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GroupingError {
    #[error("case #{index} could not be evaluated: {source}")]
    Evaluation {
        index: usize,
        #[source]
        source: EvaluationError,
    },
}

/// Case that failed evaluation under [`BatchFailurePolicy::Isolate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedCase {
    /// Position of the case in the submitted batch.
    pub index: usize,
    pub record: CaseRecord,
    pub error: EvaluationError,
}

/// Number of ranked cases sharing one priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityTier {
    pub priority: PriorityLevel,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupingOutcome {
    /// Annotated cases, highest priority first, input order kept within a priority.
    pub cases: Vec<CaseRecord>,
    pub rejected: Vec<RejectedCase>,
}

impl GroupingOutcome {
    pub fn priorities(&self) -> Vec<PriorityLevel> {
        self.cases
            .iter()
            .map(|case| case.priority().unwrap_or_default())
            .collect()
    }

    /// Tier sizes in ranked order; priorities with no cases are omitted.
    pub fn tiers(&self) -> Vec<PriorityTier> {
        let mut tiers: Vec<PriorityTier> = Vec::new();
        for priority in self.priorities() {
            match tiers.last_mut() {
                Some(tier) if tier.priority == priority => tier.count += 1,
                _ => tiers.push(PriorityTier { priority, count: 1 }),
            }
        }
        tiers
    }

    pub fn tier(&self, priority: PriorityLevel) -> impl Iterator<Item = &CaseRecord> + '_ {
        self.cases
            .iter()
            .filter(move |case| case.priority() == Some(priority))
    }
}

/// Evaluates a batch of cases and ranks them by priority.
#[derive(Debug, Clone, Default)]
pub struct GroupFormation {
    evaluator: PriorityEvaluator,
    failure_policy: BatchFailurePolicy,
}

impl GroupFormation {
    pub fn new(config: EvaluationConfig, failure_policy: BatchFailurePolicy) -> Self {
        Self::with_evaluator(PriorityEvaluator::new(config), failure_policy)
    }

    pub fn with_evaluator(evaluator: PriorityEvaluator, failure_policy: BatchFailurePolicy) -> Self {
        Self {
            evaluator,
            failure_policy,
        }
    }

    pub fn evaluator(&self) -> &PriorityEvaluator {
        &self.evaluator
    }

    pub fn failure_policy(&self) -> BatchFailurePolicy {
        self.failure_policy
    }

    /// Annotate every case with `priority` and `reasoning`, then sort by priority descending.
    ///
    /// The sort is stable, so cases sharing a priority keep their submitted order. Each case
    /// appears exactly once, either in `cases` or (when isolating failures) in `rejected`.
    pub fn form(&self, cases: Vec<CaseRecord>) -> Result<GroupingOutcome, GroupingError> {
        let submitted = cases.len();
        let mut ranked = Vec::with_capacity(submitted);
        let mut rejected = Vec::new();

        for (index, mut record) in cases.into_iter().enumerate() {
            match self.evaluator.assess(&record) {
                Ok(assessment) => {
                    record.annotate(&assessment);
                    ranked.push((assessment.priority, record));
                }
                Err(source) => match self.failure_policy {
                    BatchFailurePolicy::Abort => {
                        return Err(GroupingError::Evaluation { index, source });
                    }
                    BatchFailurePolicy::Isolate => {
                        warn!(index, error = %source, "case set aside after failed evaluation");
                        rejected.push(RejectedCase {
                            index,
                            record,
                            error: source,
                        });
                    }
                },
            }
        }

        ranked.sort_by_key(|(priority, _)| Reverse(*priority));

        debug!(
            submitted,
            ranked = ranked.len(),
            rejected = rejected.len(),
            "interest group formed"
        );

        Ok(GroupingOutcome {
            cases: ranked.into_iter().map(|(_, record)| record).collect(),
            rejected,
        })
    }
}

/// Ranks cases with the default thresholds, aborting on the first malformed case.
pub fn form_interest_group(cases: Vec<CaseRecord>) -> Result<Vec<CaseRecord>, GroupingError> {
    GroupFormation::default()
        .form(cases)
        .map(|outcome| outcome.cases)
}

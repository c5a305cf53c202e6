use super::super::domain::{value_kind, CaseMetric, CaseRecord, PriorityLevel};
use super::config::{EvaluationConfig, NonNumericPolicy};
use super::{EvaluationError, PriorityAssessment, PriorityRule};
use serde_json::Value;

pub(crate) fn assess_case(
    record: &CaseRecord,
    config: &EvaluationConfig,
) -> Result<PriorityAssessment, EvaluationError> {
    let metrics = MetricReader {
        record,
        policy: config.non_numeric,
    };

    if is_exceptional_case(&metrics, config)? {
        return Ok(PriorityAssessment {
            priority: PriorityLevel::saturating(3),
            applied_rules: vec![PriorityRule::ExceptionalCase],
            base_score: None,
            impact_score: None,
        });
    }

    let mut priority = PriorityLevel::NONE;
    let mut applied_rules = Vec::new();

    let base_score = base_score(&metrics)?;
    if base_score >= config.high_base_threshold {
        priority = PriorityLevel::saturating(2);
        applied_rules.push(PriorityRule::HighBaseScores);
    } else if base_score >= config.moderate_base_threshold {
        priority = PriorityLevel::saturating(1);
        applied_rules.push(PriorityRule::ModerateBaseScores);
    }

    let impact_score = impact_score(&metrics)?;
    if impact_score > config.impact_threshold {
        priority = priority.raised();
        applied_rules.push(PriorityRule::SignificantImpact);
    }

    Ok(PriorityAssessment {
        priority,
        applied_rules,
        base_score: Some(base_score),
        impact_score: Some(impact_score),
    })
}

// Luck is compared before ingenuity is read, so a malformed ingenuity value is never reported
// for a case that is already exceptional through luck.
fn is_exceptional_case(
    metrics: &MetricReader<'_>,
    config: &EvaluationConfig,
) -> Result<bool, EvaluationError> {
    if metrics.read(CaseMetric::LuckCoefficient)? > config.luck_threshold {
        return Ok(true);
    }

    Ok(metrics.read(CaseMetric::IngenuityMetric)? > config.ingenuity_threshold)
}

fn base_score(metrics: &MetricReader<'_>) -> Result<f64, EvaluationError> {
    let unity = metrics.read(CaseMetric::UnityMetric)?;
    let respect = metrics.read(CaseMetric::RespectMetric)?;
    Ok((unity + respect) / 2.0)
}

fn impact_score(metrics: &MetricReader<'_>) -> Result<f64, EvaluationError> {
    let phase = metrics.read(CaseMetric::PhaseImpact)?;
    let directive = metrics.read(CaseMetric::DirectiveImpact)?;

    // Keeps the first operand unless the second is strictly larger; a NaN phase impact is not
    // replaced by the directive impact.
    Ok(if directive > phase { directive } else { phase })
}

struct MetricReader<'a> {
    record: &'a CaseRecord,
    policy: NonNumericPolicy,
}

impl MetricReader<'_> {
    fn read(&self, metric: CaseMetric) -> Result<f64, EvaluationError> {
        let Some(value) = self.record.get(metric.field_name()) else {
            return Ok(0.0);
        };

        let coerced = match (value, self.policy) {
            (Value::Number(number), _) => number.as_f64(),
            (Value::Null, NonNumericPolicy::Coerce) => Some(0.0),
            // Flags count as 1/0 under every policy.
            (Value::Bool(flag), _) => Some(if *flag { 1.0 } else { 0.0 }),
            (Value::String(raw), NonNumericPolicy::Coerce) => raw.trim().parse::<f64>().ok(),
            _ => None,
        };

        coerced.ok_or_else(|| EvaluationError::TypeMismatch {
            field: metric.field_name(),
            found: value_kind(value),
        })
    }
}

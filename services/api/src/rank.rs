use clap::Args;
use interest_groups::config::AppConfig;
use interest_groups::error::AppError;
use interest_groups::workflows::import::CaseImporter;
use interest_groups::workflows::prioritization::{
    BatchFailurePolicy, CaseRecord, GroupFormation, GroupingOutcome, InterestGroupView,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// CSV or JSON case export to rank
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Set malformed cases aside instead of aborting the whole batch
    #[arg(long)]
    pub(crate) isolate: bool,
    /// Print the grouped payload as JSON instead of a tiered listing
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        input,
        isolate,
        json,
    } = args;

    let config = AppConfig::load()?;
    let failure_policy = if isolate {
        BatchFailurePolicy::Isolate
    } else {
        config.prioritization.batch_failure
    };
    let groups = GroupFormation::new(config.prioritization.evaluation_config(), failure_policy);

    let cases = CaseImporter::from_path(&input)?;
    let outcome = groups.form(cases)?;

    if json {
        println!("{}", grouped_payload(outcome)?);
    } else {
        render_grouping(&outcome, &input);
    }

    Ok(())
}

fn grouped_payload(outcome: GroupingOutcome) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&InterestGroupView::from(outcome))?)
}

fn render_grouping(outcome: &GroupingOutcome, input: &std::path::Path) {
    println!("Interest group ranking");
    println!(
        "Source: {} ({} ranked, {} set aside)",
        input.display(),
        outcome.cases.len(),
        outcome.rejected.len()
    );

    if outcome.cases.is_empty() {
        println!("\nNo cases ranked");
    }

    let mut rank = 0;
    for tier in outcome.tiers() {
        println!("\nPriority {} ({} case(s))", tier.priority, tier.count);
        for case in outcome.tier(tier.priority) {
            rank += 1;
            let label = case_label(case, || format!("rank #{rank}"));
            let reasoning = case.reasoning().unwrap_or_default();
            if reasoning.is_empty() {
                println!("- {label}");
            } else {
                println!("- {label}: {reasoning}");
            }
        }
    }

    if !outcome.rejected.is_empty() {
        println!("\nSet aside");
        for rejected in &outcome.rejected {
            println!(
                "- {}: {}",
                case_label(&rejected.record, || format!("input #{}", rejected.index + 1)),
                rejected.error
            );
        }
    }
}

/// Prefers a caller-supplied identifier. Ranked cases fall back to their rank, set-aside cases to
/// their 1-based input position.
fn case_label(case: &CaseRecord, fallback: impl FnOnce() -> String) -> String {
    ["case_id", "id", "name"]
        .iter()
        .find_map(|field| match case.get(field) {
            Some(Value::String(value)) if !value.trim().is_empty() => Some(value.clone()),
            Some(Value::Number(value)) => Some(value.to_string()),
            _ => None,
        })
        .unwrap_or_else(fallback)
}

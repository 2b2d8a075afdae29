use crate::infra::{build_engine, parse_corridor_type, parse_date, parse_instant};
use block_rules::clock::FixedClock;
use block_rules::config::AppConfig;
use block_rules::error::AppError;
use block_rules::rules::{
    BlockRulesEngine, CorridorType, DateAssessment, LocationCheck, LocationContext, PairCheck,
    ReferenceTables,
};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Requested block date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: NaiveDate,
    /// Evaluate as of this instant (RFC 3339); defaults to the configured clock
    #[arg(long, value_parser = parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Corridor type currently chosen on the form
    #[arg(long, value_parser = parse_corridor_type)]
    pub(crate) current: Option<CorridorType>,
}

#[derive(Args, Debug)]
pub(crate) struct LocationArgs {
    /// Site location text as typed
    #[arg(long)]
    pub(crate) code: String,
    /// Field value before the edit
    #[arg(long, default_value = "")]
    pub(crate) previous: String,
    #[arg(long)]
    pub(crate) major_section: String,
    /// Block section; repeat for multiple sections
    #[arg(long = "block-section")]
    pub(crate) block_sections: Vec<String>,
    #[arg(long)]
    pub(crate) department: String,
    /// Optional "to" location checked for ordering against --code
    #[arg(long)]
    pub(crate) to_code: Option<String>,
}

pub(crate) fn run_eligibility_report(args: EligibilityArgs) -> Result<(), AppError> {
    let EligibilityArgs { date, now, current } = args;

    let engine = match now {
        Some(instant) => BlockRulesEngine::new(
            Arc::new(FixedClock::at(instant)),
            Arc::new(ReferenceTables::empty()),
        ),
        None => build_engine(&AppConfig::load()?)?,
    };

    let assessment = engine.assess(current, Some(date));
    for line in eligibility_lines(date, &assessment) {
        println!("{line}");
    }

    Ok(())
}

pub(crate) fn run_location_report(args: LocationArgs) -> Result<(), AppError> {
    let LocationArgs {
        code,
        previous,
        major_section,
        block_sections,
        department,
        to_code,
    } = args;

    let config = AppConfig::load()?;
    let engine = build_engine(&config)?;
    let context = LocationContext::new(&major_section, block_sections.as_slice(), &department);

    let check = engine.location(&code, &previous, &context);
    let pair = to_code
        .as_deref()
        .map(|to| engine.pair(&check.input.formatted_value, to));
    let depots = engine.depots(&context);

    for line in location_lines(&check, pair.as_ref(), &depots) {
        println!("{line}");
    }

    Ok(())
}

fn eligibility_lines(date: NaiveDate, assessment: &DateAssessment) -> Vec<String> {
    let requested = match assessment.window {
        Some(window) => format!("Requested date: {date} ({})", window.label()),
        None => format!("Requested date: {date}"),
    };
    let mut lines = vec![
        "Block eligibility".to_string(),
        requested,
        format!(
            "Evaluated at: {}",
            assessment.evaluated_at.format("%Y-%m-%d %H:%M UTC")
        ),
    ];

    let selection = &assessment.selection;
    let options = selection
        .options
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(", ");
    lines.push(format!("Permitted corridor types: {options}"));

    match selection.selection {
        Some(kind) if selection.locked => lines.push(format!("Selection: {} (locked)", kind.label())),
        Some(kind) => lines.push(format!("Selection: {}", kind.label())),
        None => lines.push("Selection: none".to_string()),
    }

    if let Some(reason) = &selection.verdict.disallowed_reason {
        lines.push(format!("Note: {reason}"));
    }

    lines
}

fn location_lines(check: &LocationCheck, pair: Option<&PairCheck>, depots: &[String]) -> Vec<String> {
    let mut lines = vec![
        "Site location".to_string(),
        format!("Formatted: {}", check.input.formatted_value),
    ];

    match &check.input.error {
        Some(error) => lines.push(format!("Status: invalid ({error})")),
        None => lines.push("Status: valid".to_string()),
    }
    lines.push(format!("Range: {}", check.range.display_text));

    if let Some(pair) = pair {
        match &pair.error {
            Some(error) => lines.push(format!("From/to order: invalid ({error})")),
            None => lines.push("From/to order: valid".to_string()),
        }
    }

    if depots.is_empty() {
        lines.push("Depots: none".to_string());
    } else {
        lines.push(format!("Depots: {}", depots.join(", ")));
    }

    lines
}

//! Rendering of assessments for the terminal or as JSON.

use aid_core::calculations::common::round_half_up;
use aid_core::{Assessment, MemberWeight};
use rust_decimal::Decimal;
use serde::Serialize;

const ELIGIBLE_MESSAGE: &str =
    "Your household is eligible for financial assistance for energy based on this income.";
const NOT_ELIGIBLE_MESSAGE: &str =
    "Your household is not eligible for financial assistance for energy at this income level.";

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One assessed household together with the ages it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseholdReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household: Option<String>,
    pub ages: Vec<Decimal>,
    #[serde(flatten)]
    pub assessment: Assessment,
}

/// Outcome of one row of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Assessed(HouseholdReport),
    Rejected { household: String, errors: Vec<String> },
}

/// Formats a currency amount with two decimals, rounding half-up.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}

fn status_label(eligible: bool) -> &'static str {
    if eligible { "Eligible" } else { "Not eligible" }
}

fn weight_line(
    position: usize,
    age: Decimal,
    weight: MemberWeight,
) -> String {
    format!(
        "  {position}. age {age}: weight {:.1} ({})",
        weight.value(),
        weight.description()
    )
}

/// Renders a single household for the terminal.
pub fn render_text(report: &HouseholdReport) -> String {
    let result = &report.assessment.result;
    let mut lines = Vec::new();

    if let Some(household) = &report.household {
        lines.push(format!("Household:                 {household}"));
    }
    lines.push(format!(
        "Household size:            {:.2}",
        round_half_up(result.household_size)
    ));
    lines.push(format!(
        "Max income per person:     {}",
        format_money(result.max_income_per_person)
    ));
    lines.push(format!(
        "Average income per person: {}",
        format_money(result.average_income_per_person)
    ));
    lines.push(format!("Status:                    {}", status_label(result.eligible)));
    lines.push(
        if result.eligible {
            ELIGIBLE_MESSAGE
        } else {
            NOT_ELIGIBLE_MESSAGE
        }
        .to_string(),
    );

    lines.push(String::new());
    lines.push("Members:".to_string());
    lines.extend(
        report
            .ages
            .iter()
            .zip(&report.assessment.member_weights)
            .enumerate()
            .map(|(index, (age, weight))| weight_line(index + 1, *age, *weight)),
    );

    lines.join("\n")
}

/// Renders a batch run as one summary line per household.
pub fn render_batch_text(entries: &[BatchEntry]) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            BatchEntry::Assessed(report) => {
                let result = &report.assessment.result;
                format!(
                    "{}: size {:.2}, average {} of max {}, {}",
                    report.household.as_deref().unwrap_or("-"),
                    round_half_up(result.household_size),
                    format_money(result.average_income_per_person),
                    format_money(result.max_income_per_person),
                    status_label(result.eligible),
                )
            }
            BatchEntry::Rejected { household, errors } => {
                format!("{household}: invalid input: {}", errors.join("; "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders any serializable report as pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

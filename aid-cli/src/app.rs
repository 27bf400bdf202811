//! Command implementations shared by the binary and the integration tests.

use std::path::Path;

use aid_core::assess;
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::csv_loader::{self, HouseholdRecord};
use crate::input::{self, RawHousehold};
use crate::report::{self, BatchEntry, HouseholdReport, OutputFormat};

/// Validates and assesses a single household and renders the report.
///
/// # Errors
///
/// Fails with the collected validation errors if the input is invalid, or
/// with the assessment error if no verdict can be produced.
pub fn check_household(
    raw: &RawHousehold,
    format: OutputFormat,
) -> Result<String> {
    debug!(weights = ?input::preview_weights(&raw.ages), "member weight preview");

    let snapshot = raw.validate().context("invalid household input")?;
    let assessment = assess(&snapshot).context("cannot evaluate household")?;

    let report = HouseholdReport {
        household: None,
        ages: snapshot.ages,
        assessment,
    };

    match format {
        OutputFormat::Text => Ok(report::render_text(&report)),
        OutputFormat::Json => report::render_json(&report).context("cannot serialize report"),
    }
}

/// Assesses every record, turning failures into rejected entries.
pub fn assess_records(records: Vec<HouseholdRecord>) -> Vec<BatchEntry> {
    records
        .into_iter()
        .map(|record| {
            let assessed = record
                .raw
                .validate()
                .map_err(|errors| errors.0.iter().map(ToString::to_string).collect::<Vec<_>>())
                .and_then(|snapshot| {
                    assess(&snapshot)
                        .map(|assessment| (snapshot.ages, assessment))
                        .map_err(|error| vec![error.to_string()])
                });

            match assessed {
                Ok((ages, assessment)) => BatchEntry::Assessed(HouseholdReport {
                    household: Some(record.household),
                    ages,
                    assessment,
                }),
                Err(errors) => {
                    warn!(household = %record.household, ?errors, "household rejected");
                    BatchEntry::Rejected {
                        household: record.household,
                        errors,
                    }
                }
            }
        })
        .collect()
}

/// Loads a batch CSV file, assesses every household and renders the result.
pub fn check_batch_file(
    path: &Path,
    format: OutputFormat,
) -> Result<String> {
    let records = csv_loader::load_from_file(path)
        .with_context(|| format!("failed to load households from {}", path.display()))?;
    info!(households = records.len(), path = %path.display(), "loaded batch file");

    let entries = assess_records(records);

    match format {
        OutputFormat::Text => Ok(report::render_batch_text(&entries)),
        OutputFormat::Json => report::render_json(&entries).context("cannot serialize report"),
    }
}

//! CSV loader for batch household checks.
//!
//! ## CSV Format
//!
//! Columns are matched by header name; order does not matter. Every column
//! except `household` and `ages` may be omitted or left empty.
//!
//! | Column            | Required | Notes |
//! |-------------------|----------|-------|
//! | `household`       | yes      | Label used in the report |
//! | `ages`            | yes      | Member ages separated by `;` or spaces, in entry order |
//! | `employment`      | no       | Empty means 0 |
//! | `business`        | no       | Empty means 0 |
//! | `pension`         | no       | Empty means 0 |
//! | `service`         | no       | Empty means 0 |
//! | `tax_months`      | no       | Empty means 12 |
//! | `decision_months` | no       | Empty means 12 |
//! | `total_income`    | no       | If set, the household reports a single annual total and the component columns must be empty |
//!
//! Values stay text until validation, so a decimal comma works as long as
//! the cell is quoted.
//!
//! ### Example
//!
//! ```csv
//! household,ages,employment,business,pension,service,tax_months,decision_months,total_income
//! smith,30;10;8,24000,,,,,,
//! jones,67 70,,,,,,,"31000,50"
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::input::{RawComponents, RawHousehold, RawIncome};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    household: String,
    ages: String,
    #[serde(default)]
    employment: String,
    #[serde(default)]
    business: String,
    #[serde(default)]
    pension: String,
    #[serde(default)]
    service: String,
    #[serde(default)]
    tax_months: String,
    #[serde(default)]
    decision_months: String,
    #[serde(default)]
    total_income: String,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A labelled household read from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdRecord {
    pub household: String,
    pub raw: RawHousehold,
}

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A row filled in both `total_income` and at least one component
    /// column. `row` is 1-based (header = row 0).
    #[error("household '{household}' on row {row} mixes total_income with income components")]
    MixedIncomeVariants { household: String, row: usize },

    /// The file could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn split_ages(ages: &str) -> Vec<String> {
    ages.split(|c: char| c == ';' || c.is_whitespace())
        .filter(|age| !age.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert a single CSV row into a HouseholdRecord.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<HouseholdRecord, CsvLoadError> {
    let components = RawComponents {
        employment: row.employment,
        business: row.business,
        pension: row.pension,
        service: row.service,
        tax_months: row.tax_months,
        decision_months: row.decision_months,
    };

    let income = if row.total_income.trim().is_empty() {
        RawIncome::Components(components)
    } else {
        let has_components = [
            &components.employment,
            &components.business,
            &components.pension,
            &components.service,
            &components.tax_months,
            &components.decision_months,
        ]
        .iter()
        .any(|value| !value.trim().is_empty());

        if has_components {
            return Err(CsvLoadError::MixedIncomeVariants {
                household: row.household,
                row: row_number,
            });
        }
        RawIncome::Total(row.total_income)
    };

    Ok(HouseholdRecord {
        household: row.household,
        raw: RawHousehold {
            ages: split_ages(&row.ages),
            income,
        },
    })
}

/// Parse CSV text and return one record per data row, in file order.
///
/// Only the file structure is checked here; field values are validated
/// later, per household, so one bad row does not hide the others.
///
/// # Errors
///
/// * [CsvLoadError::Parse] if the CSV is structurally invalid.
/// * [CsvLoadError::MixedIncomeVariants] if a row uses both income variants.
pub fn load_from_str(input: &str) -> Result<Vec<HouseholdRecord>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let records = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(households = records.len(), "loaded households from CSV");
    Ok(records)
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<HouseholdRecord>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

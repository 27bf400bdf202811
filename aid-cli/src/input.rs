//! Parsing and validation of raw household input.
//!
//! Everything the user types arrives here as text. Numbers may use either `.`
//! or `,` as the decimal separator. Validation collects every problem at once
//! so all offending fields can be reported together; only a fully valid form
//! becomes a [`HouseholdSnapshot`] for the calculator.

use std::fmt;
use std::str::FromStr;

use aid_core::calculations::household::{MemberWeight, is_valid_age, member_weights};
use aid_core::{HouseholdSnapshot, IncomeComponents, IncomeSpec};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Months assumed for a tax or decision period left blank.
pub const DEFAULT_PERIOD_MONTHS: Decimal = dec!(12);

/// A single field-level validation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// A member's age is blank, not a number, or outside (0, 125).
    #[error("member {position}: age must be > 0 and < 125, got '{value}'")]
    InvalidAge { position: usize, value: String },

    /// No household members were entered at all.
    #[error("please enter at least one household member with a valid age")]
    NoMembers,

    /// An income amount is not a non-negative number.
    #[error("{field}: please enter a valid non-negative number, got '{value}'")]
    InvalidIncome { field: &'static str, value: String },

    /// A month count is not a number or out of range.
    #[error("{field}: months must be a valid {expected} number, got '{value}'")]
    InvalidMonths {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Every validation failure found in one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<InputError>);

impl fmt::Display for ValidationErrors {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Income fields exactly as entered, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComponents {
    pub employment: String,
    pub business: String,
    pub pension: String,
    pub service: String,
    pub tax_months: String,
    pub decision_months: String,
}

/// Income as entered, in either reporting variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawIncome {
    Components(RawComponents),
    Total(String),
}

/// One household form as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHousehold {
    pub ages: Vec<String>,
    pub income: RawIncome,
}

/// Trims and converts a decimal comma to a decimal point.
fn normalize_number_input(s: &str) -> String {
    s.trim().replace(',', ".")
}

/// Parses a plain decimal number after [`normalize_number_input`].
///
/// Accepts what `Decimal::from_str` accepts: an optional leading `+` or `-`,
/// digits with at most one decimal point, and `_` as a digit separator
/// (`1_000` is 1000). Exponent notation such as `1e3` is rejected, as is any
/// value outside the `Decimal` range.
fn parse_number(s: &str) -> Option<Decimal> {
    Decimal::from_str(&normalize_number_input(s)).ok()
}

/// Parses an income amount.
///
/// Empty input counts as zero. Negative or unparseable input is rejected.
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_cli::input::parse_amount;
///
/// assert_eq!(parse_amount("employment", "1234,56").unwrap(), dec!(1234.56));
/// assert_eq!(parse_amount("employment", "  ").unwrap(), dec!(0));
/// assert!(parse_amount("employment", "-5").is_err());
/// ```
pub fn parse_amount(
    field: &'static str,
    raw: &str,
) -> Result<Decimal, InputError> {
    if raw.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }

    match parse_number(raw) {
        Some(amount) if amount >= Decimal::ZERO => Ok(amount),
        _ => Err(InputError::InvalidIncome {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_months(
    field: &'static str,
    raw: &str,
    allow_zero: bool,
) -> Result<Decimal, InputError> {
    if raw.trim().is_empty() {
        return Ok(DEFAULT_PERIOD_MONTHS);
    }

    let lower_bound_ok = |months: Decimal| {
        if allow_zero {
            months >= Decimal::ZERO
        } else {
            months > Decimal::ZERO
        }
    };

    match parse_number(raw) {
        Some(months) if lower_bound_ok(months) => Ok(months),
        _ => Err(InputError::InvalidMonths {
            field,
            expected: if allow_zero { "non-negative" } else { "positive" },
            value: raw.to_string(),
        }),
    }
}

/// Parses the tax-period month count. Blank means 12; the value must be > 0.
pub fn parse_tax_months(raw: &str) -> Result<Decimal, InputError> {
    parse_months("tax months", raw, false)
}

/// Parses the decision-period month count. Blank means 12; the value must be >= 0.
pub fn parse_decision_months(raw: &str) -> Result<Decimal, InputError> {
    parse_months("decision months", raw, true)
}

/// Parses the age of the member at 1-based `position`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_cli::input::parse_age;
///
/// assert_eq!(parse_age(1, "42").unwrap(), dec!(42));
/// assert_eq!(parse_age(2, "2,5").unwrap(), dec!(2.5));
/// assert!(parse_age(3, "125").is_err());
/// assert!(parse_age(4, "").is_err());
/// ```
pub fn parse_age(
    position: usize,
    raw: &str,
) -> Result<Decimal, InputError> {
    parse_number(raw)
        .filter(|age| is_valid_age(*age))
        .ok_or_else(|| InputError::InvalidAge {
            position,
            value: raw.to_string(),
        })
}

/// Weight annotation for each entered age; invalid or blank ages get `None`.
///
/// An age counts only if [`parse_age`] accepts it, so an entry of 125 or
/// more gets no annotation and cannot take the first-member slot. The
/// preview therefore always agrees with the weights of the validated
/// household.
pub fn preview_weights(raw_ages: &[String]) -> Vec<Option<MemberWeight>> {
    let ages: Vec<Option<Decimal>> = raw_ages
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_age(index + 1, raw).ok())
        .collect();

    member_weights(&ages)
}

impl RawComponents {
    fn validate(
        &self,
        errors: &mut Vec<InputError>,
    ) -> Option<IncomeComponents> {
        let employment = parse_amount("employment", &self.employment);
        let business = parse_amount("business", &self.business);
        let pension = parse_amount("pension", &self.pension);
        let service = parse_amount("service", &self.service);
        let tax_months = parse_tax_months(&self.tax_months);
        let decision_months = parse_decision_months(&self.decision_months);

        match (employment, business, pension, service, tax_months, decision_months) {
            (Ok(employment), Ok(business), Ok(pension), Ok(service), Ok(tax_months), Ok(decision_months)) => {
                Some(IncomeComponents {
                    employment,
                    business,
                    pension,
                    service,
                    tax_months,
                    decision_months,
                })
            }
            (employment, business, pension, service, tax_months, decision_months) => {
                errors.extend(
                    [employment, business, pension, service, tax_months, decision_months]
                        .into_iter()
                        .filter_map(Result::err),
                );
                None
            }
        }
    }
}

impl RawIncome {
    fn validate(
        &self,
        errors: &mut Vec<InputError>,
    ) -> Option<IncomeSpec> {
        match self {
            Self::Components(raw) => raw.validate(errors).map(IncomeSpec::Components),
            Self::Total(raw) => match parse_amount("total income", raw) {
                Ok(total_annual_income) => Some(IncomeSpec::Total {
                    total_annual_income,
                }),
                Err(error) => {
                    errors.push(error);
                    None
                }
            },
        }
    }
}

impl RawHousehold {
    /// Validates the whole form and builds the calculator input.
    ///
    /// # Errors
    ///
    /// Returns every [`InputError`] found: income errors first, then member
    /// errors in member order.
    pub fn validate(&self) -> Result<HouseholdSnapshot, ValidationErrors> {
        let mut errors = Vec::new();

        let income = self.income.validate(&mut errors);

        let mut ages = Vec::with_capacity(self.ages.len());
        for (index, raw) in self.ages.iter().enumerate() {
            match parse_age(index + 1, raw) {
                Ok(age) => ages.push(age),
                Err(error) => errors.push(error),
            }
        }
        if self.ages.is_empty() {
            errors.push(InputError::NoMembers);
        }

        match income {
            Some(income) if errors.is_empty() => {
                debug!(members = ages.len(), "household input is valid");
                Ok(HouseholdSnapshot { ages, income })
            }
            _ => {
                debug!(errors = errors.len(), "household input rejected");
                Err(ValidationErrors(errors))
            }
        }
    }
}

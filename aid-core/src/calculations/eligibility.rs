//! Eligibility evaluation against the per-person monthly income ceiling.
//!
//! The annual income is spread over twelve months and divided by the
//! household size in consumption units. A household qualifies only if that
//! figure is strictly below [`MAX_INCOME_PER_PERSON`]; an income exactly at the
//! ceiling does not qualify.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use aid_core::calculations::eligibility::evaluate_eligibility;
//!
//! // 23160 / 12 = 1930, exactly at the ceiling
//! let at_ceiling = evaluate_eligibility(dec!(23160), dec!(1.0)).unwrap();
//! assert!(!at_ceiling.eligible);
//!
//! let below = evaluate_eligibility(dec!(23159), dec!(1.0)).unwrap();
//! assert!(below.eligible);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Statutory monthly income ceiling per consumption unit.
pub const MAX_INCOME_PER_PERSON: Decimal = dec!(1930);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Contract violations detected by the evaluator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EligibilityError {
    /// The household size is zero or negative; dividing by it is meaningless.
    #[error("household size must be positive, got {0}")]
    DegenerateHouseholdSize(Decimal),

    /// The annual income is negative.
    #[error("annual income must be non-negative, got {0}")]
    NegativeIncome(Decimal),

    /// The income per consumption unit does not fit in a `Decimal`.
    #[error("income per person is too large to compute")]
    Overflow,
}

/// Verdict of a single eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    /// Household size in consumption units.
    pub household_size: Decimal,

    /// The statutory ceiling the average was compared against.
    pub max_income_per_person: Decimal,

    /// Monthly income per consumption unit, unrounded.
    pub average_income_per_person: Decimal,

    /// `true` if `average_income_per_person < max_income_per_person`.
    pub eligible: bool,
}

/// Evaluates eligibility for an annual income and a household size.
///
/// # Errors
///
/// Returns [`EligibilityError::DegenerateHouseholdSize`] if
/// `household_size <= 0` and [`EligibilityError::NegativeIncome`] if
/// `annual_income < 0`. Neither case is reachable through validated input.
/// Returns [`EligibilityError::Overflow`] if the income per consumption unit
/// is too large for a `Decimal`.
pub fn evaluate_eligibility(
    annual_income: Decimal,
    household_size: Decimal,
) -> Result<EligibilityResult, EligibilityError> {
    if household_size <= Decimal::ZERO {
        warn!(household_size = %household_size, "refusing to evaluate degenerate household");
        return Err(EligibilityError::DegenerateHouseholdSize(household_size));
    }
    if annual_income < Decimal::ZERO {
        warn!(annual_income = %annual_income, "refusing to evaluate negative income");
        return Err(EligibilityError::NegativeIncome(annual_income));
    }

    let monthly_income = annual_income / MONTHS_PER_YEAR;
    let average_income_per_person = monthly_income.checked_div(household_size).ok_or_else(|| {
        warn!(
            monthly_income = %monthly_income,
            household_size = %household_size,
            "income per person overflows"
        );
        EligibilityError::Overflow
    })?;
    let eligible = average_income_per_person < MAX_INCOME_PER_PERSON;

    debug!(
        monthly_income = %monthly_income,
        average_income_per_person = %average_income_per_person,
        eligible,
        "evaluated eligibility"
    );

    Ok(EligibilityResult {
        household_size,
        max_income_per_person: MAX_INCOME_PER_PERSON,
        average_income_per_person,
        eligible,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::common::round_half_up;

    #[test]
    fn income_at_ceiling_is_not_eligible() {
        let result = evaluate_eligibility(dec!(23160), dec!(1.0)).unwrap();

        assert_eq!(
            result,
            EligibilityResult {
                household_size: dec!(1.0),
                max_income_per_person: dec!(1930),
                average_income_per_person: dec!(1930),
                eligible: false,
            }
        );
    }

    #[test]
    fn income_just_below_ceiling_is_eligible() {
        let result = evaluate_eligibility(dec!(23159), dec!(1.0)).unwrap();

        assert_eq!(round_half_up(result.average_income_per_person), dec!(1929.92));
        assert!(result.eligible);
    }

    #[test]
    fn income_is_divided_by_consumption_units() {
        // 46320 / 12 = 3860, / 2.0 = 1930
        let result = evaluate_eligibility(dec!(46320), dec!(2.0)).unwrap();

        assert_eq!(result.average_income_per_person, dec!(1930));
        assert!(!result.eligible);
    }

    #[test]
    fn zero_income_is_eligible() {
        let result = evaluate_eligibility(Decimal::ZERO, dec!(0.5)).unwrap();

        assert_eq!(result.average_income_per_person, Decimal::ZERO);
        assert!(result.eligible);
    }

    #[test]
    fn zero_household_size_is_rejected() {
        let result = evaluate_eligibility(dec!(12000), Decimal::ZERO);

        assert_eq!(
            result,
            Err(EligibilityError::DegenerateHouseholdSize(Decimal::ZERO))
        );
    }

    #[test]
    fn negative_household_size_is_rejected() {
        let result = evaluate_eligibility(dec!(12000), dec!(-0.5));

        assert_eq!(
            result,
            Err(EligibilityError::DegenerateHouseholdSize(dec!(-0.5)))
        );
    }

    #[test]
    fn negative_income_is_rejected() {
        let result = evaluate_eligibility(dec!(-1), dec!(1.0));

        assert_eq!(result, Err(EligibilityError::NegativeIncome(dec!(-1))));
    }

    #[test]
    fn income_per_person_too_large_is_rejected() {
        let result = evaluate_eligibility(Decimal::MAX, dec!(0.01));

        assert_eq!(result, Err(EligibilityError::Overflow));
    }

    #[test]
    fn largest_income_for_one_child_is_evaluated() {
        // Decimal::MAX / 12 / 0.5 still fits
        let result = evaluate_eligibility(Decimal::MAX, dec!(0.5)).unwrap();

        assert!(!result.eligible);
    }

    #[test]
    fn repeated_evaluations_are_bit_identical() {
        let first = evaluate_eligibility(dec!(31415.92), dec!(2.7)).unwrap();
        let second = evaluate_eligibility(dec!(31415.92), dec!(2.7)).unwrap();

        assert_eq!(
            first.average_income_per_person.serialize(),
            second.average_income_per_person.serialize()
        );
        assert_eq!(first, second);
    }
}

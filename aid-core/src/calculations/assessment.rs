//! Complete eligibility assessment for one household snapshot.
//!
//! Runs the household sizer, the income normalizer and the evaluator in
//! order. A household without members stops before the evaluator is reached.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use aid_core::{HouseholdSnapshot, IncomeSpec, assess};
//!
//! let snapshot = HouseholdSnapshot {
//!     ages: vec![dec!(30), dec!(10), dec!(8)],
//!     income: IncomeSpec::Total { total_annual_income: dec!(40000) },
//! };
//!
//! let assessment = assess(&snapshot).unwrap();
//!
//! assert_eq!(assessment.result.household_size, dec!(2.0));
//! assert!(assessment.result.eligible);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::calculations::eligibility::{EligibilityError, EligibilityResult, evaluate_eligibility};
use crate::calculations::household::{MemberWeight, household_size_from_weights, weights_for_ages};
use crate::calculations::income::{IncomeError, normalize_income};
use crate::models::HouseholdSnapshot;

/// Reasons an assessment cannot produce a verdict.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssessmentError {
    /// The snapshot has no members, so the household size is zero.
    #[error("household has no members with a valid age")]
    NoValidMembers,

    #[error(transparent)]
    Income(#[from] IncomeError),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
}

/// Output of [`assess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Normalized annual household income.
    pub annual_income: Decimal,

    /// Weight class of each member, in snapshot order.
    pub member_weights: Vec<MemberWeight>,

    pub result: EligibilityResult,
}

/// Assesses a household snapshot.
///
/// # Errors
///
/// Returns [`AssessmentError::NoValidMembers`] for an empty household, or the
/// wrapped normalizer/evaluator error if the snapshot breaks their
/// preconditions.
pub fn assess(snapshot: &HouseholdSnapshot) -> Result<Assessment, AssessmentError> {
    let member_weights = weights_for_ages(&snapshot.ages);
    let household_size = household_size_from_weights(&member_weights);
    if household_size <= Decimal::ZERO {
        warn!(members = snapshot.ages.len(), "household size is zero; cannot evaluate");
        return Err(AssessmentError::NoValidMembers);
    }

    let annual_income = normalize_income(&snapshot.income)?;
    let result = evaluate_eligibility(annual_income, household_size)?;

    info!(
        household_size = %result.household_size,
        annual_income = %annual_income,
        eligible = result.eligible,
        "assessment complete"
    );

    Ok(Assessment {
        annual_income,
        member_weights,
        result,
    })
}

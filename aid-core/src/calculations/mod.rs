//! Eligibility calculations for the energy-assistance subsidy.
//!
//! The calculation runs in three steps, each in its own module:
//!
//! 1. [`household`] turns member ages into consumption units.
//! 2. [`income`] turns the reported income into one annual total.
//! 3. [`eligibility`] compares the monthly income per consumption unit
//!    against the statutory ceiling.
//!
//! [`assessment`] chains the three steps for a complete
//! [`HouseholdSnapshot`](crate::HouseholdSnapshot).

pub mod assessment;
pub mod common;
pub mod eligibility;
pub mod household;
pub mod income;

pub use assessment::{Assessment, AssessmentError, assess};
pub use eligibility::{
    EligibilityError, EligibilityResult, MAX_INCOME_PER_PERSON, evaluate_eligibility,
};
pub use household::{
    ADULT_AGE, MAX_AGE, MemberWeight, compute_household_size, household_size_from_weights,
    is_valid_age, member_weights, weights_for_ages,
};
pub use income::{
    BUSINESS_NET_TO_GROSS_RATIO, IncomeError, annualization_factor, normalize_component_income,
    normalize_income, normalize_total_income,
};

pub mod calculations;
pub mod models;

pub use calculations::{
    Assessment, AssessmentError, EligibilityError, EligibilityResult, IncomeError, MemberWeight,
    assess, compute_household_size, evaluate_eligibility, member_weights, normalize_income,
};
pub use models::*;

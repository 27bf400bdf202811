//! Household size in consumption units.
//!
//! Members do not count as whole persons. The household size is a weighted
//! sum:
//!
//! | Member                                      | Weight |
//! |---------------------------------------------|--------|
//! | First member aged 14 or older (input order) | 1.0    |
//! | Every further member aged 14 or older       | 0.7    |
//! | Every member younger than 14                | 0.5    |
//!
//! The first member aged 14 or older is chosen by position, not by age, so a
//! household entered as `[40, 70]` weighs the 40-year-old at 1.0 while
//! `[70, 40]` weighs the 70-year-old at 1.0. The total is the same either
//! way; the distinction only matters for the per-member annotation returned by
//! [`member_weights`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use aid_core::calculations::household::compute_household_size;
//!
//! // One adult and two children: 1.0 + 0.5 + 0.5
//! assert_eq!(compute_household_size(&[dec!(30), dec!(10), dec!(8)]), dec!(2.0));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Members at or above this age are weighted 1.0 or 0.7 instead of 0.5.
pub const ADULT_AGE: Decimal = dec!(14);

/// Exclusive upper bound of a valid age.
pub const MAX_AGE: Decimal = dec!(125);

/// Returns `true` if `age` lies in the open interval (0, [`MAX_AGE`]).
///
/// Ages outside that range are rejected by the input layer and never reach
/// the household calculation.
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_core::calculations::household::is_valid_age;
///
/// assert!(is_valid_age(dec!(0.5)));
/// assert!(!is_valid_age(dec!(0)));
/// assert!(!is_valid_age(dec!(125)));
/// ```
pub fn is_valid_age(age: Decimal) -> bool {
    age > Decimal::ZERO && age < MAX_AGE
}

/// Weight class of a single household member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberWeight {
    /// The first member, in input order, aged 14 or older.
    FirstMember14Plus,

    /// Any later member aged 14 or older.
    AdditionalMember14Plus,

    /// A member younger than 14.
    Under14,
}

impl MemberWeight {
    /// Consumption units contributed by a member of this class.
    pub fn value(&self) -> Decimal {
        match self {
            Self::FirstMember14Plus => dec!(1.0),
            Self::AdditionalMember14Plus => dec!(0.7),
            Self::Under14 => dec!(0.5),
        }
    }

    /// Short explanation shown next to the weight.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstMember14Plus => "first member ≥ 14",
            Self::AdditionalMember14Plus => "additional member ≥ 14",
            Self::Under14 => "member < 14",
        }
    }
}

/// Classifies every member of a household by position.
///
/// `None` entries stand for members whose age is missing or invalid. They
/// keep their slot in the output (as `None`) but never take the "first
/// member" weight.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_core::calculations::household::{MemberWeight, member_weights};
///
/// let weights = member_weights(&[Some(dec!(8)), None, Some(dec!(70)), Some(dec!(40))]);
///
/// assert_eq!(
///     weights,
///     vec![
///         Some(MemberWeight::Under14),
///         None,
///         Some(MemberWeight::FirstMember14Plus),
///         Some(MemberWeight::AdditionalMember14Plus),
///     ]
/// );
/// ```
pub fn member_weights(ages: &[Option<Decimal>]) -> Vec<Option<MemberWeight>> {
    let first_adult = ages
        .iter()
        .position(|age| matches!(age, Some(age) if *age >= ADULT_AGE));

    ages.iter()
        .enumerate()
        .map(|(index, age)| {
            age.map(|age| {
                if age < ADULT_AGE {
                    MemberWeight::Under14
                } else if first_adult == Some(index) {
                    MemberWeight::FirstMember14Plus
                } else {
                    MemberWeight::AdditionalMember14Plus
                }
            })
        })
        .collect()
}

/// Computes the household size in consumption units.
///
/// `ages` must already be filtered to valid values. An empty slice yields
/// zero, which callers must treat as "cannot evaluate".
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use aid_core::calculations::household::compute_household_size;
///
/// assert_eq!(compute_household_size(&[]), Decimal::ZERO);
/// assert_eq!(compute_household_size(&[dec!(30), dec!(40)]), dec!(1.7));
/// ```
pub fn compute_household_size(ages: &[Decimal]) -> Decimal {
    let size = household_size_from_weights(&weights_for_ages(ages));

    debug!(members = ages.len(), size = %size, "computed household size");
    size
}

/// Weight class of each member of an already validated age list.
pub fn weights_for_ages(ages: &[Decimal]) -> Vec<MemberWeight> {
    let known: Vec<Option<Decimal>> = ages.iter().copied().map(Some).collect();

    member_weights(&known).into_iter().flatten().collect()
}

/// Sums member weights into the household size in consumption units.
pub fn household_size_from_weights(weights: &[MemberWeight]) -> Decimal {
    weights.iter().map(|weight| weight.value()).sum()
}

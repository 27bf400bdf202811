//! Shared helpers for presenting calculation results.
//!
//! The calculations themselves never round; rounding only happens when a
//! value is shown to the user.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1929.91666)), dec!(1929.92));
/// assert_eq!(round_half_up(dec!(5773.6720)), dec!(5773.67));
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

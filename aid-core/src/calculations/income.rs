//! Income normalization.
//!
//! Both ways of reporting income end in one annual total:
//!
//! - [`IncomeSpec::Components`]: employment, pension and service income are
//!   taken as reported. Business income is grossed up by the statutory
//!   net-to-gross ratio and scaled by the annualization factor
//!   `K = min(decision_months / tax_months, 1)`.
//! - [`IncomeSpec::Total`]: the reported total is used unchanged.
//!
//! No rounding happens here; full precision is carried into the eligibility
//! evaluation.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use aid_core::calculations::income::normalize_income;
//! use aid_core::{IncomeComponents, IncomeSpec};
//!
//! let spec = IncomeSpec::Components(IncomeComponents {
//!     employment: dec!(12000),
//!     business: dec!(0),
//!     pension: dec!(0),
//!     service: dec!(0),
//!     tax_months: dec!(12),
//!     decision_months: dec!(12),
//! });
//!
//! assert_eq!(normalize_income(&spec).unwrap(), dec!(12000));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{IncomeComponents, IncomeSource, IncomeSpec};

/// Statutory ratio between net and gross self-employment income.
pub const BUSINESS_NET_TO_GROSS_RATIO: Decimal = dec!(0.866);

/// Reasons the normalizer cannot produce an annual total.
///
/// The input layer rejects everything except [`IncomeError::Overflow`]
/// before normalization runs, so seeing another variant here means a caller
/// skipped validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeError {
    /// An income amount is negative.
    #[error("{kind} income must be non-negative, got {amount}")]
    NegativeAmount { kind: IncomeSource, amount: Decimal },

    /// The tax period has no months to divide by.
    #[error("tax months must be positive, got {0}")]
    NonPositiveTaxMonths(Decimal),

    /// The decision period is negative.
    #[error("decision months must be non-negative, got {0}")]
    NegativeDecisionMonths(Decimal),

    /// A pre-aggregated annual total is negative.
    #[error("total annual income must be non-negative, got {0}")]
    NegativeTotal(Decimal),

    /// The annual total does not fit in a `Decimal`.
    #[error("annual income is too large to compute")]
    Overflow,
}

/// Computes the annualization factor `K = min(decision_months / tax_months, 1)`.
///
/// # Errors
///
/// Returns [`IncomeError::NonPositiveTaxMonths`] if `tax_months <= 0` and
/// [`IncomeError::NegativeDecisionMonths`] if `decision_months < 0`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_core::calculations::income::annualization_factor;
///
/// assert_eq!(annualization_factor(dec!(12), dec!(6)).unwrap(), dec!(0.5));
///
/// // Capped at 1 when the decision period is longer than the tax period
/// assert_eq!(annualization_factor(dec!(6), dec!(12)).unwrap(), dec!(1));
/// ```
pub fn annualization_factor(
    tax_months: Decimal,
    decision_months: Decimal,
) -> Result<Decimal, IncomeError> {
    if tax_months <= Decimal::ZERO {
        warn!(tax_months = %tax_months, "tax months must be positive");
        return Err(IncomeError::NonPositiveTaxMonths(tax_months));
    }
    if decision_months < Decimal::ZERO {
        warn!(decision_months = %decision_months, "decision months must be non-negative");
        return Err(IncomeError::NegativeDecisionMonths(decision_months));
    }

    let ratio = decision_months / tax_months;
    if ratio > Decimal::ONE {
        debug!(
            tax_months = %tax_months,
            decision_months = %decision_months,
            "decision period exceeds tax period; capping factor at 1"
        );
    }

    Ok(ratio.min(Decimal::ONE))
}

/// Normalizes component income into an annual total.
///
/// `total = employment + (business / 0.866) * K + pension + service`
///
/// # Errors
///
/// Returns [`IncomeError::NegativeAmount`] for any negative income amount,
/// the errors of [`annualization_factor`] for invalid month counts, or
/// [`IncomeError::Overflow`] if the grossed-up business income or the sum of
/// all sources is too large for a `Decimal`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use aid_core::IncomeComponents;
/// use aid_core::calculations::common::round_half_up;
/// use aid_core::calculations::income::normalize_component_income;
///
/// let components = IncomeComponents {
///     employment: dec!(0),
///     business: dec!(10000),
///     pension: dec!(0),
///     service: dec!(0),
///     tax_months: dec!(12),
///     decision_months: dec!(6),
/// };
///
/// // (10000 / 0.866) * 0.5
/// let total = normalize_component_income(&components).unwrap();
/// assert_eq!(round_half_up(total), dec!(5773.67));
/// ```
pub fn normalize_component_income(components: &IncomeComponents) -> Result<Decimal, IncomeError> {
    for (kind, amount) in components.amounts() {
        if amount < Decimal::ZERO {
            warn!(source = %kind, amount = %amount, "negative income amount");
            return Err(IncomeError::NegativeAmount { kind, amount });
        }
    }

    let factor = annualization_factor(components.tax_months, components.decision_months)?;
    let business = components
        .business
        .checked_div(BUSINESS_NET_TO_GROSS_RATIO)
        .and_then(|gross| gross.checked_mul(factor))
        .ok_or_else(|| {
            warn!(business = %components.business, "annualized business income overflows");
            IncomeError::Overflow
        })?;

    let total = [business, components.pension, components.service]
        .into_iter()
        .try_fold(components.employment, |sum, amount| sum.checked_add(amount))
        .ok_or_else(|| {
            warn!("sum of income components overflows");
            IncomeError::Overflow
        })?;

    debug!(
        factor = %factor,
        annualized_business = %business,
        total = %total,
        "normalized component income"
    );

    Ok(total)
}

/// Normalizes a pre-aggregated annual total, which is returned unchanged.
///
/// # Errors
///
/// Returns [`IncomeError::NegativeTotal`] if the total is negative.
pub fn normalize_total_income(total_annual_income: Decimal) -> Result<Decimal, IncomeError> {
    if total_annual_income < Decimal::ZERO {
        warn!(total = %total_annual_income, "negative total annual income");
        return Err(IncomeError::NegativeTotal(total_annual_income));
    }

    Ok(total_annual_income)
}

/// Normalizes either income variant into an annual total.
pub fn normalize_income(spec: &IncomeSpec) -> Result<Decimal, IncomeError> {
    match spec {
        IncomeSpec::Components(components) => normalize_component_income(components),
        IncomeSpec::Total {
            total_annual_income,
        } => normalize_total_income(*total_annual_income),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::calculations::common::round_half_up;

    /// Twelve months of employment income only.
    fn employment_only() -> IncomeComponents {
        IncomeComponents {
            employment: dec!(12000),
            business: dec!(0),
            pension: dec!(0),
            service: dec!(0),
            tax_months: dec!(12),
            decision_months: dec!(12),
        }
    }

    /// Initializes tracing subscriber for tests that exercise log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // annualization_factor tests
    // =========================================================================

    #[test]
    fn factor_is_ratio_of_decision_to_tax_months() {
        let result = annualization_factor(dec!(12), dec!(6));

        assert_eq!(result, Ok(dec!(0.5)));
    }

    #[test]
    fn factor_is_one_for_equal_periods() {
        let result = annualization_factor(dec!(12), dec!(12));

        assert_eq!(result, Ok(Decimal::ONE));
    }

    #[test]
    fn factor_never_exceeds_one() {
        let _guard = init_test_tracing();

        let result = annualization_factor(dec!(4), dec!(12));

        assert_eq!(result, Ok(Decimal::ONE));
    }

    #[test]
    fn factor_is_zero_for_zero_decision_months() {
        let result = annualization_factor(dec!(12), dec!(0));

        assert_eq!(result, Ok(Decimal::ZERO));
    }

    #[test]
    fn factor_rejects_zero_tax_months() {
        let _guard = init_test_tracing();

        let result = annualization_factor(dec!(0), dec!(12));

        assert_eq!(result, Err(IncomeError::NonPositiveTaxMonths(dec!(0))));
    }

    #[test]
    fn factor_rejects_negative_tax_months() {
        let result = annualization_factor(dec!(-1), dec!(12));

        assert_eq!(result, Err(IncomeError::NonPositiveTaxMonths(dec!(-1))));
    }

    #[test]
    fn factor_rejects_negative_decision_months() {
        let result = annualization_factor(dec!(12), dec!(-2));

        assert_eq!(result, Err(IncomeError::NegativeDecisionMonths(dec!(-2))));
    }

    // =========================================================================
    // normalize_component_income tests
    // =========================================================================

    #[test]
    fn components_employment_only_is_unchanged() {
        let result = normalize_component_income(&employment_only());

        assert_eq!(result, Ok(dec!(12000)));
    }

    #[test]
    fn components_business_income_is_grossed_up_and_scaled() {
        let components = IncomeComponents {
            employment: dec!(0),
            business: dec!(10000),
            decision_months: dec!(6),
            ..employment_only()
        };

        let result = normalize_component_income(&components).unwrap();

        assert_eq!(round_half_up(result), dec!(5773.67));
    }

    #[test]
    fn components_business_factor_is_capped_at_one() {
        let capped = IncomeComponents {
            employment: dec!(0),
            business: dec!(8660),
            tax_months: dec!(6),
            decision_months: dec!(12),
            ..employment_only()
        };

        let result = normalize_component_income(&capped);

        // 8660 / 0.866 = 10000, K = 1
        assert_eq!(result, Ok(dec!(10000)));
    }

    #[test]
    fn components_sum_all_sources() {
        let components = IncomeComponents {
            employment: dec!(12000),
            business: dec!(866),
            pension: dec!(3000.50),
            service: dec!(250.25),
            tax_months: dec!(12),
            decision_months: dec!(12),
        };

        let result = normalize_component_income(&components);

        assert_eq!(result, Ok(dec!(16250.75)));
    }

    #[test]
    fn components_reject_negative_amount() {
        let _guard = init_test_tracing();
        let components = IncomeComponents {
            pension: dec!(-1),
            ..employment_only()
        };

        let result = normalize_component_income(&components);

        assert_eq!(
            result,
            Err(IncomeError::NegativeAmount {
                kind: IncomeSource::Pension,
                amount: dec!(-1),
            })
        );
    }

    #[test]
    fn components_reject_zero_tax_months_without_fallback() {
        let components = IncomeComponents {
            tax_months: dec!(0),
            ..employment_only()
        };

        let result = normalize_component_income(&components);

        assert_eq!(result, Err(IncomeError::NonPositiveTaxMonths(dec!(0))));
    }

    #[test]
    fn components_reject_business_income_too_large_to_gross_up() {
        let _guard = init_test_tracing();
        let components = IncomeComponents {
            employment: dec!(0),
            business: Decimal::MAX,
            ..employment_only()
        };

        let result = normalize_component_income(&components);

        assert_eq!(result, Err(IncomeError::Overflow));
    }

    #[test]
    fn components_reject_sum_too_large_to_represent() {
        let components = IncomeComponents {
            employment: Decimal::MAX,
            pension: Decimal::MAX,
            ..employment_only()
        };

        let result = normalize_component_income(&components);

        assert_eq!(result, Err(IncomeError::Overflow));
    }

    #[test]
    fn components_accept_largest_single_amount() {
        let components = IncomeComponents {
            employment: Decimal::MAX,
            ..employment_only()
        };

        let result = normalize_component_income(&components);

        assert_eq!(result, Ok(Decimal::MAX));
    }

    #[test]
    fn components_are_idempotent() {
        let components = IncomeComponents {
            business: dec!(12345.67),
            tax_months: dec!(11),
            decision_months: dec!(7),
            ..employment_only()
        };

        let first = normalize_component_income(&components).unwrap();
        let second = normalize_component_income(&components).unwrap();

        assert_eq!(first.serialize(), second.serialize());
    }

    // =========================================================================
    // normalize_total_income / normalize_income tests
    // =========================================================================

    #[test]
    fn total_is_returned_unchanged() {
        let result = normalize_total_income(dec!(23159.99));

        assert_eq!(result, Ok(dec!(23159.99)));
    }

    #[test]
    fn total_rejects_negative_value() {
        let result = normalize_total_income(dec!(-0.01));

        assert_eq!(result, Err(IncomeError::NegativeTotal(dec!(-0.01))));
    }

    #[test]
    fn normalize_income_dispatches_on_variant() {
        let components = IncomeSpec::Components(employment_only());
        let total = IncomeSpec::Total {
            total_annual_income: dec!(12000),
        };

        assert_eq!(normalize_income(&components), normalize_income(&total));
    }

    #[test]
    fn income_error_messages() {
        let error = IncomeError::NegativeAmount {
            kind: IncomeSource::Business,
            amount: dec!(-5),
        };

        assert_eq!(error.to_string(), "business income must be non-negative, got -5");
        assert_eq!(
            IncomeError::NonPositiveTaxMonths(dec!(0)).to_string(),
            "tax months must be positive, got 0"
        );
    }
}

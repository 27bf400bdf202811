use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The four income sources collected by the component form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    Employment,
    Business,
    Pension,
    Service,
}

impl IncomeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employment => "employment",
            Self::Business => "business",
            Self::Pension => "pension",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw income figures for households that report each source separately.
///
/// Business income is reported net for the tax period and is annualized over
/// the decision period during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeComponents {
    pub employment: Decimal,
    pub business: Decimal,
    pub pension: Decimal,
    pub service: Decimal,

    /// Months covered by the tax return the business income comes from.
    pub tax_months: Decimal,

    /// Months of the decision period the business income is scaled to.
    pub decision_months: Decimal,
}

impl IncomeComponents {
    /// Returns each income amount paired with its source, in form order.
    pub fn amounts(&self) -> [(IncomeSource, Decimal); 4] {
        [
            (IncomeSource::Employment, self.employment),
            (IncomeSource::Business, self.business),
            (IncomeSource::Pension, self.pension),
            (IncomeSource::Service, self.service),
        ]
    }
}

/// How the household's income was reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum IncomeSpec {
    /// Separate employment, business, pension and service figures.
    Components(IncomeComponents),

    /// A single pre-aggregated annual total.
    Total { total_annual_income: Decimal },
}

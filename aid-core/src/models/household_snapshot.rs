use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::IncomeSpec;

/// Immutable input for one eligibility check.
///
/// Ages are kept in the order the members were entered; that order decides
/// which member 14 or older counts as the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdSnapshot {
    pub ages: Vec<Decimal>,
    pub income: IncomeSpec,
}

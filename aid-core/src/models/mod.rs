mod household_snapshot;
mod income_spec;

pub use household_snapshot::HouseholdSnapshot;
pub use income_spec::{IncomeComponents, IncomeSource, IncomeSpec};

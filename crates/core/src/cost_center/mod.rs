//! Cost center domain types.

pub mod types;

pub use types::{CostCenter, CostCenterFilter, CostCenterNode};

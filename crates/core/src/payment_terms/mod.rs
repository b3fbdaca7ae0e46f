//! Payment terms domain types.

pub mod types;

pub use types::{PaymentTerms, PaymentTermsFilter};

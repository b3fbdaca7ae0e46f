//! Bulk operation domain types and outcome reconciliation.
//!
//! A bulk operation applies one action to many selected records in a single
//! request. The server decides per record; the client's job is to reconcile
//! the reported partial success against the requested set and to mutate its
//! local cache for exactly the successful subset.
//!
//! # Modules
//!
//! - `types` - Actions, requests, per-record verdicts and failures
//! - `outcome` - Requested-vs-reported reconciliation and list helpers
//! - `error` - Bulk-specific validation errors

pub mod error;
pub mod outcome;
pub mod types;

#[cfg(test)]
mod props;

pub use error::BulkError;
pub use outcome::{BulkOutcome, remove_succeeded, update_succeeded};
pub use types::{BulkAction, BulkRequest, BulkResponse, ItemFailure, ValidationVerdict};

//! Core domain logic for Ledgerdesk.
//!
//! This crate contains pure domain types and logic with ZERO network
//! dependencies. Entities mirror the records owned by the accounting
//! backend; the logic here is limited to what the client legitimately
//! decides on its own: filter fingerprints, status-transition feasibility,
//! bulk-result reconciliation, and change notification.
//!
//! # Modules
//!
//! - `account` - Chart of accounts entities and filters
//! - `cost_center` - Cost center entities and filters
//! - `journal` - Journal entries, status machine, and filters
//! - `payment_terms` - Payment terms entities and filters
//! - `bulk` - Bulk operation requests, verdicts, and outcome reconciliation
//! - `events` - In-memory change-event bus
//! - `filter` - Query filter abstraction and fingerprinting

pub mod account;
pub mod bulk;
pub mod cost_center;
pub mod events;
pub mod filter;
pub mod journal;
pub mod payment_terms;

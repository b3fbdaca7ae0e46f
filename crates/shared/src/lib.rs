//! Shared types, errors, and configuration for Ledgerdesk.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list requests and responses
//! - Application-wide error types with user-facing messages
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{ApiConfig, ClientConfig};
pub use error::{ApiError, AppResult};

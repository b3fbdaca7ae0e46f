//! HTTP service layer for Ledgerdesk.
//!
//! Thin, typed services that map parameters to REST calls against the
//! accounting backend. No business logic lives here: requests go out,
//! responses come back, errors are normalized to [`ledgerdesk_shared::ApiError`].
//!
//! # Modules
//!
//! - `transport` - The HTTP abstraction over reqwest
//! - `services` - One service per backend resource
//! - `export` - Server-generated export blobs

pub mod export;
pub mod services;
pub mod transport;

use std::sync::Arc;

use ledgerdesk_shared::{ApiConfig, AppResult};

use services::accounts::AccountsService;
use services::cost_centers::CostCentersService;
use services::journal_entries::JournalEntriesService;
use services::payment_terms::PaymentTermsService;
use transport::HttpTransport;

/// Entry point bundling all resource services over one shared transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<HttpTransport>,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Returns the chart of accounts service.
    #[must_use]
    pub fn accounts(&self) -> AccountsService<HttpTransport> {
        AccountsService::new(Arc::clone(&self.transport))
    }

    /// Returns the cost centers service.
    #[must_use]
    pub fn cost_centers(&self) -> CostCentersService<HttpTransport> {
        CostCentersService::new(Arc::clone(&self.transport))
    }

    /// Returns the journal entries service.
    #[must_use]
    pub fn journal_entries(&self) -> JournalEntriesService<HttpTransport> {
        JournalEntriesService::new(Arc::clone(&self.transport))
    }

    /// Returns the payment terms service.
    #[must_use]
    pub fn payment_terms(&self) -> PaymentTermsService<HttpTransport> {
        PaymentTermsService::new(Arc::clone(&self.transport))
    }
}

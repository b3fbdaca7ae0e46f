//! Payment terms store.

use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use ledgerdesk_client::services::payment_terms::{
    CreatePaymentTermsInput, PaymentTermsService, UpdatePaymentTermsInput,
};
use ledgerdesk_client::transport::Transport;
use ledgerdesk_core::events::{ChangeEvent, ChangeKind, EntityKind, EventBus};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_core::payment_terms::{PaymentTerms, PaymentTermsFilter};
use ledgerdesk_shared::types::PaymentTermsId;
use ledgerdesk_shared::{ApiError, AppResult};

/// In-memory mirror of the payment terms list plus its fetch/mutation
/// state.
pub struct PaymentTermsStore<T> {
    service: PaymentTermsService<T>,
    bus: Arc<EventBus>,
    items: Vec<PaymentTerms>,
    loading: bool,
    error: Option<String>,
    last_fingerprint: Option<String>,
}

impl<T: Transport> PaymentTermsStore<T> {
    /// Creates a store over the given transport and event bus.
    #[must_use]
    pub fn new(transport: Arc<T>, bus: Arc<EventBus>) -> Self {
        Self {
            service: PaymentTermsService::new(transport),
            bus,
            items: Vec::new(),
            loading: false,
            error: None,
            last_fingerprint: None,
        }
    }

    /// The cached payment terms list.
    #[must_use]
    pub fn items(&self) -> &[PaymentTerms] {
        &self.items
    }

    /// True while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last user-facing error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Refreshes the list for `filter`, suppressing duplicate fetches
    /// for an identical fingerprint. Returns whether a request was made.
    pub async fn refresh(&mut self, filter: &PaymentTermsFilter) -> AppResult<bool> {
        let fingerprint = filter.fingerprint();
        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return Ok(false);
        }
        self.load(filter, fingerprint).await?;
        Ok(true)
    }

    /// Refreshes the list unconditionally.
    pub async fn force_refresh(&mut self, filter: &PaymentTermsFilter) -> AppResult<()> {
        let fingerprint = filter.fingerprint();
        self.load(filter, fingerprint).await
    }

    async fn load(&mut self, filter: &PaymentTermsFilter, fingerprint: String) -> AppResult<()> {
        self.loading = true;
        let result = self.service.list(filter).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.items = page.data;
                self.last_fingerprint = Some(fingerprint);
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Creates a payment terms definition and appends it to the cached
    /// list.
    pub async fn create(&mut self, input: &CreatePaymentTermsInput) -> AppResult<PaymentTerms> {
        match self.service.create(input).await {
            Ok(terms) => {
                self.items.push(terms.clone());
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::PaymentTerms,
                    ChangeKind::Created,
                    Uuid::from(terms.id),
                ));
                Ok(terms)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Updates a payment terms definition and replaces exactly the
    /// matching cached record.
    pub async fn update(
        &mut self,
        id: PaymentTermsId,
        input: &UpdatePaymentTermsInput,
    ) -> AppResult<PaymentTerms> {
        match self.service.update(id, input).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|t| t.id == id) {
                    *slot = updated.clone();
                }
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::PaymentTerms,
                    ChangeKind::Updated,
                    Uuid::from(id),
                ));
                Ok(updated)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Flips the active flag of the cached record with `id`.
    pub async fn toggle_active(&mut self, id: PaymentTermsId) -> AppResult<PaymentTerms> {
        let is_active = match self.items.iter().find(|t| t.id == id) {
            Some(terms) => terms.is_active,
            None => {
                return Err(self.capture(ApiError::NotFound(format!(
                    "payment terms {id} is not in the local list"
                ))));
            }
        };

        let input = UpdatePaymentTermsInput {
            is_active: Some(!is_active),
            ..Default::default()
        };
        self.update(id, &input).await
    }

    /// Deletes a payment terms definition and removes it from the
    /// cached list.
    pub async fn remove(&mut self, id: PaymentTermsId) -> AppResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.items.retain(|t| t.id != id);
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::PaymentTerms,
                    ChangeKind::Deleted,
                    Uuid::from(id),
                ));
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    fn capture(&mut self, e: ApiError) -> ApiError {
        self.error = Some(e.user_message());
        error!(error = %e, "Payment terms store operation failed");
        e
    }
}

//! Chart of accounts store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use ledgerdesk_client::export::{ExportFormat, save_export};
use ledgerdesk_client::services::accounts::{
    AccountsService, CreateAccountInput, UpdateAccountInput,
};
use ledgerdesk_client::transport::Transport;
use ledgerdesk_core::account::{Account, AccountFilter};
use ledgerdesk_core::bulk::{BulkError, BulkOutcome, BulkResponse, ItemFailure, remove_succeeded};
use ledgerdesk_core::events::{ChangeEvent, ChangeKind, EntityKind, EventBus};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_shared::types::AccountId;
use ledgerdesk_shared::{ApiError, AppResult};

/// In-memory mirror of the account list plus its fetch/mutation state.
pub struct AccountsStore<T> {
    service: AccountsService<T>,
    bus: Arc<EventBus>,
    items: Vec<Account>,
    loading: bool,
    error: Option<String>,
    last_fingerprint: Option<String>,
}

impl<T: Transport> AccountsStore<T> {
    /// Creates a store over the given transport and event bus.
    #[must_use]
    pub fn new(transport: Arc<T>, bus: Arc<EventBus>) -> Self {
        Self {
            service: AccountsService::new(transport),
            bus,
            items: Vec::new(),
            loading: false,
            error: None,
            last_fingerprint: None,
        }
    }

    /// The cached account list.
    #[must_use]
    pub fn items(&self) -> &[Account] {
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

    /// Refreshes the list for `filter`.
    ///
    /// If the filter fingerprint matches the last issued request, no
    /// request is made and `Ok(false)` is returned. Returns `Ok(true)`
    /// after a fetch.
    pub async fn refresh(&mut self, filter: &AccountFilter) -> AppResult<bool> {
        let fingerprint = filter.fingerprint();
        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return Ok(false);
        }
        self.load(filter, fingerprint).await?;
        Ok(true)
    }

    /// Refreshes the list unconditionally, bypassing the fingerprint
    /// check.
    pub async fn force_refresh(&mut self, filter: &AccountFilter) -> AppResult<()> {
        let fingerprint = filter.fingerprint();
        self.load(filter, fingerprint).await
    }

    async fn load(&mut self, filter: &AccountFilter, fingerprint: String) -> AppResult<()> {
        self.loading = true;
        let result = self.service.list(filter).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.items = page.data;
                // Only a confirmed response claims the fingerprint, so a
                // failed fetch can be re-triggered with the same filter.
                self.last_fingerprint = Some(fingerprint);
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Creates an account and appends it to the cached list.
    pub async fn create(&mut self, input: &CreateAccountInput) -> AppResult<Account> {
        match self.service.create(input).await {
            Ok(account) => {
                self.items.push(account.clone());
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::Account,
                    ChangeKind::Created,
                    Uuid::from(account.id),
                ));
                Ok(account)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Updates an account and replaces exactly the matching cached
    /// record.
    pub async fn update(&mut self, id: AccountId, input: &UpdateAccountInput) -> AppResult<Account> {
        match self.service.update(id, input).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|a| a.id == id) {
                    *slot = updated.clone();
                }
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::Account,
                    ChangeKind::Updated,
                    Uuid::from(id),
                ));
                Ok(updated)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Flips the active flag of the cached record with `id`.
    pub async fn toggle_active(&mut self, id: AccountId) -> AppResult<Account> {
        let is_active = match self.items.iter().find(|a| a.id == id) {
            Some(account) => account.is_active,
            None => {
                return Err(self.capture(ApiError::NotFound(format!(
                    "account {id} is not in the local list"
                ))));
            }
        };

        let input = UpdateAccountInput {
            is_active: Some(!is_active),
            ..Default::default()
        };
        self.update(id, &input).await
    }

    /// Deletes a single account and removes it from the cached list.
    pub async fn remove(&mut self, id: AccountId) -> AppResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.items.retain(|a| a.id != id);
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::Account,
                    ChangeKind::Deleted,
                    Uuid::from(id),
                ));
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Deletes the selected accounts in one batched request.
    ///
    /// Unless `force` is set, the selection is pre-validated server-side
    /// first; records with blockers become local failures and are never
    /// submitted. The cached list drops exactly the records the server
    /// confirms deleted, one `Deleted` event is emitted per confirmed
    /// record, and the reconciled outcome carries the counts to surface.
    pub async fn bulk_delete(
        &mut self,
        ids: &[AccountId],
        reason: &str,
        force: bool,
    ) -> AppResult<BulkOutcome> {
        if ids.is_empty() {
            return Err(self.capture(BulkError::EmptySelection.into()));
        }

        let mut local_failures: Vec<ItemFailure> = Vec::new();
        let mut to_submit: Vec<AccountId> = Vec::new();

        if force {
            to_submit = ids.to_vec();
        } else {
            let verdicts = match self.service.validate_deletion(ids).await {
                Ok(verdicts) => verdicts,
                Err(e) => return Err(self.capture(e)),
            };
            let blocked: HashMap<Uuid, String> = verdicts
                .iter()
                .filter(|v| !v.feasible)
                .map(|v| {
                    let reason_text = if v.blockers.is_empty() {
                        "No se puede eliminar.".to_string()
                    } else {
                        v.blockers_text()
                    };
                    (v.id, reason_text)
                })
                .collect();

            for &id in ids {
                match blocked.get(&Uuid::from(id)) {
                    Some(reason_text) => local_failures.push(ItemFailure {
                        id: Uuid::from(id),
                        reason: reason_text.clone(),
                    }),
                    // Unvalidated records pass through; the server decides.
                    None => to_submit.push(id),
                }
            }
        }

        let requested: Vec<Uuid> = ids.iter().map(|&id| Uuid::from(id)).collect();
        let outcome = if to_submit.is_empty() {
            BulkOutcome::reconcile(&requested, local_failures, &BulkResponse::default())
        } else {
            let response = match self.service.bulk_delete(&to_submit, reason, force).await {
                Ok(response) => response,
                Err(e) => return Err(self.capture(e)),
            };
            BulkOutcome::reconcile(&requested, local_failures, &response)
        };

        remove_succeeded(&mut self.items, &outcome, |a| Uuid::from(a.id));
        for &id in outcome.succeeded() {
            self.bus
                .emit(&ChangeEvent::new(EntityKind::Account, ChangeKind::Deleted, id));
        }

        info!(summary = %outcome.summary(), "Bulk account deletion reconciled");
        self.error = None;
        Ok(outcome)
    }

    /// Downloads the account list export and writes it to `path`.
    pub async fn export_to_file(
        &self,
        format: ExportFormat,
        path: impl AsRef<Path>,
    ) -> AppResult<usize> {
        let blob = self.service.export(format).await?;
        save_export(&blob, path).await
    }

    fn capture(&mut self, e: ApiError) -> ApiError {
        self.error = Some(e.user_message());
        error!(error = %e, "Accounts store operation failed");
        e
    }
}

//! Journal entry store with bulk state transitions.

use std::path::Path;
use std::sync::Arc;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use ledgerdesk_client::export::{ExportFormat, save_export};
use ledgerdesk_client::services::journal_entries::{
    CreateJournalEntryInput, JournalEntriesService, UpdateJournalEntryInput,
};
use ledgerdesk_client::transport::Transport;
use ledgerdesk_core::bulk::{
    BulkAction, BulkError, BulkOutcome, BulkResponse, ItemFailure, ValidationVerdict,
    remove_succeeded, update_succeeded,
};
use ledgerdesk_core::events::{ChangeEvent, ChangeKind, EntityKind, EventBus};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_core::journal::{EntryWorkflow, JournalEntry, JournalEntryFilter};
use ledgerdesk_shared::types::JournalEntryId;
use ledgerdesk_shared::{ApiError, AppResult};

/// In-memory mirror of the journal entry list plus its fetch/mutation
/// state and the bulk transition orchestrator.
pub struct JournalEntriesStore<T> {
    service: JournalEntriesService<T>,
    bus: Arc<EventBus>,
    items: Vec<JournalEntry>,
    loading: bool,
    error: Option<String>,
    last_fingerprint: Option<String>,
}

impl<T: Transport> JournalEntriesStore<T> {
    /// Creates a store over the given transport and event bus.
    #[must_use]
    pub fn new(transport: Arc<T>, bus: Arc<EventBus>) -> Self {
        Self {
            service: JournalEntriesService::new(transport),
            bus,
            items: Vec::new(),
            loading: false,
            error: None,
            last_fingerprint: None,
        }
    }

    /// The cached entry list.
    #[must_use]
    pub fn items(&self) -> &[JournalEntry] {
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
    pub async fn refresh(&mut self, filter: &JournalEntryFilter) -> AppResult<bool> {
        let fingerprint = filter.fingerprint();
        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return Ok(false);
        }
        self.load(filter, fingerprint).await?;
        Ok(true)
    }

    /// Refreshes the list unconditionally.
    pub async fn force_refresh(&mut self, filter: &JournalEntryFilter) -> AppResult<()> {
        let fingerprint = filter.fingerprint();
        self.load(filter, fingerprint).await
    }

    async fn load(&mut self, filter: &JournalEntryFilter, fingerprint: String) -> AppResult<()> {
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

    /// Creates a draft entry and appends it to the cached list.
    pub async fn create(&mut self, input: &CreateJournalEntryInput) -> AppResult<JournalEntry> {
        match self.service.create(input).await {
            Ok(entry) => {
                self.items.push(entry.clone());
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::JournalEntry,
                    ChangeKind::Created,
                    Uuid::from(entry.id),
                ));
                Ok(entry)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Updates a draft entry and replaces exactly the matching cached
    /// record.
    pub async fn update(
        &mut self,
        id: JournalEntryId,
        input: &UpdateJournalEntryInput,
    ) -> AppResult<JournalEntry> {
        match self.service.update(id, input).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|e| e.id == id) {
                    *slot = updated.clone();
                }
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::JournalEntry,
                    ChangeKind::Updated,
                    Uuid::from(id),
                ));
                Ok(updated)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Asks the server whether `action` applies to the selection. Pure
    /// passthrough with error capture.
    pub async fn validate(
        &mut self,
        action: BulkAction,
        ids: &[JournalEntryId],
    ) -> AppResult<Vec<ValidationVerdict>> {
        match self.service.validate(action, ids).await {
            Ok(verdicts) => Ok(verdicts),
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Applies `action` to the selection in one batched request and
    /// reconciles the cached list.
    ///
    /// Unless `force` is set, cached records are pre-checked against the
    /// feasibility table; infeasible records become local failures and
    /// are never submitted (records missing from the cache pass through
    /// for the server to decide). Removal actions drop exactly the
    /// confirmed subset, transitions set its target status; one event is
    /// emitted per confirmed record, strictly after the response.
    pub async fn execute_bulk(
        &mut self,
        action: BulkAction,
        ids: &[JournalEntryId],
        reason: &str,
        force: bool,
    ) -> AppResult<BulkOutcome> {
        if ids.is_empty() {
            return Err(self.capture(BulkError::EmptySelection.into()));
        }
        if let Err(e) = EntryWorkflow::check_reason(action, reason) {
            return Err(self.capture(e.into()));
        }

        let mut local_failures: Vec<ItemFailure> = Vec::new();
        let mut to_submit: Vec<JournalEntryId> = Vec::new();

        if force {
            to_submit = ids.to_vec();
        } else {
            for &id in ids {
                match self.items.iter().find(|e| e.id == id) {
                    Some(entry) => match EntryWorkflow::check(action, entry.status) {
                        Ok(_) => to_submit.push(id),
                        Err(err) => local_failures.push(ItemFailure {
                            id: Uuid::from(id),
                            reason: ApiError::from(err).user_message(),
                        }),
                    },
                    // Not cached locally: let the server decide.
                    None => to_submit.push(id),
                }
            }
        }

        let requested: Vec<Uuid> = ids.iter().map(|&id| Uuid::from(id)).collect();
        let outcome = if to_submit.is_empty() {
            BulkOutcome::reconcile(&requested, local_failures, &BulkResponse::default())
        } else {
            let response = match self.service.execute(action, &to_submit, reason, force).await {
                Ok(response) => response,
                Err(e) => return Err(self.capture(e)),
            };
            BulkOutcome::reconcile(&requested, local_failures, &response)
        };

        if action.is_removal() {
            remove_succeeded(&mut self.items, &outcome, |e| Uuid::from(e.id));
            for &id in outcome.succeeded() {
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::JournalEntry,
                    ChangeKind::Deleted,
                    id,
                ));
            }
        } else if let Some(target) = EntryWorkflow::target_status(action) {
            update_succeeded(
                &mut self.items,
                &outcome,
                |e| Uuid::from(e.id),
                |e| e.status = target,
            );
            for &id in outcome.succeeded() {
                self.bus.emit(
                    &ChangeEvent::new(EntityKind::JournalEntry, ChangeKind::StatusChanged, id)
                        .with_payload(json!({ "status": target })),
                );
            }
        }

        info!(%action, summary = %outcome.summary(), "Bulk journal entry operation reconciled");
        self.error = None;
        Ok(outcome)
    }

    /// Approves the selected draft entries.
    pub async fn approve(&mut self, ids: &[JournalEntryId]) -> AppResult<BulkOutcome> {
        self.execute_bulk(BulkAction::Approve, ids, "", false).await
    }

    /// Posts the selected approved entries.
    pub async fn post(&mut self, ids: &[JournalEntryId]) -> AppResult<BulkOutcome> {
        self.execute_bulk(BulkAction::Post, ids, "", false).await
    }

    /// Cancels the selected entries. A reason is required.
    pub async fn cancel(&mut self, ids: &[JournalEntryId], reason: &str) -> AppResult<BulkOutcome> {
        self.execute_bulk(BulkAction::Cancel, ids, reason, false).await
    }

    /// Reverses the selected posted entries. A reason is required.
    pub async fn reverse(&mut self, ids: &[JournalEntryId], reason: &str) -> AppResult<BulkOutcome> {
        self.execute_bulk(BulkAction::Reverse, ids, reason, false).await
    }

    /// Sends the selected entries back to draft.
    pub async fn reset_to_draft(&mut self, ids: &[JournalEntryId]) -> AppResult<BulkOutcome> {
        self.execute_bulk(BulkAction::ResetToDraft, ids, "", false).await
    }

    /// Deletes the selected entries.
    pub async fn bulk_delete(
        &mut self,
        ids: &[JournalEntryId],
        reason: &str,
    ) -> AppResult<BulkOutcome> {
        self.execute_bulk(BulkAction::Delete, ids, reason, false).await
    }

    /// Downloads the journal entry export and writes it to `path`.
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
        error!(error = %e, "Journal entries store operation failed");
        e
    }
}

//! Cost center store.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use ledgerdesk_client::export::{ExportFormat, save_export};
use ledgerdesk_client::services::cost_centers::{
    CostCentersService, CreateCostCenterInput, UpdateCostCenterInput,
};
use ledgerdesk_client::transport::Transport;
use ledgerdesk_core::bulk::{BulkError, BulkOutcome, BulkResponse, ItemFailure, remove_succeeded};
use ledgerdesk_core::cost_center::{CostCenter, CostCenterFilter, CostCenterNode};
use ledgerdesk_core::events::{ChangeEvent, ChangeKind, EntityKind, EventBus};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_shared::types::CostCenterId;
use ledgerdesk_shared::{ApiError, AppResult};

/// In-memory mirror of the cost center list plus its fetch/mutation
/// state.
pub struct CostCentersStore<T> {
    service: CostCentersService<T>,
    bus: Arc<EventBus>,
    items: Vec<CostCenter>,
    loading: bool,
    error: Option<String>,
    last_fingerprint: Option<String>,
}

impl<T: Transport> CostCentersStore<T> {
    /// Creates a store over the given transport and event bus.
    #[must_use]
    pub fn new(transport: Arc<T>, bus: Arc<EventBus>) -> Self {
        Self {
            service: CostCentersService::new(transport),
            bus,
            items: Vec::new(),
            loading: false,
            error: None,
            last_fingerprint: None,
        }
    }

    /// The cached cost center list.
    #[must_use]
    pub fn items(&self) -> &[CostCenter] {
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
    pub async fn refresh(&mut self, filter: &CostCenterFilter) -> AppResult<bool> {
        let fingerprint = filter.fingerprint();
        if self.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            return Ok(false);
        }
        self.load(filter, fingerprint).await?;
        Ok(true)
    }

    /// Refreshes the list unconditionally.
    pub async fn force_refresh(&mut self, filter: &CostCenterFilter) -> AppResult<()> {
        let fingerprint = filter.fingerprint();
        self.load(filter, fingerprint).await
    }

    async fn load(&mut self, filter: &CostCenterFilter, fingerprint: String) -> AppResult<()> {
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

    /// Fetches the cost center hierarchy. Stateless passthrough.
    pub async fn tree(&mut self) -> AppResult<Vec<CostCenterNode>> {
        match self.service.tree().await {
            Ok(nodes) => Ok(nodes),
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Creates a cost center and appends it to the cached list.
    pub async fn create(&mut self, input: &CreateCostCenterInput) -> AppResult<CostCenter> {
        match self.service.create(input).await {
            Ok(cost_center) => {
                self.items.push(cost_center.clone());
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::CostCenter,
                    ChangeKind::Created,
                    Uuid::from(cost_center.id),
                ));
                Ok(cost_center)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Updates a cost center and replaces exactly the matching cached
    /// record.
    pub async fn update(
        &mut self,
        id: CostCenterId,
        input: &UpdateCostCenterInput,
    ) -> AppResult<CostCenter> {
        match self.service.update(id, input).await {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|c| c.id == id) {
                    *slot = updated.clone();
                }
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::CostCenter,
                    ChangeKind::Updated,
                    Uuid::from(id),
                ));
                Ok(updated)
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Flips the active flag of the cached record with `id`.
    pub async fn toggle_active(&mut self, id: CostCenterId) -> AppResult<CostCenter> {
        let is_active = match self.items.iter().find(|c| c.id == id) {
            Some(cost_center) => cost_center.is_active,
            None => {
                return Err(self.capture(ApiError::NotFound(format!(
                    "cost center {id} is not in the local list"
                ))));
            }
        };

        let input = UpdateCostCenterInput {
            is_active: Some(!is_active),
            ..Default::default()
        };
        self.update(id, &input).await
    }

    /// Deletes a single cost center and removes it from the cached list.
    pub async fn remove(&mut self, id: CostCenterId) -> AppResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                self.items.retain(|c| c.id != id);
                self.error = None;
                self.bus.emit(&ChangeEvent::new(
                    EntityKind::CostCenter,
                    ChangeKind::Deleted,
                    Uuid::from(id),
                ));
                Ok(())
            }
            Err(e) => Err(self.capture(e)),
        }
    }

    /// Deletes the selected cost centers in one batched request.
    ///
    /// Mirrors the account flow: optional server-side pre-validation,
    /// blocked records become local failures, the cached list drops
    /// exactly the confirmed subset, one event per confirmed record.
    pub async fn bulk_delete(
        &mut self,
        ids: &[CostCenterId],
        reason: &str,
        force: bool,
    ) -> AppResult<BulkOutcome> {
        if ids.is_empty() {
            return Err(self.capture(BulkError::EmptySelection.into()));
        }

        let mut local_failures: Vec<ItemFailure> = Vec::new();
        let mut to_submit: Vec<CostCenterId> = Vec::new();

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

        remove_succeeded(&mut self.items, &outcome, |c| Uuid::from(c.id));
        for &id in outcome.succeeded() {
            self.bus.emit(&ChangeEvent::new(
                EntityKind::CostCenter,
                ChangeKind::Deleted,
                id,
            ));
        }

        info!(summary = %outcome.summary(), "Bulk cost center deletion reconciled");
        self.error = None;
        Ok(outcome)
    }

    /// Downloads the cost center export and writes it to `path`.
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
        error!(error = %e, "Cost centers store operation failed");
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubTransport;
    use chrono::Utc;
    use serde_json::{Value, json};

    fn cost_center(code: &str) -> CostCenter {
        CostCenter {
            id: CostCenterId::new(),
            code: code.to_string(),
            name: format!("Centro {code}"),
            description: None,
            parent_id: None,
            level: 1,
            is_active: true,
            responsible: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn page_json(items: &[CostCenter]) -> Value {
        json!({
            "data": items,
            "meta": { "skip": 0, "limit": 50, "total": items.len() }
        })
    }

    async fn loaded_store(
        items: &[CostCenter],
    ) -> (CostCentersStore<StubTransport>, Arc<StubTransport>) {
        let transport = Arc::new(StubTransport::new());
        transport.push_ok(page_json(items));
        let mut store = CostCentersStore::new(Arc::clone(&transport), Arc::new(EventBus::new()));
        store.refresh(&CostCenterFilter::new()).await.unwrap();
        (store, transport)
    }

    #[tokio::test]
    async fn test_validate_then_execute_issues_two_requests() {
        let items = [cost_center("CC-01"), cost_center("CC-02")];
        let (mut store, transport) = loaded_store(&items).await;
        let ids: Vec<CostCenterId> = items.iter().map(|c| c.id).collect();

        transport.push_ok(json!(ids
            .iter()
            .map(|id| json!({ "id": id, "feasible": true, "blockers": [], "warnings": [] }))
            .collect::<Vec<_>>()));
        transport.push_ok(json!({ "processed": [ids[0], ids[1]], "failed": [] }));

        let outcome = store.bulk_delete(&ids, "reorganización", false).await.unwrap();

        assert!(outcome.is_complete_success());
        assert!(store.items().is_empty());
        let requests = transport.requests();
        assert_eq!(
            &requests[1..],
            &[
                (
                    "POST".to_string(),
                    "/cost-centers/validate-deletion".to_string()
                ),
                ("POST".to_string(), "/cost-centers/bulk-delete".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_refresh_dedup_and_force_refresh() {
        let items = [cost_center("CC-01")];
        let (mut store, transport) = loaded_store(&items).await;
        let filter = CostCenterFilter::new();

        assert!(!store.refresh(&filter).await.unwrap());
        assert_eq!(transport.request_count(), 1);

        transport.push_ok(page_json(&items));
        store.force_refresh(&filter).await.unwrap();
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_toggle_active_roundtrip() {
        let items = [cost_center("CC-01")];
        let (mut store, transport) = loaded_store(&items).await;

        let mut toggled = items[0].clone();
        toggled.is_active = false;
        transport.push_ok(serde_json::to_value(&toggled).unwrap());

        let updated = store.toggle_active(items[0].id).await.unwrap();

        assert!(!updated.is_active);
        assert!(!store.items()[0].is_active);
    }
}

//! Journal entry service.

use bytes::Bytes;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use ledgerdesk_core::bulk::{BulkAction, BulkRequest, BulkResponse, ValidationVerdict};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_core::journal::{JournalEntry, JournalEntryFilter};
use ledgerdesk_shared::AppResult;
use ledgerdesk_shared::types::{AccountId, CostCenterId, JournalEntryId, PageResponse};

use crate::export::ExportFormat;
use crate::transport::Transport;

use super::{check_input, decode, encode};

/// A line of a journal entry being created or replaced.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct JournalLineInput {
    /// Account the line posts to.
    pub account_id: AccountId,
    /// Cost center the line is attributed to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center_id: Option<CostCenterId>,
    /// Debit amount (0 if credit).
    #[serde(with = "rust_decimal::serde::str")]
    pub debit: Decimal,
    /// Credit amount (0 if debit).
    #[serde(with = "rust_decimal::serde::str")]
    pub credit: Decimal,
    /// Optional memo.
    #[validate(length(max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Request body for creating a journal entry.
///
/// Only the shape is checked here; balance validation is the backend's
/// job.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateJournalEntryInput {
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Entry description.
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    /// Entry lines; double-entry needs at least two.
    #[validate(length(min = 2), nested)]
    pub lines: Vec<JournalLineInput>,
}

/// Request body for updating a draft journal entry. Absent fields are
/// left unchanged.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateJournalEntryInput {
    /// Accounting date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
    /// Entry description.
    #[validate(length(min = 1, max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement lines.
    #[validate(length(min = 2), nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<JournalLineInput>>,
}

/// Typed requests for the `/journal-entries` endpoints.
pub struct JournalEntriesService<T> {
    transport: Arc<T>,
}

impl<T: Transport> JournalEntriesService<T> {
    /// Creates a service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Lists journal entries matching the filter.
    pub async fn list(
        &self,
        filter: &JournalEntryFilter,
    ) -> AppResult<PageResponse<JournalEntry>> {
        let value = self
            .transport
            .get("/journal-entries", &filter.query_pairs())
            .await?;
        decode(value)
    }

    /// Fetches a single journal entry with its lines.
    pub async fn get(&self, id: JournalEntryId) -> AppResult<JournalEntry> {
        let value = self
            .transport
            .get(&format!("/journal-entries/{id}"), &[])
            .await?;
        decode(value)
    }

    /// Creates a draft journal entry.
    pub async fn create(&self, input: &CreateJournalEntryInput) -> AppResult<JournalEntry> {
        check_input(input)?;
        let value = self
            .transport
            .post("/journal-entries", encode(input)?)
            .await?;
        let entry: JournalEntry = decode(value)?;
        info!(entry_id = %entry.id, number = %entry.number, "Journal entry created");
        Ok(entry)
    }

    /// Updates a draft journal entry.
    pub async fn update(
        &self,
        id: JournalEntryId,
        input: &UpdateJournalEntryInput,
    ) -> AppResult<JournalEntry> {
        check_input(input)?;
        let value = self
            .transport
            .put(&format!("/journal-entries/{id}"), encode(input)?)
            .await?;
        let entry: JournalEntry = decode(value)?;
        info!(entry_id = %id, "Journal entry updated");
        Ok(entry)
    }

    /// Deletes a single journal entry.
    pub async fn delete(&self, id: JournalEntryId) -> AppResult<()> {
        self.transport
            .delete(&format!("/journal-entries/{id}"))
            .await?;
        info!(entry_id = %id, "Journal entry deleted");
        Ok(())
    }

    /// Asks the server whether `action` can be applied to the given
    /// entries. Pure passthrough with reshaping.
    pub async fn validate(
        &self,
        action: BulkAction,
        ids: &[JournalEntryId],
    ) -> AppResult<Vec<ValidationVerdict>> {
        let value = self
            .transport
            .post(
                "/journal-entries/bulk/validate",
                json!({ "action": action, "ids": ids }),
            )
            .await?;
        decode(value)
    }

    /// Applies `action` to the given entries in one batched request.
    ///
    /// Returns the raw per-record result; reconciliation against the
    /// requested set happens in the store layer.
    pub async fn execute(
        &self,
        action: BulkAction,
        ids: &[JournalEntryId],
        reason: &str,
        force: bool,
    ) -> AppResult<BulkResponse> {
        let request = BulkRequest {
            ids: ids.iter().map(|id| Uuid::from(*id)).collect(),
            reason: reason.to_string(),
            force,
        };
        let value = self
            .transport
            .post(
                &format!("/journal-entries/bulk/{}", action.as_str()),
                encode(&request)?,
            )
            .await?;
        info!(%action, count = ids.len(), "Bulk journal entry operation executed");
        decode(value)
    }

    /// Fetches the journal entry list as a server-generated export blob.
    pub async fn export(&self, format: ExportFormat) -> AppResult<Bytes> {
        self.transport
            .get_bytes(
                "/journal-entries/export",
                &[("format".to_string(), format.as_str().to_string())],
            )
            .await
    }
}

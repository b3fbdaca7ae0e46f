//! Chart of accounts service.

use bytes::Bytes;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use ledgerdesk_core::account::{Account, AccountFilter, AccountNode, AccountType};
use ledgerdesk_core::bulk::{BulkRequest, BulkResponse, ValidationVerdict};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_shared::AppResult;
use ledgerdesk_shared::types::{AccountId, PageResponse};

use crate::export::ExportFormat;
use crate::transport::Transport;

use super::{check_input, decode, encode};

/// Request body for creating an account.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateAccountInput {
    /// Account code (must be unique).
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    /// Account name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Account description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Parent account for hierarchical structure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<AccountId>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether direct posting is allowed.
    pub allow_posting: bool,
}

impl CreateAccountInput {
    /// Creates an input with the required fields; the rest default to an
    /// active, postable root account.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            account_type,
            parent_id: None,
            is_active: true,
            allow_posting: true,
        }
    }
}

/// Request body for updating an account. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateAccountInput {
    /// Account code.
    #[validate(length(min = 1, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Account name.
    #[validate(length(min = 1, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Account description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<AccountId>,
    /// Whether the account is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Whether direct posting is allowed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_posting: Option<bool>,
}

/// Typed requests for the `/accounts` endpoints.
pub struct AccountsService<T> {
    transport: Arc<T>,
}

impl<T: Transport> AccountsService<T> {
    /// Creates a service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Lists accounts matching the filter.
    pub async fn list(&self, filter: &AccountFilter) -> AppResult<PageResponse<Account>> {
        let value = self.transport.get("/accounts", &filter.query_pairs()).await?;
        decode(value)
    }

    /// Fetches a single account.
    pub async fn get(&self, id: AccountId) -> AppResult<Account> {
        let value = self.transport.get(&format!("/accounts/{id}"), &[]).await?;
        decode(value)
    }

    /// Creates an account.
    pub async fn create(&self, input: &CreateAccountInput) -> AppResult<Account> {
        check_input(input)?;
        let value = self.transport.post("/accounts", encode(input)?).await?;
        let account: Account = decode(value)?;
        info!(account_id = %account.id, code = %account.code, "Account created");
        Ok(account)
    }

    /// Updates an account.
    pub async fn update(&self, id: AccountId, input: &UpdateAccountInput) -> AppResult<Account> {
        check_input(input)?;
        let value = self
            .transport
            .put(&format!("/accounts/{id}"), encode(input)?)
            .await?;
        let account: Account = decode(value)?;
        info!(account_id = %id, "Account updated");
        Ok(account)
    }

    /// Deletes a single account.
    pub async fn delete(&self, id: AccountId) -> AppResult<()> {
        self.transport.delete(&format!("/accounts/{id}")).await?;
        info!(account_id = %id, "Account deleted");
        Ok(())
    }

    /// Fetches the full account hierarchy.
    pub async fn tree(&self) -> AppResult<Vec<AccountNode>> {
        let value = self.transport.get("/accounts/tree", &[]).await?;
        decode(value)
    }

    /// Asks the server whether the given accounts can be deleted.
    pub async fn validate_deletion(
        &self,
        ids: &[AccountId],
    ) -> AppResult<Vec<ValidationVerdict>> {
        let value = self
            .transport
            .post("/accounts/validate-deletion", json!({ "ids": ids }))
            .await?;
        decode(value)
    }

    /// Deletes the given accounts in one batched request.
    ///
    /// Returns the raw per-record result; reconciliation against the
    /// requested set happens in the store layer.
    pub async fn bulk_delete(
        &self,
        ids: &[AccountId],
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
            .post("/accounts/bulk-delete", encode(&request)?)
            .await?;
        decode(value)
    }

    /// Fetches the account list as a server-generated export blob.
    pub async fn export(&self, format: ExportFormat) -> AppResult<Bytes> {
        self.transport
            .get_bytes(
                "/accounts/export",
                &[("format".to_string(), format.as_str().to_string())],
            )
            .await
    }
}

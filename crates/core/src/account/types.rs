//! Chart of accounts entities and filters.
//!
//! Accounts are server-owned records; the client never mutates them except
//! through full round-trips. `balance` and `level` are denormalized display
//! fields computed by the backend.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use ledgerdesk_shared::types::{AccountId, PageSlice};

use crate::filter::QueryFilter;

/// Account classification in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
    /// Revenue account.
    Revenue,
    /// Expense account.
    Expense,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Parses a type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chart of accounts entry as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Account code (unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account description.
    pub description: Option<String>,
    /// Account type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Parent account for hierarchical structure.
    pub parent_id: Option<AccountId>,
    /// Depth in the account hierarchy (denormalized).
    pub level: u32,
    /// Current balance (denormalized).
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether direct posting is allowed.
    pub allow_posting: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A node in the account tree as returned by `/accounts/tree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNode {
    /// The account at this node.
    #[serde(flatten)]
    pub account: Account,
    /// Child accounts.
    #[serde(default)]
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    /// Returns the number of accounts in this subtree, including self.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(AccountNode::subtree_len).sum::<usize>()
    }
}

/// Filter parameters for listing accounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountFilter {
    /// Pagination window.
    #[serde(default)]
    pub page: PageSlice,
    /// Free-text search over code and name.
    pub search: Option<String>,
    /// Filter by account type.
    pub account_type: Option<AccountType>,
    /// Filter by active status.
    pub is_active: Option<bool>,
    /// Filter by parent account.
    pub parent_id: Option<AccountId>,
}

impl AccountFilter {
    /// Creates a new empty filter with default pagination.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the account type filter.
    #[must_use]
    pub const fn with_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    /// Sets the active status filter.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Sets the pagination window.
    #[must_use]
    pub const fn with_page(mut self, page: PageSlice) -> Self {
        self.page = page;
        self
    }
}

impl QueryFilter for AccountFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.page.query_pairs();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(account_type) = self.account_type {
            pairs.push(("type".to_string(), account_type.as_str().to_string()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("active".to_string(), is_active.to_string()));
        }
        if let Some(parent_id) = self.parent_id {
            pairs.push(("parent_id".to_string(), parent_id.to_string()));
        }
        pairs
    }
}

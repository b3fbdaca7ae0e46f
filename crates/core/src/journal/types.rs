//! Journal entry entities and filters.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use ledgerdesk_shared::types::{AccountId, CostCenterId, JournalEntryId, JournalLineId, PageSlice};

use crate::filter::QueryFilter;

/// Journal entry status in the posting workflow.
///
/// Entries progress through these states from creation to posting. The
/// valid transitions are:
/// - draft → approved (approve)
/// - approved → posted (post)
/// - draft, approved → cancelled (cancel)
/// - posted → reversed (reverse)
/// - approved, cancelled → draft (reset-to-draft)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been approved and is ready for posting.
    Approved,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been cancelled.
    Cancelled,
    /// Entry has been reversed by a counter-entry (immutable).
    Reversed,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
            Self::Reversed => "reversed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "approved" => Some(Self::Approved),
            "posted" => Some(Self::Posted),
            "cancelled" => Some(Self::Cancelled),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Returns true if the entry can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reversed)
    }

    /// All statuses, for exhaustive table checks.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [
            Self::Draft,
            Self::Approved,
            Self::Posted,
            Self::Cancelled,
            Self::Reversed,
        ]
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single debit or credit line of a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Line ID.
    pub id: JournalLineId,
    /// Account the line posts to.
    pub account_id: AccountId,
    /// Cost center the line is attributed to, if any.
    pub cost_center_id: Option<CostCenterId>,
    /// Debit amount (0 if credit).
    #[serde(with = "rust_decimal::serde::str")]
    pub debit: Decimal,
    /// Credit amount (0 if debit).
    #[serde(with = "rust_decimal::serde::str")]
    pub credit: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}

/// A journal entry as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Entry ID.
    pub id: JournalEntryId,
    /// Entry number assigned by the backend.
    pub number: String,
    /// Accounting date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Workflow status.
    pub status: EntryStatus,
    /// Sum of debit lines (denormalized).
    #[serde(with = "rust_decimal::serde::str")]
    pub total_debit: Decimal,
    /// Sum of credit lines (denormalized).
    #[serde(with = "rust_decimal::serde::str")]
    pub total_credit: Decimal,
    /// Entry lines.
    #[serde(default)]
    pub lines: Vec<JournalLine>,
    /// The entry this one reverses, if any.
    pub reversal_of: Option<JournalEntryId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Filter parameters for listing journal entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntryFilter {
    /// Pagination window.
    #[serde(default)]
    pub page: PageSlice,
    /// Free-text search over number and description.
    pub search: Option<String>,
    /// Filter by workflow status.
    pub status: Option<EntryStatus>,
    /// Start date filter (inclusive).
    pub date_from: Option<NaiveDate>,
    /// End date filter (inclusive).
    pub date_to: Option<NaiveDate>,
    /// Filter by account appearing in the entry lines.
    pub account_id: Option<AccountId>,
}

impl JournalEntryFilter {
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

    /// Sets the status filter.
    #[must_use]
    pub const fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the date range filter.
    #[must_use]
    pub const fn with_dates(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }
}

impl QueryFilter for JournalEntryFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.page.query_pairs();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("from".to_string(), from.to_string()));
        }
        if let Some(to) = self.date_to {
            pairs.push(("to".to_string(), to.to_string()));
        }
        if let Some(account_id) = self.account_id {
            pairs.push(("account_id".to_string(), account_id.to_string()));
        }
        pairs
    }
}

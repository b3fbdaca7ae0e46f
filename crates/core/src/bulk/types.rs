//! Bulk operation request and response types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Action applied to every selected record in a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkAction {
    /// Delete the selected records.
    Delete,
    /// Approve draft journal entries.
    Approve,
    /// Post approved journal entries.
    Post,
    /// Cancel draft or approved journal entries.
    Cancel,
    /// Reverse posted journal entries.
    Reverse,
    /// Send approved or cancelled journal entries back to draft.
    ResetToDraft,
}

impl BulkAction {
    /// Returns the string representation of the action.
    ///
    /// Matches the path segment used by the bulk endpoints.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Post => "post",
            Self::Cancel => "cancel",
            Self::Reverse => "reverse",
            Self::ResetToDraft => "reset-to-draft",
        }
    }

    /// Parses an action from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "delete" => Some(Self::Delete),
            "approve" => Some(Self::Approve),
            "post" => Some(Self::Post),
            "cancel" => Some(Self::Cancel),
            "reverse" => Some(Self::Reverse),
            "reset-to-draft" => Some(Self::ResetToDraft),
            _ => None,
        }
    }

    /// Returns true if the action requires a non-blank reason.
    #[must_use]
    pub const fn requires_reason(&self) -> bool {
        matches!(self, Self::Cancel | Self::Reverse)
    }

    /// Returns true if the action removes records from the local list.
    #[must_use]
    pub const fn is_removal(&self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body for a bulk operation.
#[derive(Debug, Clone, Serialize)]
pub struct BulkRequest {
    /// Target record IDs.
    pub ids: Vec<Uuid>,
    /// Reason supplied by the user.
    pub reason: String,
    /// Skip server-side feasibility checks where permitted.
    pub force: bool,
}

/// A per-record failure reported by the server (or recorded locally).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// The record that failed.
    pub id: Uuid,
    /// Why it failed.
    pub reason: String,
}

/// Raw server response to a bulk operation.
///
/// The server reports which records it processed and which it rejected;
/// records it mentions in neither list are treated as failures during
/// reconciliation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkResponse {
    /// Records processed successfully.
    #[serde(default)]
    pub processed: Vec<Uuid>,
    /// Records rejected, with reasons.
    #[serde(default)]
    pub failed: Vec<ItemFailure>,
}

/// Per-record feasibility verdict from a validation endpoint.
///
/// Pure passthrough of the server's answer: blockers prevent the
/// operation, warnings do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    /// The record the verdict applies to.
    pub id: Uuid,
    /// Whether the operation can proceed for this record.
    pub feasible: bool,
    /// Reasons the operation is blocked.
    #[serde(default)]
    pub blockers: Vec<String>,
    /// Non-blocking warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationVerdict {
    /// Joins the blocking reasons into a single display string.
    #[must_use]
    pub fn blockers_text(&self) -> String {
        self.blockers.join("; ")
    }
}

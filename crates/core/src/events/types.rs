//! Change event types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The kind of resource an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Chart of accounts entry.
    Account,
    /// Cost center.
    CostCenter,
    /// Journal entry.
    JournalEntry,
    /// Payment terms definition.
    PaymentTerms,
}

impl EntityKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::CostCenter => "cost_center",
            Self::JournalEntry => "journal_entry",
            Self::PaymentTerms => "payment_terms",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of mutation an event reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A record was created.
    Created,
    /// A record was updated.
    Updated,
    /// A record was deleted.
    Deleted,
    /// A record changed workflow status.
    StatusChanged,
}

/// A fire-and-forget notification that a record changed on the server.
///
/// Emitted strictly after server confirmation, never optimistically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The kind of resource that changed.
    pub entity: EntityKind,
    /// The kind of change.
    pub kind: ChangeKind,
    /// The changed record.
    pub entity_id: Uuid,
    /// When the event was emitted.
    pub timestamp: DateTime<Utc>,
    /// Optional event payload (e.g. the new status).
    pub payload: Option<serde_json::Value>,
}

impl ChangeEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(entity: EntityKind, kind: ChangeKind, entity_id: Uuid) -> Self {
        Self {
            entity,
            kind,
            entity_id,
            timestamp: Utc::now(),
            payload: None,
        }
    }

    /// Attaches a payload to the event.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_construction() {
        let id = Uuid::new_v4();
        let event = ChangeEvent::new(EntityKind::Account, ChangeKind::Deleted, id);
        assert_eq!(event.entity, EntityKind::Account);
        assert_eq!(event.kind, ChangeKind::Deleted);
        assert_eq!(event.entity_id, id);
        assert!(event.payload.is_none());
    }

    #[test]
    fn test_event_with_payload() {
        let event = ChangeEvent::new(
            EntityKind::JournalEntry,
            ChangeKind::StatusChanged,
            Uuid::new_v4(),
        )
        .with_payload(json!({ "status": "posted" }));

        assert_eq!(event.payload.unwrap()["status"], "posted");
    }

    #[test]
    fn test_entity_kind_serde() {
        let json = serde_json::to_string(&EntityKind::CostCenter).unwrap();
        assert_eq!(json, "\"cost_center\"");
    }
}

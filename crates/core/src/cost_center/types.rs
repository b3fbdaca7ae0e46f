//! Cost center entities and filters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerdesk_shared::types::{CostCenterId, PageSlice};

use crate::filter::QueryFilter;

/// A cost center as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center ID.
    pub id: CostCenterId,
    /// Cost center code (unique).
    pub code: String,
    /// Cost center name.
    pub name: String,
    /// Cost center description.
    pub description: Option<String>,
    /// Parent cost center for hierarchical structure.
    pub parent_id: Option<CostCenterId>,
    /// Depth in the hierarchy (denormalized).
    pub level: u32,
    /// Whether the cost center is active.
    pub is_active: bool,
    /// Name of the person responsible, if assigned.
    pub responsible: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A node in the cost center tree as returned by `/cost-centers/tree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterNode {
    /// The cost center at this node.
    #[serde(flatten)]
    pub cost_center: CostCenter,
    /// Child cost centers.
    #[serde(default)]
    pub children: Vec<CostCenterNode>,
}

/// Filter parameters for listing cost centers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostCenterFilter {
    /// Pagination window.
    #[serde(default)]
    pub page: PageSlice,
    /// Free-text search over code and name.
    pub search: Option<String>,
    /// Filter by active status.
    pub is_active: Option<bool>,
    /// Filter by parent cost center.
    pub parent_id: Option<CostCenterId>,
}

impl CostCenterFilter {
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

    /// Sets the active status filter.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }
}

impl QueryFilter for CostCenterFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.page.query_pairs();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
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

//! Pagination types for list requests and responses.
//!
//! The backend paginates with `skip`/`limit` query parameters.

use serde::{Deserialize, Serialize};

/// Window into a server-side list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSlice {
    /// Number of records to skip.
    #[serde(default)]
    pub skip: u32,
    /// Maximum number of records to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    50
}

impl Default for PageSlice {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl PageSlice {
    /// Creates a new slice.
    #[must_use]
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Returns the slice as query parameters.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("skip".to_string(), self.skip.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// Pagination metadata returned alongside list data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Number of records skipped.
    pub skip: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of records across all pages.
    pub total: u64,
}

/// Response wrapper for paginated list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The records in the current window.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, skip: u32, limit: u32, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta { skip, limit, total },
        }
    }

    /// Returns true if records remain beyond this window.
    #[must_use]
    pub fn has_more(&self) -> bool {
        u64::from(self.meta.skip) + (self.data.len() as u64) < self.meta.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slice() {
        let slice = PageSlice::default();
        assert_eq!(slice.skip, 0);
        assert_eq!(slice.limit, 50);
    }

    #[test]
    fn test_query_pairs() {
        let slice = PageSlice::new(100, 25);
        assert_eq!(
            slice.query_pairs(),
            vec![
                ("skip".to_string(), "100".to_string()),
                ("limit".to_string(), "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_has_more() {
        let page = PageResponse::new(vec![1, 2, 3], 0, 3, 10);
        assert!(page.has_more());

        let last = PageResponse::new(vec![1, 2, 3], 7, 3, 10);
        assert!(!last.has_more());
    }

    #[test]
    fn test_empty_response() {
        let page: PageResponse<u32> = PageResponse::new(vec![], 0, 50, 0);
        assert!(!page.has_more());
    }

    #[test]
    fn test_slice_deserialize_defaults() {
        let slice: PageSlice = serde_json::from_str("{}").unwrap();
        assert_eq!(slice, PageSlice::default());
    }
}

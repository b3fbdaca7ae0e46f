//! Query filter abstraction for list endpoints.
//!
//! Filters serialize to query parameters and produce a canonical
//! fingerprint used to suppress duplicate fetches for identical
//! parameters.

/// A typed set of list-endpoint query parameters.
pub trait QueryFilter {
    /// Returns the filter as query parameters.
    ///
    /// Absent optional fields are omitted entirely; field order is fixed
    /// by the implementation.
    fn query_pairs(&self) -> Vec<(String, String)>;

    /// Canonical string identifying this filter.
    ///
    /// Two filters with the same parameters produce the same fingerprint.
    /// Not a cache key: the only use is equality comparison against the
    /// last issued request.
    fn fingerprint(&self) -> String {
        let pairs = self.query_pairs();
        let mut parts = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            parts.push(format!("{key}={value}"));
        }
        parts.join("&")
    }
}

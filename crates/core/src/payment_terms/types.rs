//! Payment terms entities and filters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerdesk_shared::types::{PageSlice, PaymentTermsId};

use crate::filter::QueryFilter;

/// A payment terms definition as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// Payment terms ID.
    pub id: PaymentTermsId,
    /// Payment terms code (unique).
    pub code: String,
    /// Payment terms name (e.g. "Net 30").
    pub name: String,
    /// Payment terms description.
    pub description: Option<String>,
    /// Days until the full amount is due.
    pub net_days: u32,
    /// Days within which the early-payment discount applies.
    pub discount_days: Option<u32>,
    /// Early-payment discount percentage.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub discount_percent: Option<Decimal>,
    /// Whether the payment terms are active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl PaymentTerms {
    /// Returns true if these terms carry an early-payment discount.
    #[must_use]
    pub fn has_early_discount(&self) -> bool {
        self.discount_days.is_some()
            && self.discount_percent.is_some_and(|p| p > Decimal::ZERO)
    }
}

/// Filter parameters for listing payment terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTermsFilter {
    /// Pagination window.
    #[serde(default)]
    pub page: PageSlice,
    /// Free-text search over code and name.
    pub search: Option<String>,
    /// Filter by active status.
    pub is_active: Option<bool>,
}

impl PaymentTermsFilter {
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

impl QueryFilter for PaymentTermsFilter {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.page.query_pairs();
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(is_active) = self.is_active {
            pairs.push(("active".to_string(), is_active.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_terms() -> PaymentTerms {
        PaymentTerms {
            id: PaymentTermsId::new(),
            code: "NET30".to_string(),
            name: "Net 30".to_string(),
            description: None,
            net_days: 30,
            discount_days: Some(10),
            discount_percent: Some(dec!(2.0)),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_early_discount() {
        let terms = sample_terms();
        assert!(terms.has_early_discount());

        let mut no_discount = sample_terms();
        no_discount.discount_percent = None;
        assert!(!no_discount.has_early_discount());

        let mut zero_discount = sample_terms();
        zero_discount.discount_percent = Some(Decimal::ZERO);
        assert!(!zero_discount.has_early_discount());
    }

    #[test]
    fn test_discount_percent_serialized_as_string() {
        let terms = sample_terms();
        let json = serde_json::to_value(&terms).unwrap();
        assert_eq!(json["discount_percent"], "2.0");

        let back: PaymentTerms = serde_json::from_value(json).unwrap();
        assert_eq!(back, terms);
    }

    #[test]
    fn test_filter_query_pairs() {
        let filter = PaymentTermsFilter::new().with_search("net").with_active(true);
        let pairs = filter.query_pairs();
        assert!(pairs.contains(&("search".to_string(), "net".to_string())));
        assert!(pairs.contains(&("active".to_string(), "true".to_string())));
    }
}

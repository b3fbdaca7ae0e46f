//! Payment terms service.

use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_core::payment_terms::{PaymentTerms, PaymentTermsFilter};
use ledgerdesk_shared::AppResult;
use ledgerdesk_shared::types::{PageResponse, PaymentTermsId};

use crate::transport::Transport;

use super::{check_input, decode, encode};

/// Request body for creating payment terms.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreatePaymentTermsInput {
    /// Payment terms code (must be unique).
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    /// Payment terms name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Payment terms description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Days until the full amount is due.
    #[validate(range(max = 730))]
    pub net_days: u32,
    /// Days within which the early-payment discount applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_days: Option<u32>,
    /// Early-payment discount percentage.
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
    /// Whether the payment terms are active.
    pub is_active: bool,
}

impl CreatePaymentTermsInput {
    /// Creates an input with the required fields.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, net_days: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            net_days,
            discount_days: None,
            discount_percent: None,
            is_active: true,
        }
    }
}

/// Request body for updating payment terms. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdatePaymentTermsInput {
    /// Payment terms code.
    #[validate(length(min = 1, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Payment terms name.
    #[validate(length(min = 1, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Payment terms description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Days until the full amount is due.
    #[validate(range(max = 730))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_days: Option<u32>,
    /// Days within which the early-payment discount applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_days: Option<u32>,
    /// Early-payment discount percentage.
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<Decimal>,
    /// Whether the payment terms are active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Typed requests for the `/payment-terms` endpoints.
pub struct PaymentTermsService<T> {
    transport: Arc<T>,
}

impl<T: Transport> PaymentTermsService<T> {
    /// Creates a service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Lists payment terms matching the filter.
    pub async fn list(
        &self,
        filter: &PaymentTermsFilter,
    ) -> AppResult<PageResponse<PaymentTerms>> {
        let value = self
            .transport
            .get("/payment-terms", &filter.query_pairs())
            .await?;
        decode(value)
    }

    /// Fetches a single payment terms definition.
    pub async fn get(&self, id: PaymentTermsId) -> AppResult<PaymentTerms> {
        let value = self
            .transport
            .get(&format!("/payment-terms/{id}"), &[])
            .await?;
        decode(value)
    }

    /// Creates a payment terms definition.
    pub async fn create(&self, input: &CreatePaymentTermsInput) -> AppResult<PaymentTerms> {
        check_input(input)?;
        let value = self.transport.post("/payment-terms", encode(input)?).await?;
        let terms: PaymentTerms = decode(value)?;
        info!(payment_terms_id = %terms.id, code = %terms.code, "Payment terms created");
        Ok(terms)
    }

    /// Updates a payment terms definition.
    pub async fn update(
        &self,
        id: PaymentTermsId,
        input: &UpdatePaymentTermsInput,
    ) -> AppResult<PaymentTerms> {
        check_input(input)?;
        let value = self
            .transport
            .put(&format!("/payment-terms/{id}"), encode(input)?)
            .await?;
        let terms: PaymentTerms = decode(value)?;
        info!(payment_terms_id = %id, "Payment terms updated");
        Ok(terms)
    }

    /// Deletes a payment terms definition.
    pub async fn delete(&self, id: PaymentTermsId) -> AppResult<()> {
        self.transport
            .delete(&format!("/payment-terms/{id}"))
            .await?;
        info!(payment_terms_id = %id, "Payment terms deleted");
        Ok(())
    }
}

//! Cost center service.

use bytes::Bytes;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use ledgerdesk_core::bulk::{BulkRequest, BulkResponse, ValidationVerdict};
use ledgerdesk_core::cost_center::{CostCenter, CostCenterFilter, CostCenterNode};
use ledgerdesk_core::filter::QueryFilter;
use ledgerdesk_shared::AppResult;
use ledgerdesk_shared::types::{CostCenterId, PageResponse};

use crate::export::ExportFormat;
use crate::transport::Transport;

use super::{check_input, decode, encode};

/// Request body for creating a cost center.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CreateCostCenterInput {
    /// Cost center code (must be unique).
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    /// Cost center name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Cost center description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent cost center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CostCenterId>,
    /// Name of the person responsible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    /// Whether the cost center is active.
    pub is_active: bool,
}

impl CreateCostCenterInput {
    /// Creates an input with the required fields.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            parent_id: None,
            responsible: None,
            is_active: true,
        }
    }
}

/// Request body for updating a cost center. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct UpdateCostCenterInput {
    /// Cost center code.
    #[validate(length(min = 1, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Cost center name.
    #[validate(length(min = 1, max = 120))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Cost center description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent cost center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CostCenterId>,
    /// Name of the person responsible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    /// Whether the cost center is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Typed requests for the `/cost-centers` endpoints.
pub struct CostCentersService<T> {
    transport: Arc<T>,
}

impl<T: Transport> CostCentersService<T> {
    /// Creates a service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Lists cost centers matching the filter.
    pub async fn list(&self, filter: &CostCenterFilter) -> AppResult<PageResponse<CostCenter>> {
        let value = self
            .transport
            .get("/cost-centers", &filter.query_pairs())
            .await?;
        decode(value)
    }

    /// Fetches a single cost center.
    pub async fn get(&self, id: CostCenterId) -> AppResult<CostCenter> {
        let value = self
            .transport
            .get(&format!("/cost-centers/{id}"), &[])
            .await?;
        decode(value)
    }

    /// Creates a cost center.
    pub async fn create(&self, input: &CreateCostCenterInput) -> AppResult<CostCenter> {
        check_input(input)?;
        let value = self.transport.post("/cost-centers", encode(input)?).await?;
        let cost_center: CostCenter = decode(value)?;
        info!(cost_center_id = %cost_center.id, code = %cost_center.code, "Cost center created");
        Ok(cost_center)
    }

    /// Updates a cost center.
    pub async fn update(
        &self,
        id: CostCenterId,
        input: &UpdateCostCenterInput,
    ) -> AppResult<CostCenter> {
        check_input(input)?;
        let value = self
            .transport
            .put(&format!("/cost-centers/{id}"), encode(input)?)
            .await?;
        let cost_center: CostCenter = decode(value)?;
        info!(cost_center_id = %id, "Cost center updated");
        Ok(cost_center)
    }

    /// Deletes a single cost center.
    pub async fn delete(&self, id: CostCenterId) -> AppResult<()> {
        self.transport
            .delete(&format!("/cost-centers/{id}"))
            .await?;
        info!(cost_center_id = %id, "Cost center deleted");
        Ok(())
    }

    /// Fetches the full cost center hierarchy.
    pub async fn tree(&self) -> AppResult<Vec<CostCenterNode>> {
        let value = self.transport.get("/cost-centers/tree", &[]).await?;
        decode(value)
    }

    /// Asks the server whether the given cost centers can be deleted.
    pub async fn validate_deletion(
        &self,
        ids: &[CostCenterId],
    ) -> AppResult<Vec<ValidationVerdict>> {
        let value = self
            .transport
            .post("/cost-centers/validate-deletion", json!({ "ids": ids }))
            .await?;
        decode(value)
    }

    /// Deletes the given cost centers in one batched request.
    pub async fn bulk_delete(
        &self,
        ids: &[CostCenterId],
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
            .post("/cost-centers/bulk-delete", encode(&request)?)
            .await?;
        decode(value)
    }

    /// Fetches the cost center list as a server-generated export blob.
    pub async fn export(&self, format: ExportFormat) -> AppResult<Bytes> {
        self.transport
            .get_bytes(
                "/cost-centers/export",
                &[("format".to_string(), format.as_str().to_string())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use chrono::Utc;
    use serde_json::Value;

    fn cost_center_json(id: CostCenterId) -> Value {
        json!({
            "id": id,
            "code": "CC-01",
            "name": "Administración",
            "description": null,
            "parent_id": null,
            "level": 1,
            "is_active": true,
            "responsible": null,
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_tree_decodes_nested_nodes() {
        let root = CostCenterId::new();
        let child = CostCenterId::new();

        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|path, _| path == "/cost-centers/tree")
            .times(1)
            .returning(move |_, _| {
                let mut node = cost_center_json(root);
                node["children"] = json!([cost_center_json(child)]);
                Ok(json!([node]))
            });

        let service = CostCentersService::new(Arc::new(transport));
        let tree = service.tree().await.unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].cost_center.id, child);
    }

    #[tokio::test]
    async fn test_validate_deletion_reshapes_verdicts() {
        let id = CostCenterId::new();
        let raw = Uuid::from(id);

        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .withf(|path, body| {
                path == "/cost-centers/validate-deletion" && body["ids"].is_array()
            })
            .times(1)
            .returning(move |_, _| {
                Ok(json!([{
                    "id": raw,
                    "feasible": false,
                    "blockers": ["Tiene asientos asociados"],
                    "warnings": []
                }]))
            });

        let service = CostCentersService::new(Arc::new(transport));
        let verdicts = service.validate_deletion(&[id]).await.unwrap();

        assert_eq!(verdicts.len(), 1);
        assert!(!verdicts[0].feasible);
        assert_eq!(verdicts[0].blockers_text(), "Tiene asientos asociados");
    }

    #[tokio::test]
    async fn test_update_serializes_only_present_fields() {
        let id = CostCenterId::new();

        let mut transport = MockTransport::new();
        transport
            .expect_put()
            .withf(|_, body| {
                body["is_active"] == false && body.get("name").is_none()
            })
            .times(1)
            .returning(move |_, _| {
                let mut value = cost_center_json(id);
                value["is_active"] = json!(false);
                Ok(value)
            });

        let service = CostCentersService::new(Arc::new(transport));
        let input = UpdateCostCenterInput {
            is_active: Some(false),
            ..Default::default()
        };
        let updated = service.update(id, &input).await.unwrap();

        assert!(!updated.is_active);
    }
}

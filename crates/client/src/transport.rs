//! Transport abstraction over the backend HTTP API.
//!
//! Services depend on the [`Transport`] trait rather than on reqwest
//! directly, so they can be exercised against a mock. Each request is a
//! single attempt: no retry, no backoff, no cancellation; callers
//! re-trigger manually.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use ledgerdesk_shared::{ApiConfig, ApiError, AppResult};

#[cfg(test)]
use mockall::automock;

/// HTTP verbs the services need, JSON in and out.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET request and decodes the JSON response.
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value>;

    /// Issues a POST request with a JSON body.
    async fn post(&self, path: &str, body: Value) -> AppResult<Value>;

    /// Issues a PUT request with a JSON body.
    async fn put(&self, path: &str, body: Value) -> AppResult<Value>;

    /// Issues a DELETE request.
    async fn delete(&self, path: &str) -> AppResult<Value>;

    /// Issues a GET request and returns the raw response body.
    async fn get_bytes(&self, path: &str, query: &[(String, String)]) -> AppResult<Bytes>;
}

/// Transport backed by reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpTransport {
    /// Builds a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the reqwest client cannot be constructed.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Error responses carry `{"error": ..., "message": ...}`.
        let body: Value = response.json().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &body))
    }

    async fn into_json(response: reqwest::Response) -> AppResult<Value> {
        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> AppResult<Value> {
        debug!(%path, "GET");
        let request = self.authorized(self.client.get(self.url(path)).query(query));
        Self::into_json(self.send(request).await?).await
    }

    async fn post(&self, path: &str, body: Value) -> AppResult<Value> {
        debug!(%path, "POST");
        let request = self.authorized(self.client.post(self.url(path)).json(&body));
        Self::into_json(self.send(request).await?).await
    }

    async fn put(&self, path: &str, body: Value) -> AppResult<Value> {
        debug!(%path, "PUT");
        let request = self.authorized(self.client.put(self.url(path)).json(&body));
        Self::into_json(self.send(request).await?).await
    }

    async fn delete(&self, path: &str) -> AppResult<Value> {
        debug!(%path, "DELETE");
        let request = self.authorized(self.client.delete(self.url(path)));
        Self::into_json(self.send(request).await?).await
    }

    async fn get_bytes(&self, path: &str, query: &[(String, String)]) -> AppResult<Bytes> {
        debug!(%path, "GET (bytes)");
        let request = self.authorized(self.client.get(self.url(path)).query(query));
        self.send(request)
            .await?
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            bearer_token: None,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let t = transport("http://localhost:8080/api/v1/");
        assert_eq!(
            t.url("/accounts"),
            "http://localhost:8080/api/v1/accounts"
        );
        assert_eq!(t.url("accounts"), "http://localhost:8080/api/v1/accounts");
    }

    #[test]
    fn test_url_joining_without_trailing_slash() {
        let t = transport("http://localhost:8080/api/v1");
        assert_eq!(
            t.url("/journal-entries/bulk/approve"),
            "http://localhost:8080/api/v1/journal-entries/bulk/approve"
        );
    }
}

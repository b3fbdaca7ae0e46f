//! Shared test transport: records requests, replays canned responses.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use ledgerdesk_client::transport::Transport;
use ledgerdesk_shared::{ApiError, AppResult};

/// Transport stub replaying queued responses in order.
///
/// Every issued request is recorded as `(method, path)` so tests can
/// assert on request counts (duplicate-fetch suppression) and targets.
#[derive(Default)]
pub struct StubTransport {
    requests: Mutex<Vec<(String, String)>>,
    responses: Mutex<VecDeque<AppResult<Value>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful JSON response.
    pub fn push_ok(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    /// Queues a failed response.
    pub fn push_err(&self, err: ApiError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    /// Number of requests issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Recorded `(method, path)` pairs.
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    fn record(&self, method: &str, path: &str) {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string()));
    }

    fn next(&self) -> AppResult<Value> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Internal("no canned response queued".to_string())))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, path: &str, _query: &[(String, String)]) -> AppResult<Value> {
        self.record("GET", path);
        self.next()
    }

    async fn post(&self, path: &str, _body: Value) -> AppResult<Value> {
        self.record("POST", path);
        self.next()
    }

    async fn put(&self, path: &str, _body: Value) -> AppResult<Value> {
        self.record("PUT", path);
        self.next()
    }

    async fn delete(&self, path: &str) -> AppResult<Value> {
        self.record("DELETE", path);
        self.next()
    }

    async fn get_bytes(&self, path: &str, _query: &[(String, String)]) -> AppResult<Bytes> {
        self.record("GET", path);
        self.next().map(|value| match value {
            Value::String(s) => Bytes::from(s),
            other => Bytes::from(other.to_string()),
        })
    }
}

/// Initializes test logging once; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

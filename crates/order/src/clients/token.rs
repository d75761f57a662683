//! Token acquisition from the issuing authority.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Deserialize;

use super::ClientError;

/// Mints bearer tokens for outbound calls.
///
/// The authority is remote even when services are co-deployed; the
/// orchestrator requests a fresh token per operation rather than caching
/// one across its expiry.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn issue(&self, service_name: &str) -> Result<String, ClientError>;
}

/// HTTP client for a `/get-token` endpoint.
#[derive(Clone)]
pub struct HttpTokenSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTokenSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[async_trait]
impl TokenSource for HttpTokenSource {
    async fn issue(&self, service_name: &str) -> Result<String, ClientError> {
        let url = format!("{}/get-token", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "service_name": service_name }))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let body: TokenBody = resp
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        Ok(body.token)
    }
}

#[derive(Debug, Default)]
struct InMemoryTokenState {
    issued: Vec<String>,
    fail_on_issue: bool,
}

/// In-memory token source for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenSource {
    state: Arc<RwLock<InMemoryTokenState>>,
}

impl InMemoryTokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the source to fail on subsequent issue calls.
    pub fn set_fail_on_issue(&self, fail: bool) {
        self.state.write().unwrap().fail_on_issue = fail;
    }

    /// Number of tokens handed out.
    pub fn issued_count(&self) -> usize {
        self.state.read().unwrap().issued.len()
    }
}

#[async_trait]
impl TokenSource for InMemoryTokenSource {
    async fn issue(&self, service_name: &str) -> Result<String, ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_issue {
            return Err(ClientError::Transport(
                "token endpoint unreachable".to_string(),
            ));
        }

        let token = format!("token-for-{service_name}");
        state.issued.push(token.clone());
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_source_issues_and_counts() {
        let source = InMemoryTokenSource::new();

        let token = source.issue("order_service").await.unwrap();
        assert_eq!(token, "token-for-order_service");
        assert_eq!(source.issued_count(), 1);
    }

    #[tokio::test]
    async fn in_memory_source_fails_on_demand() {
        let source = InMemoryTokenSource::new();
        source.set_fail_on_issue(true);

        assert!(source.issue("order_service").await.is_err());
        assert_eq!(source.issued_count(), 0);
    }
}

//! Best-effort event dispatch to the notification service.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::Serialize;

use super::ClientError;

/// An event to record with the notification service.
#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    pub related_id: i64,
    pub event_type: String,
    pub message: String,
}

/// Records events with the notification service.
///
/// Callers in the order workflow treat failures as advisory: they are
/// surfaced in the returned `Result` but never retried or compensated.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &NewNotification) -> Result<(), ClientError>;
}

/// HTTP client for the notification service's `/notify` endpoint.
#[derive(Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotifier {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn notify(&self, notification: &NewNotification) -> Result<(), ClientError> {
        let url = format!("{}/notify", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(notification)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        // The store answers 201 for a recorded event; anything else counts
        // as a delivery failure.
        if resp.status() != reqwest::StatusCode::CREATED {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryNotifierState {
    notifications: Vec<NewNotification>,
    fail_on_notify: bool,
}

/// In-memory notifier for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    state: Arc<RwLock<InMemoryNotifierState>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail on subsequent notify calls.
    pub fn set_fail_on_notify(&self, fail: bool) {
        self.state.write().unwrap().fail_on_notify = fail;
    }

    /// Number of recorded notifications.
    pub fn notification_count(&self) -> usize {
        self.state.read().unwrap().notifications.len()
    }

    /// All recorded notifications.
    pub fn notifications(&self) -> Vec<NewNotification> {
        self.state.read().unwrap().notifications.clone()
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, notification: &NewNotification) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_notify {
            return Err(ClientError::Transport(
                "notification service unreachable".to_string(),
            ));
        }

        state.notifications.push(notification.clone());
        Ok(())
    }
}

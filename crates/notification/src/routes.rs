//! Notification endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::{Notification, NotificationStore};

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub related_id: Option<i64>,
    pub event_type: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct NotificationBody {
    pub id: i64,
    pub related_id: i64,
    pub event_type: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct NotifyResponse {
    pub message: String,
    #[serde(rename = "Notification")]
    pub notification: NotificationBody,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl From<Notification> for NotificationBody {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            related_id: notification.related_id,
            event_type: notification.event_type,
            message: notification.message,
            timestamp: notification.timestamp.to_rfc3339(),
        }
    }
}

/// GET /health — returns service health status.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// POST /notify — record an event. Unauthenticated; callers fire and forget.
#[tracing::instrument(skip(store, request))]
pub async fn notify(
    State(store): State<NotificationStore>,
    Json(request): Json<NotifyRequest>,
) -> Result<(StatusCode, Json<NotifyResponse>), ApiError> {
    let related_id = request
        .related_id
        .ok_or_else(|| ApiError::BadRequest("Missing required field: related_id".to_string()))?;
    let event_type = request
        .event_type
        .ok_or_else(|| ApiError::BadRequest("Missing required field: event_type".to_string()))?;
    let message = request
        .message
        .ok_or_else(|| ApiError::BadRequest("Missing required field: message".to_string()))?;

    let notification = store.record(related_id, event_type, message);
    tracing::info!(
        notification_id = notification.id,
        related_id = notification.related_id,
        event_type = %notification.event_type,
        "notification recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(NotifyResponse {
            message: "Notification created successfully".to_string(),
            notification: notification.into(),
        }),
    ))
}

/// GET /notifications — every recorded notification, oldest first.
#[tracing::instrument(skip(store))]
pub async fn list(State(store): State<NotificationStore>) -> Json<Vec<NotificationBody>> {
    Json(store.all().into_iter().map(NotificationBody::from).collect())
}

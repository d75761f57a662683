//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::workflow::WorkflowError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Order placement failed.
    Workflow(WorkflowError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Workflow(err) => workflow_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn workflow_error_to_response(err: WorkflowError) -> (StatusCode, String) {
    match &err {
        WorkflowError::AuthenticationUnavailable(cause) => {
            tracing::error!(error = %cause, "token issuance unavailable");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        WorkflowError::CatalogUnavailable(cause) => {
            tracing::error!(error = %cause, "catalog unavailable");
            (StatusCode::BAD_GATEWAY, err.to_string())
        }
        WorkflowError::ProductNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        WorkflowError::InvalidProductPrice { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        ApiError::Workflow(err)
    }
}

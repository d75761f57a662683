//! Auth error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced by token validation and issuance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No Authorization header was presented.
    #[error("Token is missing")]
    MissingToken,

    /// The token's expiry claim is in the past.
    #[error("Token has expired")]
    ExpiredToken,

    /// The token is malformed or its signature does not verify.
    #[error("Token is invalid")]
    InvalidToken,

    /// Signing failed while minting a token.
    #[error("Unable to sign token: {0}")]
    Signing(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::Signing(msg) => {
                tracing::error!(error = %msg, "token signing failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

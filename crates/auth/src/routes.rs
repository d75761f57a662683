//! Shared token issuance endpoint, mounted by each service that owns one.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::token::TokenAuthority;

#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub service_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
}

/// POST /get-token — mint a token for the claimed service name.
///
/// The name is taken at face value; if the body is absent, unparseable, or
/// omits `service_name`, the claim defaults to `"unknown"`.
#[tracing::instrument(skip(authority, body))]
pub async fn issue(
    State(authority): State<TokenAuthority>,
    body: String,
) -> Result<Json<TokenResponse>, AuthError> {
    let service_name = serde_json::from_str::<TokenRequest>(&body)
        .ok()
        .and_then(|request| request.service_name)
        .unwrap_or_else(|| "unknown".to_string());

    let issued = authority.issue(&service_name)?;
    tracing::debug!(%service_name, "token issued");

    Ok(Json(TokenResponse {
        token: issued.token,
        expires_in: issued.expires_in,
    }))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use tower::ServiceExt;

    use super::*;

    fn app(authority: TokenAuthority) -> Router {
        Router::new()
            .route("/get-token", post(issue))
            .with_state(authority)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn issues_token_for_claimed_name() {
        let authority = TokenAuthority::new("test-secret");
        let response = app(authority.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get-token")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"service_name": "order_service"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["expires_in"], 3600);

        let claims = authority.validate(json["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.service_name, "order_service");
    }

    #[tokio::test]
    async fn missing_service_name_defaults_to_unknown() {
        let authority = TokenAuthority::new("test-secret");
        let response = app(authority.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/get-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;

        let claims = authority.validate(json["token"].as_str().unwrap()).unwrap();
        assert_eq!(claims.service_name, "unknown");
    }
}

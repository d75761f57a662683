//! Request extractor for token-gated endpoints.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::token::TokenAuthority;

/// The service name a verified token claims to act as.
///
/// Adding this extractor to a handler gates that endpoint: requests without
/// a valid token are rejected with 401 before the handler runs. The name is
/// a claim, not a verified identity; callers mint their own tokens under
/// whatever name they declare.
#[derive(Debug, Clone)]
pub struct ClaimedIdentity {
    pub service_name: String,
}

impl<S> FromRequestParts<S> for ClaimedIdentity
where
    S: Send + Sync,
    TokenAuthority: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let authority = TokenAuthority::from_ref(state);
        let claims = authority.validate(credential)?;

        Ok(Self {
            service_name: claims.service_name,
        })
    }
}

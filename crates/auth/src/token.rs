//! Token minting and verification against the shared secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Lifetime of every issued token, in seconds.
pub const TOKEN_TTL_SECS: u64 = 3600;

/// Claims carried by a service token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceClaims {
    /// The service name the caller claimed at issuance. Signed but never
    /// checked against a registry.
    pub service_name: String,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// A freshly minted token plus its advertised lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Issues and validates the signed service tokens shared by all services.
///
/// Stateless: verification needs only the shared secret, so any service
/// holding the secret can validate tokens minted by any other.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenAuthority {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Mints a token for the claimed `service_name`, valid for one hour.
    ///
    /// Succeeds for any name; the claim is taken at face value.
    pub fn issue(&self, service_name: &str) -> Result<IssuedToken, AuthError> {
        self.issue_with_ttl(service_name, TOKEN_TTL_SECS as i64)
    }

    /// Mints a token with an arbitrary lifetime in seconds.
    ///
    /// A non-positive lifetime produces an already-expired token, which
    /// expiry tests rely on.
    pub fn issue_with_ttl(
        &self,
        service_name: &str,
        ttl_secs: i64,
    ) -> Result<IssuedToken, AuthError> {
        let exp = (Utc::now() + Duration::seconds(ttl_secs)).timestamp();
        let claims = ServiceClaims {
            service_name: service_name.to_string(),
            exp: exp as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_in: ttl_secs.max(0) as u64,
        })
    }

    /// Verifies a presented credential and returns its claims.
    ///
    /// A leading `"Bearer "` prefix is stripped before verification;
    /// credentials presented without the prefix are verified as-is. Expiry
    /// is checked with zero leeway.
    pub fn validate(&self, credential: &str) -> Result<ServiceClaims, AuthError> {
        let token = credential.strip_prefix("Bearer ").unwrap_or(credential);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data =
            decode::<ServiceClaims>(token, &self.decoding, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                    _ => AuthError::InvalidToken,
                }
            })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_validate_roundtrip() {
        let authority = TokenAuthority::new("test-secret");

        let issued = authority.issue("order_service").unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = authority.validate(&issued.token).unwrap();
        assert_eq!(claims.service_name, "order_service");
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        let authority = TokenAuthority::new("test-secret");
        let issued = authority.issue("catalog_service").unwrap();

        let claims = authority
            .validate(&format!("Bearer {}", issued.token))
            .unwrap();
        assert_eq!(claims.service_name, "catalog_service");
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let authority = TokenAuthority::new("test-secret");
        let issued = authority.issue_with_ttl("order_service", -60).unwrap();

        let err = authority.validate(&issued.token).unwrap_err();
        assert_eq!(err, AuthError::ExpiredToken);
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let ours = TokenAuthority::new("test-secret");
        let theirs = TokenAuthority::new("another-secret");
        let issued = theirs.issue("order_service").unwrap();

        let err = ours.validate(&issued.token).unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn malformed_token_is_invalid() {
        let authority = TokenAuthority::new("test-secret");

        let err = authority.validate("not-a-token").unwrap_err();
        assert_eq!(err, AuthError::InvalidToken);
    }

    #[test]
    fn any_claimed_name_is_accepted() {
        let authority = TokenAuthority::new("test-secret");
        let issued = authority.issue("totally-made-up").unwrap();

        let claims = authority.validate(&issued.token).unwrap();
        assert_eq!(claims.service_name, "totally-made-up");
    }
}

//! Shared bearer-token issuance and validation.
//!
//! Every storefront service gates cross-service reads with the same
//! mechanism: an HS256-signed token carrying a caller-supplied service name
//! and a one-hour expiry, verified against a single shared secret loaded at
//! startup. This crate centralizes that logic so services inject it instead
//! of copying it.
//!
//! The service name is a *claimed* identity. Issuance never checks the name
//! against a registry, so any caller can mint a token under any name; the
//! signature only proves the token came from a holder of the shared secret.
//!
//! Gating is opt-in per endpoint: a handler that takes a [`ClaimedIdentity`]
//! argument rejects unauthenticated requests with 401, handlers that do not
//! stay open.

pub mod error;
pub mod extract;
pub mod routes;
pub mod token;

pub use error::AuthError;
pub use extract::ClaimedIdentity;
pub use token::{IssuedToken, ServiceClaims, TOKEN_TTL_SECS, TokenAuthority};

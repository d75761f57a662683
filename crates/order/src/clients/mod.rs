//! Outbound collaborator seams.
//!
//! The workflow talks to the token authority, the catalog, and the
//! notification service through these traits. HTTP implementations back the
//! running binary; the in-memory ones drive tests without sockets.

pub mod catalog;
pub mod notifier;
pub mod token;

use thiserror::Error;

pub use self::catalog::{CatalogProduct, HttpCatalog, InMemoryCatalog, ProductCatalog};
pub use self::notifier::{HttpNotifier, InMemoryNotifier, NewNotification, Notifier};
pub use self::token::{HttpTokenSource, InMemoryTokenSource, TokenSource};

/// Failure talking to a collaborator service.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The collaborator could not be reached at all.
    #[error("transport error: {0}")]
    Transport(String),

    /// The collaborator answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The collaborator's response body did not decode.
    #[error("invalid response: {0}")]
    Decode(String),
}

//! Notification service: append-only record of events other services emit.
//!
//! Writes are unauthenticated; the order service posts here
//! best-effort and never blocks an order on the outcome. `related_id` is a
//! reference by convention only and is never validated against the service
//! that owns it.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use auth::TokenAuthority;
use axum::Router;
use axum::extract::FromRef;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use store::NotificationStore;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: NotificationStore,
    pub authority: TokenAuthority,
}

impl FromRef<AppState> for NotificationStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for TokenAuthority {
    fn from_ref(state: &AppState) -> Self {
        state.authority.clone()
    }
}

/// Creates the axum application router with all routes and shared state.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/get-token", post(auth::routes::issue))
        .route("/notify", post(routes::notify))
        .route("/notifications", get(routes::list))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

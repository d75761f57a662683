//! Catalog service: owns product records and exposes them over HTTP.
//!
//! The full product list is token-gated; every other endpoint is open.
//! The order service reads `/products` with a bearer
//! token it mints from this service's `/get-token`.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use auth::TokenAuthority;
use axum::Router;
use axum::extract::FromRef;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use store::ProductStore;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
    pub authority: TokenAuthority,
}

impl FromRef<AppState> for ProductStore {
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
        .route("/products", get(routes::list))
        .route("/products/category/{category}", get(routes::by_category))
        .route("/create-product", post(routes::create))
        .route("/update-product/{id}", put(routes::update_price))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

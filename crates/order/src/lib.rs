//! Order orchestration service.
//!
//! Owns order records and the multi-service workflow that creates them: a
//! single `POST /create-order` triggers a synchronous chain of outbound
//! calls (issue token → fetch catalog → resolve → price → persist →
//! notify). Steps before persistence abort the whole operation on failure;
//! the notification step is fire-and-forget, so order durability never
//! depends on notification durability.

pub mod clients;
pub mod config;
pub mod error;
pub mod routes;
pub mod store;
pub mod workflow;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use clients::{
    HttpCatalog, HttpNotifier, HttpTokenSource, Notifier, ProductCatalog, TokenSource,
};
use config::Config;
use store::OrderStore;
use workflow::OrderWorkflow;

pub use routes::orders::AppState;

/// Creates the axum application router with all routes and shared state.
pub fn create_app<T, C, N>(state: Arc<AppState<T, C, N>>, metrics_handle: PrometheusHandle) -> Router
where
    T: TokenSource + 'static,
    C: ProductCatalog + 'static,
    N: Notifier + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/create-order", post(routes::orders::create::<T, C, N>))
        .route("/orders", get(routes::orders::list::<T, C, N>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state wired to the real HTTP collaborators.
///
/// The token authority lives behind the catalog service's base URL, matching
/// the deployed topology where the catalog process issues tokens.
pub fn create_http_state(
    config: &Config,
    client: reqwest::Client,
) -> Arc<AppState<HttpTokenSource, HttpCatalog, HttpNotifier>> {
    let store = OrderStore::new();
    let workflow = OrderWorkflow::new(
        HttpTokenSource::new(client.clone(), config.catalog_url.clone()),
        HttpCatalog::new(client.clone(), config.catalog_url.clone()),
        HttpNotifier::new(client, config.notification_url.clone()),
        store.clone(),
    );

    Arc::new(AppState { workflow, store })
}

//! End-to-end tests running all three services on real sockets.
//!
//! The catalog and notification services are bound to ephemeral ports and
//! the order service's reqwest-backed clients are pointed at them, so these
//! tests exercise the full chain including bearer-token gating on the wire.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use auth::TokenAuthority;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use order::AppState;
use order::clients::{HttpCatalog, HttpNotifier, HttpTokenSource};
use order::store::OrderStore;
use order::workflow::OrderWorkflow;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

/// Serves an app on an ephemeral port and returns its base URL.
async fn spawn_service(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Returns a base URL nothing is listening on.
async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn spawn_catalog(secret: &str) -> (String, catalog::store::ProductStore) {
    let store = catalog::store::ProductStore::new();
    let app = catalog::create_app(catalog::AppState {
        store: store.clone(),
        authority: TokenAuthority::new(secret),
    });
    (spawn_service(app).await, store)
}

async fn spawn_notification(secret: &str) -> (String, notification::store::NotificationStore) {
    let store = notification::store::NotificationStore::new();
    let app = notification::create_app(notification::AppState {
        store: store.clone(),
        authority: TokenAuthority::new(secret),
    });
    (spawn_service(app).await, store)
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}

fn order_app(
    client: &reqwest::Client,
    token_url: &str,
    catalog_url: &str,
    notification_url: &str,
) -> (axum::Router, OrderStore) {
    let store = OrderStore::new();
    let workflow = OrderWorkflow::new(
        HttpTokenSource::new(client.clone(), token_url),
        HttpCatalog::new(client.clone(), catalog_url),
        HttpNotifier::new(client.clone(), notification_url),
        store.clone(),
    );
    let state = Arc::new(AppState {
        workflow,
        store: store.clone(),
    });
    (order::create_app(state, get_metrics_handle()), store)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_order_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/create-order")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_order_chain() {
    let (catalog_url, product_store) = spawn_catalog("e2e-secret").await;
    let (notification_url, notification_store) = spawn_notification("e2e-secret").await;
    let client = http_client();

    // Seed the catalog over the wire, the way a real writer would.
    let created: serde_json::Value = client
        .post(format!("{catalog_url}/create-product"))
        .json(&serde_json::json!({"name": "Widget", "price": "10", "category": "tools"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["product"]["id"], 1);
    assert_eq!(product_store.all().len(), 1);

    let (app, order_store) = order_app(&client, &catalog_url, &catalog_url, &notification_url);

    let response = app
        .clone()
        .oneshot(create_order_request(serde_json::json!({
            "product_id": 1,
            "quantity": 3,
            "customer_name": "Ada"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["order"]["product"], "Widget");
    assert_eq!(json["order"]["total_price"], "30");

    assert_eq!(order_store.count(), 1);
    assert_eq!(order_store.all()[0].product_id, 1);

    // The notification landed in the remote store, tied to the order id.
    assert_eq!(notification_store.count(), 1);
    let recorded = &notification_store.all()[0];
    assert_eq!(recorded.related_id, 1);
    assert_eq!(recorded.event_type, "order_created");

    // And the order shows up in the order service's own listing.
    let list_response = app
        .oneshot(
            Request::builder()
                .uri("/orders")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let orders = body_json(list_response).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_catalog_unreachable_creates_no_order() {
    // Token issuance stays up (the notification service also issues tokens)
    // while the catalog itself is dead.
    let (notification_url, notification_store) = spawn_notification("e2e-secret").await;
    let catalog_url = dead_url().await;
    let client = http_client();

    let (app, order_store) = order_app(&client, &notification_url, &catalog_url, &notification_url);

    let response = app
        .oneshot(create_order_request(serde_json::json!({
            "product_id": 1,
            "quantity": 1,
            "customer_name": "Ada"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(order_store.count(), 0);
    assert_eq!(notification_store.count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_token_authority_unreachable_creates_no_order() {
    let (catalog_url, product_store) = spawn_catalog("e2e-secret").await;
    product_store.insert("Widget".into(), Some("10".into()), "tools".into());
    let token_url = dead_url().await;
    let notification_url = dead_url().await;
    let client = http_client();

    let (app, order_store) = order_app(&client, &token_url, &catalog_url, &notification_url);

    let response = app
        .oneshot(create_order_request(serde_json::json!({
            "product_id": 1,
            "quantity": 1,
            "customer_name": "Ada"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Unable to authenticate");
    assert_eq!(order_store.count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_notification_down_still_places_the_order() {
    let (catalog_url, product_store) = spawn_catalog("e2e-secret").await;
    product_store.insert("Widget".into(), Some("10".into()), "tools".into());
    let notification_url = dead_url().await;
    let client = http_client();

    let (app, order_store) = order_app(&client, &catalog_url, &catalog_url, &notification_url);

    let response = app
        .oneshot(create_order_request(serde_json::json!({
            "product_id": 1,
            "quantity": 2,
            "customer_name": "Ada"
        })))
        .await
        .unwrap();

    // Decoupling property: the order is durable and the caller sees success
    // even though the notification was lost for good.
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["order"]["total_price"], "20");
    assert_eq!(order_store.count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_token_minted_under_other_secret_is_rejected_by_catalog() {
    // The issuing authority and the catalog disagree on the shared secret,
    // so the catalog read fails closed and no order is created.
    let (catalog_url, product_store) = spawn_catalog("catalog-secret").await;
    product_store.insert("Widget".into(), Some("10".into()), "tools".into());
    let (issuer_url, _) = spawn_notification("other-secret").await;
    let notification_url = dead_url().await;
    let client = http_client();

    let (app, order_store) = order_app(&client, &issuer_url, &catalog_url, &notification_url);

    let response = app
        .oneshot(create_order_request(serde_json::json!({
            "product_id": 1,
            "quantity": 1,
            "customer_name": "Ada"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(order_store.count(), 0);
}

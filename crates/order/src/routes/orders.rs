//! Order creation and listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::clients::{Notifier, ProductCatalog, TokenSource};
use crate::error::ApiError;
use crate::store::{Order, OrderStore};
use crate::workflow::{NewOrder, OrderWorkflow};

/// Shared application state accessible from all handlers.
pub struct AppState<T, C, N>
where
    T: TokenSource,
    C: ProductCatalog,
    N: Notifier,
{
    pub workflow: OrderWorkflow<T, C, N>,
    pub store: OrderStore,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub customer_name: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderSummary {
    pub id: i64,
    pub product: String,
    pub quantity: i64,
    pub total_price: String,
    pub customer: String,
}

#[derive(Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order: OrderSummary,
}

// -- Handlers --

/// POST /create-order — run the place-an-order chain.
#[tracing::instrument(skip(state, request))]
pub async fn create<T, C, N>(
    State(state): State<Arc<AppState<T, C, N>>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError>
where
    T: TokenSource + 'static,
    C: ProductCatalog + 'static,
    N: Notifier + 'static,
{
    let product_id = request
        .product_id
        .ok_or_else(|| ApiError::BadRequest("Missing required field: product_id".to_string()))?;
    let quantity = request
        .quantity
        .ok_or_else(|| ApiError::BadRequest("Missing required field: quantity".to_string()))?;
    let customer_name = request
        .customer_name
        .ok_or_else(|| ApiError::BadRequest("Missing required field: customer_name".to_string()))?;

    // Detached task: a dropped connection must not cancel a half-finished
    // chain, so the workflow always runs to completion or failure.
    let workflow_state = state.clone();
    let placed = tokio::spawn(async move {
        workflow_state
            .workflow
            .place_order(NewOrder {
                product_id,
                quantity,
                customer_name,
            })
            .await
    })
    .await
    .map_err(|e| ApiError::Internal(format!("order workflow task failed: {e}")))??;

    let response = CreateOrderResponse {
        message: "Order created successfully".to_string(),
        order: OrderSummary {
            id: placed.order.id,
            product: placed.product_name,
            quantity: placed.order.quantity,
            total_price: placed.order.total_price,
            customer: placed.order.customer_name,
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /orders — every persisted order.
#[tracing::instrument(skip(state))]
pub async fn list<T, C, N>(State(state): State<Arc<AppState<T, C, N>>>) -> Json<Vec<Order>>
where
    T: TokenSource + 'static,
    C: ProductCatalog + 'static,
    N: Notifier + 'static,
{
    Json(state.store.all())
}

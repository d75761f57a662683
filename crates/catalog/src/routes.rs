//! Product endpoints.

use auth::ClaimedIdentity;
use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::store::{Product, ProductStore};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub price: Option<String>,
}

#[derive(Serialize)]
pub struct ProductMessageResponse {
    pub message: String,
    pub product: Product,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health — returns service health status.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /products — the full product list, in creation order. Token-gated.
#[tracing::instrument(skip(identity, store))]
pub async fn list(identity: ClaimedIdentity, State(store): State<ProductStore>) -> Json<Vec<Product>> {
    tracing::debug!(caller = %identity.service_name, "catalog read");
    Json(store.all())
}

/// GET /products/category/{category} — products in one category. Open.
#[tracing::instrument(skip(store))]
pub async fn by_category(
    Path(category): Path<String>,
    State(store): State<ProductStore>,
) -> Json<Vec<Product>> {
    Json(store.by_category(&category))
}

/// POST /create-product — add a product. Open.
#[tracing::instrument(skip(store, request))]
pub async fn create(
    State(store): State<ProductStore>,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductMessageResponse>, ApiError> {
    let name = request
        .name
        .ok_or_else(|| ApiError::BadRequest("Missing required field: name".to_string()))?;
    let category = request
        .category
        .ok_or_else(|| ApiError::BadRequest("Missing required field: category".to_string()))?;

    let product = store.insert(name, request.price, category);
    tracing::info!(product_id = product.id, "product created");

    Ok(Json(ProductMessageResponse {
        message: "Product created successfully".to_string(),
        product,
    }))
}

/// PUT /update-product/{id} — replace a product's price. Open.
#[tracing::instrument(skip(store, request))]
pub async fn update_price(
    Path(id): Path<i64>,
    State(store): State<ProductStore>,
    Json(request): Json<UpdatePriceRequest>,
) -> Result<Json<ProductMessageResponse>, ApiError> {
    let price = request
        .price
        .ok_or_else(|| ApiError::BadRequest("Missing required field: price".to_string()))?;

    let product = store
        .update_price(id, price)
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
    tracing::info!(product_id = product.id, "product price updated");

    Ok(Json(ProductMessageResponse {
        message: "Product updated successfully".to_string(),
        product,
    }))
}

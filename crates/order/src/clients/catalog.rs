//! Read access to the product catalog.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ClientError;

/// A product as the catalog service serializes it.
///
/// `price` arrives as a free-form optional string; interpreting it is the
/// workflow's problem, not the client's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub price: Option<String>,
    pub category: String,
}

/// Fetches the full product list with a bearer credential.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn list_products(&self, bearer_token: &str) -> Result<Vec<CatalogProduct>, ClientError>;
}

/// HTTP client for the catalog service's `/products` endpoint.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn list_products(&self, bearer_token: &str) -> Result<Vec<CatalogProduct>, ClientError> {
        let url = format!("{}/products", self.base_url);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(bearer_token)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        resp.json::<Vec<CatalogProduct>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: Vec<CatalogProduct>,
    fail_on_list: bool,
    last_token: Option<String>,
    list_calls: usize,
}

/// In-memory catalog for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product to the fake catalog.
    pub fn add_product(&self, id: i64, name: &str, price: Option<&str>, category: &str) {
        self.state.write().unwrap().products.push(CatalogProduct {
            id,
            name: name.to_string(),
            price: price.map(String::from),
            category: category.to_string(),
        });
    }

    /// Replaces the price of every product with the given id.
    pub fn set_price(&self, id: i64, price: &str) {
        let mut state = self.state.write().unwrap();
        for product in state.products.iter_mut().filter(|p| p.id == id) {
            product.price = Some(price.to_string());
        }
    }

    /// Configures the catalog to fail on subsequent list calls.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.state.write().unwrap().fail_on_list = fail;
    }

    /// The bearer token presented on the most recent list call.
    pub fn last_token(&self) -> Option<String> {
        self.state.read().unwrap().last_token.clone()
    }

    /// Number of list calls observed, including failed ones.
    pub fn list_calls(&self) -> usize {
        self.state.read().unwrap().list_calls
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn list_products(&self, bearer_token: &str) -> Result<Vec<CatalogProduct>, ClientError> {
        let mut state = self.state.write().unwrap();
        state.list_calls += 1;
        state.last_token = Some(bearer_token.to_string());

        if state.fail_on_list {
            return Err(ClientError::Transport(
                "catalog service unreachable".to_string(),
            ));
        }

        Ok(state.products.clone())
    }
}

//! In-memory product records.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// `price` is kept as the free-form string the writer supplied (it may be
/// absent entirely) and is only interpreted downstream at order-pricing
/// time. Everything except `price` is immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Option<String>,
    pub category: String,
}

#[derive(Debug, Default)]
struct ProductStoreState {
    products: Vec<Product>,
    next_id: i64,
}

/// In-memory product store.
///
/// Ids are assigned sequentially starting at 1 and insertion order is
/// preserved, so listings come back in creation order.
#[derive(Debug, Clone, Default)]
pub struct ProductStore {
    state: Arc<RwLock<ProductStoreState>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product and returns it with its assigned id.
    pub fn insert(&self, name: String, price: Option<String>, category: String) -> Product {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let product = Product {
            id: state.next_id,
            name,
            price,
            category,
        };
        state.products.push(product.clone());
        product
    }

    /// All products, in insertion order.
    pub fn all(&self) -> Vec<Product> {
        self.state.read().unwrap().products.clone()
    }

    /// Products whose category matches exactly.
    pub fn by_category(&self, category: &str) -> Vec<Product> {
        self.state
            .read()
            .unwrap()
            .products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect()
    }

    /// Replaces a product's price.
    ///
    /// Returns the updated product, or `None` if the id is unknown.
    pub fn update_price(&self, id: i64, price: String) -> Option<Product> {
        let mut state = self.state.write().unwrap();
        let product = state.products.iter_mut().find(|product| product.id == id)?;
        product.price = Some(price);
        Some(product.clone())
    }
}

//! In-memory order records.

use std::sync::{Arc, RwLock};

use serde::Serialize;

/// A persisted order.
///
/// `product_id` references a catalog product known at creation time; there
/// is no live foreign key, so the product may later change price or vanish
/// without touching this record. `total_price` is frozen at creation.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub total_price: String,
    pub customer_name: String,
}

#[derive(Debug, Default)]
struct OrderStoreState {
    orders: Vec<Order>,
    next_id: i64,
}

/// In-memory order store. Orders are created once and never updated.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    state: Arc<RwLock<OrderStoreState>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists an order and returns it with its assigned id.
    pub fn insert(
        &self,
        product_id: i64,
        quantity: i64,
        total_price: String,
        customer_name: String,
    ) -> Order {
        let mut state = self.state.write().unwrap();
        state.next_id += 1;
        let order = Order {
            id: state.next_id,
            product_id,
            quantity,
            total_price,
            customer_name,
        };
        state.orders.push(order.clone());
        order
    }

    /// All orders, in creation order.
    pub fn all(&self) -> Vec<Order> {
        self.state.read().unwrap().orders.clone()
    }

    /// Number of persisted orders.
    pub fn count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }
}

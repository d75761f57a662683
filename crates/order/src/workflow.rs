//! The order-creation workflow.

use thiserror::Error;

use crate::clients::{
    CatalogProduct, ClientError, NewNotification, Notifier, ProductCatalog, TokenSource,
};
use crate::store::{Order, OrderStore};

/// Service name under which the orchestrator authenticates its outbound
/// catalog reads.
pub const SELF_SERVICE_NAME: &str = "order_service";

/// Event type recorded for every placed order.
pub const ORDER_CREATED_EVENT: &str = "order_created";

/// Errors that abort order placement.
///
/// Every variant fires before the order is persisted; once the order is in
/// the store the operation no longer fails (notification delivery is
/// best-effort and reported separately).
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The token authority could not issue a credential.
    #[error("Unable to authenticate")]
    AuthenticationUnavailable(ClientError),

    /// The catalog could not be fetched.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(ClientError),

    /// The requested product id is not in the fetched catalog.
    #[error("Product not found")]
    ProductNotFound(i64),

    /// The resolved product's price is absent or not an integer.
    #[error("Product {product_id} has no usable price: {price:?}")]
    InvalidProductPrice {
        product_id: i64,
        price: Option<String>,
    },
}

/// Input for [`OrderWorkflow::place_order`].
///
/// `quantity` is unconstrained: zero and negative values are accepted and
/// produce zero or negative totals.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub product_id: i64,
    pub quantity: i64,
    pub customer_name: String,
}

/// A persisted order plus response-only context.
///
/// `product_name` is denormalized for the response and never stored;
/// `notification` reports the best-effort dispatch outcome, which callers
/// are free to ignore.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub product_name: String,
    pub notification: DispatchOutcome,
}

/// Outcome of the fire-and-forget notification dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered,
    Failed(String),
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered)
    }
}

/// Drives the multi-service order creation chain.
///
/// Steps run strictly in sequence with no retries: issue a token, fetch the
/// catalog, resolve and price the product, persist the order, record a
/// notification. A failure in any step before persistence aborts the whole
/// operation with nothing written; a notification failure after persistence
/// is absorbed and the order stands. There is no compensating action tying
/// the two stores together.
pub struct OrderWorkflow<T, C, N>
where
    T: TokenSource,
    C: ProductCatalog,
    N: Notifier,
{
    tokens: T,
    catalog: C,
    notifier: N,
    store: OrderStore,
}

impl<T, C, N> OrderWorkflow<T, C, N>
where
    T: TokenSource,
    C: ProductCatalog,
    N: Notifier,
{
    /// Creates a new workflow over the given collaborators and store.
    pub fn new(tokens: T, catalog: C, notifier: N, store: OrderStore) -> Self {
        Self {
            tokens,
            catalog,
            notifier,
            store,
        }
    }

    /// Executes the full place-an-order chain.
    #[tracing::instrument(skip(self, request), fields(product_id = request.product_id))]
    pub async fn place_order(&self, request: NewOrder) -> Result<PlacedOrder, WorkflowError> {
        metrics::counter!("orders_attempted_total").increment(1);

        // 1. Self-authenticate. The authority is addressed as a remote
        // issuer even when co-deployed, so the contract holds across
        // deployment shapes.
        tracing::info!(step = "authenticate", "workflow step started");
        let token = self
            .tokens
            .issue(SELF_SERVICE_NAME)
            .await
            .map_err(WorkflowError::AuthenticationUnavailable)?;

        // 2. Fetch the full catalog, fresh per order. Nothing has been
        // persisted yet, so a failure here aborts cleanly.
        tracing::info!(step = "fetch_catalog", "workflow step started");
        let products = self
            .catalog
            .list_products(&token)
            .await
            .map_err(WorkflowError::CatalogUnavailable)?;

        // 3. First id match wins; duplicates further down are ignored.
        let product = products
            .iter()
            .find(|product| product.id == request.product_id)
            .ok_or(WorkflowError::ProductNotFound(request.product_id))?;

        // 4. Price. Quantity is not validated: zero and negative quantities
        // flow through and freeze zero/negative totals into the order.
        let unit_price = parse_unit_price(product)?;
        let total_price = unit_price * request.quantity;

        // 5. Persist. The durable side effect, committed before any
        // notification attempt.
        let order = self.store.insert(
            request.product_id,
            request.quantity,
            total_price.to_string(),
            request.customer_name,
        );
        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(
            order_id = order.id,
            total_price = %order.total_price,
            "order persisted"
        );

        // 6. Best-effort notification.
        let notification = self.dispatch_notification(&order, &product.name).await;

        Ok(PlacedOrder {
            order,
            product_name: product.name.clone(),
            notification,
        })
    }

    /// Fire-and-forget dispatch of the order-created event.
    ///
    /// The outcome is reported but a failure never rolls back, retries, or
    /// surfaces to the HTTP caller; no later reconciliation exists.
    async fn dispatch_notification(&self, order: &Order, product_name: &str) -> DispatchOutcome {
        let message = format!(
            "Order {} placed: {} x {} for {}",
            order.id, order.quantity, product_name, order.customer_name
        );
        let notification = NewNotification {
            related_id: order.id,
            event_type: ORDER_CREATED_EVENT.to_string(),
            message,
        };

        tracing::info!(step = "notify", order_id = order.id, "workflow step started");
        match self.notifier.notify(&notification).await {
            Ok(()) => DispatchOutcome::Delivered,
            Err(e) => {
                metrics::counter!("order_notifications_failed_total").increment(1);
                tracing::warn!(
                    order_id = order.id,
                    error = %e,
                    "notification dispatch failed; order kept"
                );
                DispatchOutcome::Failed(e.to_string())
            }
        }
    }

}

fn parse_unit_price(product: &CatalogProduct) -> Result<i64, WorkflowError> {
    product
        .price
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .ok_or_else(|| WorkflowError::InvalidProductPrice {
            product_id: product.id,
            price: product.price.clone(),
        })
}

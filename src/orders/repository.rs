//! Order persistence ports
//!
//! The storefront's system of record sits behind these traits. Production deployments back
//! them with a database; the in-memory implementations here are the test doubles and the
//! default for demos, and they define the semantics any backend must match.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use super::{
    models::{CustomerId, Order, OrderId, OrderLine},
    status::OrderStatus,
};

/// Errors from the orders store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No order with the given id.
    #[error("order not found")]
    NotFound,

    /// An order with the same id already exists.
    #[error("order already exists")]
    AlreadyExists,

    /// Backend failure, surfaced to customers as a generic retryable error.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from the inventory store.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Not enough stock to cover a line.
    #[error("insufficient stock for \"{product_id}\"")]
    OutOfStock {
        /// The product that could not be covered.
        product_id: String,
    },

    /// Backend failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence port for orders.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist a newly built order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::AlreadyExists`] for a duplicate id, or
    /// [`RepositoryError::Storage`] on backend failure.
    async fn insert_order(&self, order: Order) -> Result<Order, RepositoryError>;

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for unknown ids.
    async fn get_order(&self, id: OrderId) -> Result<Order, RepositoryError>;

    /// All orders placed by a customer, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] on backend failure.
    async fn orders_for_customer(&self, customer: CustomerId)
    -> Result<Vec<Order>, RepositoryError>;

    /// Overwrite an order's status and `updated_at`. Last write wins; there is no
    /// version check.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for unknown ids.
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        updated_at: Timestamp,
    ) -> Result<(), RepositoryError>;

    /// Allocate the next order-number sequence for the given year, starting at 1.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Storage`] on backend failure.
    async fn next_sequence(&self, year: i16) -> Result<u64, RepositoryError>;
}

/// Stock reservation port. Reservation and release form the compensating pair around order
/// insertion.
#[automock]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Atomically take stock for every line, or nothing at all.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::OutOfStock`] when any line cannot be covered; no stock is
    /// taken in that case.
    async fn reserve(&self, lines: &[OrderLine]) -> Result<(), InventoryError>;

    /// Return previously reserved stock after an aborted submission.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Storage`] on backend failure.
    async fn release(&self, lines: &[OrderLine]) -> Result<(), InventoryError>;
}

/// In-memory orders store.
#[derive(Debug, Default)]
pub struct InMemoryOrdersRepository {
    orders: RwLock<FxHashMap<OrderId, Order>>,
    sequences: RwLock<FxHashMap<i16, u64>>,
}

impl InMemoryOrdersRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn insert_order(&self, order: Order) -> Result<Order, RepositoryError> {
        let mut orders = self.orders.write().await;

        if orders.contains_key(&order.id) {
            return Err(RepositoryError::AlreadyExists);
        }

        orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, RepositoryError> {
        self.orders
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn orders_for_customer(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.customer == customer)
            .cloned()
            .collect();

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders)
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        updated_at: Timestamp,
    ) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(RepositoryError::NotFound)?;

        order.status = status;
        order.updated_at = updated_at;

        Ok(())
    }

    async fn next_sequence(&self, year: i16) -> Result<u64, RepositoryError> {
        let mut sequences = self.sequences.write().await;
        let sequence = sequences.entry(year).or_insert(0);

        *sequence += 1;

        Ok(*sequence)
    }
}

/// In-memory stock levels keyed by product id.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    stock: RwLock<FxHashMap<String, u32>>,
}

impl InMemoryInventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stock level for a product.
    pub async fn set_stock(&self, product_id: &str, quantity: u32) {
        self.stock
            .write()
            .await
            .insert(product_id.to_string(), quantity);
    }

    /// Current stock level for a product, if tracked.
    pub async fn stock_of(&self, product_id: &str) -> Option<u32> {
        self.stock.read().await.get(product_id).copied()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventory {
    async fn reserve(&self, lines: &[OrderLine]) -> Result<(), InventoryError> {
        let mut stock = self.stock.write().await;

        // Validate everything before taking anything, so a failure takes no stock.
        for line in lines {
            let available = stock.get(&line.product_id).copied().unwrap_or(0);

            if available < line.quantity {
                return Err(InventoryError::OutOfStock {
                    product_id: line.product_id.clone(),
                });
            }
        }

        for line in lines {
            if let Some(available) = stock.get_mut(&line.product_id) {
                *available -= line.quantity;
            }
        }

        Ok(())
    }

    async fn release(&self, lines: &[OrderLine]) -> Result<(), InventoryError> {
        let mut stock = self.stock.write().await;

        for line in lines {
            *stock.entry(line.product_id.clone()).or_insert(0) += line.quantity;
        }

        Ok(())
    }
}

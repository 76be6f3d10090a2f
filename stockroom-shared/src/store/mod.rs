/// Persistence layer
///
/// The domain operations in [`crate::services`] never talk to a database
/// directly. They receive a `&dyn Store`, constructed once at startup and
/// shared by every request.
///
/// # Backends
///
/// - [`PgStore`]: PostgreSQL via sqlx, used by the server
/// - [`MemoryStore`]: in-process maps behind a `RwLock`, used by tests and
///   local development
///
/// Both enforce the same schema constraints: unique SKU, unique email,
/// non-negative price/stock/alert threshold, positive quantity.
///
/// # Example
///
/// ```
/// use stockroom_shared::store::{MemoryStore, Store};
/// use stockroom_shared::models::product::CreateProduct;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let product = store.create_product(CreateProduct {
///     name: "Widget".to_string(),
///     sku: "W1".to_string(),
///     price: 10.0,
///     stock: 5,
///     category: "tools".to_string(),
///     minimum_stock_alert: 2,
/// }).await?;
/// assert_eq!(store.count_products().await?, 1);
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    order::{CreateOrder, Order, OrderStatus, OrderWithProduct, StatusUpdate},
    product::{CreateProduct, Product, UpdateProduct},
    user::{CreateUser, User},
};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Duplicate value for unique field '{field}'")]
    UniqueViolation { field: String },

    /// A check constraint rejected the write
    #[error("Check constraint violated: {0}")]
    CheckViolation(String),

    /// Connection, protocol or other backend failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Persistence operations for users, products and orders
#[async_trait]
pub trait Store: Send + Sync {
    /// Verifies the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    // Users

    async fn create_user(&self, data: CreateUser) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;

    // Products

    async fn create_product(&self, data: CreateProduct) -> StoreResult<Product>;

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>>;

    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Newest first, at most `limit` products
    async fn recent_products(&self, limit: i64) -> StoreResult<Vec<Product>>;

    /// Shallow merge; `Ok(None)` if no product has this ID
    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> StoreResult<Option<Product>>;

    /// `Ok(false)` if no product has this ID
    async fn delete_product(&self, id: Uuid) -> StoreResult<bool>;

    async fn count_products(&self) -> StoreResult<i64>;

    /// Products with `stock < minimum_stock_alert`
    async fn count_low_stock(&self) -> StoreResult<i64>;

    // Orders

    async fn create_order(&self, data: CreateOrder) -> StoreResult<Order>;

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>>;

    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    /// Orders with the product reference resolved (None when stale)
    async fn list_orders_with_products(&self) -> StoreResult<Vec<OrderWithProduct>>;

    /// Sets the status and, when `stock` is given, overwrites the referenced
    /// product's stock. Both writes land together or not at all.
    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        stock: Option<i64>,
    ) -> StoreResult<StatusUpdate>;

    /// `Ok(false)` if no order has this ID
    async fn delete_order(&self, id: Uuid) -> StoreResult<bool>;

    async fn count_orders(&self) -> StoreResult<i64>;
}

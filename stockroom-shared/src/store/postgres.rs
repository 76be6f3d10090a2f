use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::db::pool::health_check;
use crate::models::{
    order::{CreateOrder, Order, OrderStatus, OrderWithProduct, StatusUpdate},
    product::{CreateProduct, Product, UpdateProduct},
    user::{CreateUser, User},
};

/// PostgreSQL-backed store
///
/// Thin adapter over the model operations; the pool is cheap to clone.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a constraint name to the field it protects
fn unique_field(constraint: &str) -> &str {
    match constraint {
        "products_sku_key" => "sku",
        "users_email_key" => "email",
        other => other,
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();

                if db_err.is_unique_violation() {
                    return StoreError::UniqueViolation {
                        field: unique_field(&constraint).to_string(),
                    };
                }
                if db_err.is_check_violation() {
                    return StoreError::CheckViolation(constraint);
                }

                StoreError::Backend(format!("Database error: {}", db_err))
            }
            other => {
                warn!(error = %other, "Database operation failed");
                StoreError::Backend(format!("Database error: {}", other))
            }
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn create_product(&self, data: CreateProduct) -> StoreResult<Product> {
        Ok(Product::create(&self.pool, data).await?)
    }

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        Ok(Product::find_by_id(&self.pool, id).await?)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(Product::list(&self.pool).await?)
    }

    async fn recent_products(&self, limit: i64) -> StoreResult<Vec<Product>> {
        Ok(Product::list_recent(&self.pool, limit).await?)
    }

    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> StoreResult<Option<Product>> {
        Ok(Product::update(&self.pool, id, data).await?)
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<bool> {
        Ok(Product::delete(&self.pool, id).await?)
    }

    async fn count_products(&self) -> StoreResult<i64> {
        Ok(Product::count(&self.pool).await?)
    }

    async fn count_low_stock(&self) -> StoreResult<i64> {
        Ok(Product::count_low_stock(&self.pool).await?)
    }

    async fn create_order(&self, data: CreateOrder) -> StoreResult<Order> {
        Ok(Order::create(&self.pool, data).await?)
    }

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(Order::find_by_id(&self.pool, id).await?)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(Order::list(&self.pool).await?)
    }

    async fn list_orders_with_products(&self) -> StoreResult<Vec<OrderWithProduct>> {
        Ok(Order::list_with_products(&self.pool).await?)
    }

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        stock: Option<i64>,
    ) -> StoreResult<StatusUpdate> {
        Ok(Order::update_status(&self.pool, id, status, stock).await?)
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<bool> {
        Ok(Order::delete(&self.pool, id).await?)
    }

    async fn count_orders(&self) -> StoreResult<i64> {
        Ok(Order::count(&self.pool).await?)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    order::{CreateOrder, Order, OrderStatus, OrderWithProduct, PaymentStatus, StatusUpdate},
    product::{CreateProduct, Product, UpdateProduct},
    user::{CreateUser, User},
};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// In-memory store
///
/// Collections are kept in insertion order, which doubles as the recency
/// order for [`Store::recent_products`]. A single lock guards all three
/// collections, so the paired order/product write is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_product(product: &Product) -> StoreResult<()> {
    if product.price.is_nan() || product.price < 0.0 {
        return Err(StoreError::CheckViolation("products_price_check".to_string()));
    }
    if product.stock < 0 {
        return Err(StoreError::CheckViolation("products_stock_check".to_string()));
    }
    if product.minimum_stock_alert < 0 {
        return Err(StoreError::CheckViolation(
            "products_minimum_stock_alert_check".to_string(),
        ));
    }
    Ok(())
}

fn sku_taken(products: &[Product], sku: &str, except: Option<Uuid>) -> bool {
    products
        .iter()
        .any(|p| p.sku == sku && Some(p.id) != except)
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == data.email) {
            return Err(StoreError::UniqueViolation {
                field: "email".to_string(),
            });
        }

        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            password: data.password_hash,
            role: data.role,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn create_product(&self, data: CreateProduct) -> StoreResult<Product> {
        let mut inner = self.inner.write().await;

        let product = Product {
            id: Uuid::new_v4(),
            name: data.name,
            sku: data.sku,
            price: data.price,
            stock: data.stock,
            category: data.category,
            minimum_stock_alert: data.minimum_stock_alert,
            created_at: Utc::now(),
        };

        if sku_taken(&inner.products, &product.sku, None) {
            return Err(StoreError::UniqueViolation {
                field: "sku".to_string(),
            });
        }
        check_product(&product)?;

        inner.products.push(product.clone());

        Ok(product)
    }

    async fn find_product(&self, id: Uuid) -> StoreResult<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn recent_products(&self, limit: i64) -> StoreResult<Vec<Product>> {
        let inner = self.inner.read().await;
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);

        Ok(inner.products.iter().rev().take(limit).cloned().collect())
    }

    async fn update_product(&self, id: Uuid, data: UpdateProduct) -> StoreResult<Option<Product>> {
        let mut inner = self.inner.write().await;

        let Some(index) = inner.products.iter().position(|p| p.id == id) else {
            return Ok(None);
        };

        let mut updated = inner.products[index].clone();
        data.apply_to(&mut updated);

        if sku_taken(&inner.products, &updated.sku, Some(id)) {
            return Err(StoreError::UniqueViolation {
                field: "sku".to_string(),
            });
        }
        check_product(&updated)?;

        inner.products[index] = updated.clone();

        Ok(Some(updated))
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        Ok(inner.products.len() < before)
    }

    async fn count_products(&self) -> StoreResult<i64> {
        Ok(self.inner.read().await.products.len() as i64)
    }

    async fn count_low_stock(&self) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().filter(|p| p.is_low_stock()).count() as i64)
    }

    async fn create_order(&self, data: CreateOrder) -> StoreResult<Order> {
        if data.quantity <= 0 {
            return Err(StoreError::CheckViolation("orders_quantity_check".to_string()));
        }

        let order = Order {
            id: Uuid::new_v4(),
            product_id: data.product_id,
            quantity: data.quantity,
            status: data.status,
            payment_id: data.payment_id,
            payment_status: PaymentStatus::Unpaid,
            created_at: Utc::now(),
        };
        self.inner.write().await.orders.push(order.clone());

        Ok(order)
    }

    async fn find_order(&self, id: Uuid) -> StoreResult<Option<Order>> {
        let inner = self.inner.read().await;
        Ok(inner.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.inner.read().await.orders.clone())
    }

    async fn list_orders_with_products(&self) -> StoreResult<Vec<OrderWithProduct>> {
        let inner = self.inner.read().await;

        let orders = inner
            .orders
            .iter()
            .map(|order| {
                let product = inner
                    .products
                    .iter()
                    .find(|p| p.id == order.product_id)
                    .map(Product::summary);
                OrderWithProduct::new(order.clone(), product)
            })
            .collect();

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
        stock: Option<i64>,
    ) -> StoreResult<StatusUpdate> {
        let mut inner = self.inner.write().await;

        let Some(order_index) = inner.orders.iter().position(|o| o.id == id) else {
            return Ok(StatusUpdate::OrderMissing);
        };

        // Validate the product write before touching anything
        let product_index = match stock {
            Some(stock) => {
                if stock < 0 {
                    return Err(StoreError::CheckViolation("products_stock_check".to_string()));
                }
                let product_id = inner.orders[order_index].product_id;
                match inner.products.iter().position(|p| p.id == product_id) {
                    Some(index) => Some((index, stock)),
                    None => return Ok(StatusUpdate::ProductMissing),
                }
            }
            None => None,
        };

        inner.orders[order_index].status = status;
        if let Some((index, stock)) = product_index {
            inner.products[index].stock = stock;
        }

        Ok(StatusUpdate::Updated(inner.orders[order_index].clone()))
    }

    async fn delete_order(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.orders.len();
        inner.orders.retain(|o| o.id != id);
        Ok(inner.orders.len() < before)
    }

    async fn count_orders(&self) -> StoreResult<i64> {
        Ok(self.inner.read().await.orders.len() as i64)
    }
}

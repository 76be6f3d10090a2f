/// Order model and database operations
///
/// An order points at a product through `product_id`. The reference is weak:
/// there is no foreign key, deleting a product never touches its orders, and
/// listings resolve the reference with a LEFT JOIN so a stale id shows up as
/// an unresolved (`null`) product rather than an error.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE order_status AS ENUM ('pending', 'processing', 'shipped');
/// CREATE TYPE payment_status AS ENUM ('paid', 'unpaid');
///
/// CREATE TABLE orders (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     product_id UUID NOT NULL,
///     quantity BIGINT NOT NULL CHECK (quantity > 0),
///     status order_status NOT NULL DEFAULT 'pending',
///     payment_id VARCHAR(255),
///     payment_status payment_status NOT NULL DEFAULT 'unpaid',
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::product::ProductSummary;

const ORDER_COLUMNS: &str =
    "id, product_id, quantity, status, payment_id, payment_status, created_at";

/// Fulfilment status of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not yet worked on
    #[default]
    Pending,

    /// Being picked and packed
    Processing,

    /// Handed to the carrier
    Shipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            other => Err(format!(
                "Invalid order status '{}': expected pending, processing or shipped",
                other
            )),
        }
    }
}

/// Payment state of an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,

    #[default]
    Unpaid,
}

/// Customer order for a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,

    /// Weak reference to the ordered product
    pub product_id: Uuid,

    /// Units ordered
    pub quantity: i64,

    /// Fulfilment status
    pub status: OrderStatus,

    /// External payment reference, if any
    pub payment_id: Option<String>,

    /// Payment state
    pub payment_status: PaymentStatus,

    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

/// Order with its product reference resolved
///
/// `product_id` carries the product projection, or `None` when the referenced
/// product no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithProduct {
    pub id: Uuid,
    pub product_id: Option<ProductSummary>,
    pub quantity: i64,
    pub status: OrderStatus,
    pub payment_id: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderWithProduct {
    pub fn new(order: Order, product: Option<ProductSummary>) -> Self {
        Self {
            id: order.id,
            product_id: product,
            quantity: order.quantity,
            status: order.status,
            payment_id: order.payment_id,
            payment_status: order.payment_status,
            created_at: order.created_at,
        }
    }
}

/// Input for creating a new order
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub product_id: Uuid,
    pub quantity: i64,
    pub status: OrderStatus,
    pub payment_id: Option<String>,
}

/// Outcome of an order status update
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// Status (and stock, if given) written
    Updated(Order),

    /// No order with this ID
    OrderMissing,

    /// Stock was given but the referenced product is gone; nothing written
    ProductMissing,
}

/// Row shape of the orders/products LEFT JOIN
#[derive(Debug, sqlx::FromRow)]
struct OrderProductRow {
    id: Uuid,
    product_id: Uuid,
    quantity: i64,
    status: OrderStatus,
    payment_id: Option<String>,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
    product_ref: Option<Uuid>,
    product_name: Option<String>,
    product_price: Option<f64>,
    product_stock: Option<i64>,
}

impl From<OrderProductRow> for OrderWithProduct {
    fn from(row: OrderProductRow) -> Self {
        let product = match (row.product_ref, row.product_name, row.product_price, row.product_stock) {
            (Some(id), Some(name), Some(price), Some(stock)) => Some(ProductSummary {
                id,
                name,
                price,
                stock,
            }),
            _ => None,
        };

        OrderWithProduct::new(
            Order {
                id: row.id,
                product_id: row.product_id,
                quantity: row.quantity,
                status: row.status,
                payment_id: row.payment_id,
                payment_status: row.payment_status,
                created_at: row.created_at,
            },
            product,
        )
    }
}

impl Order {
    /// Inserts a new order with payment status `unpaid`
    ///
    /// Does not check that the product exists; callers look it up first.
    pub async fn create(pool: &PgPool, data: CreateOrder) -> Result<Self, sqlx::Error> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (product_id, quantity, status, payment_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(data.product_id)
        .bind(data.quantity)
        .bind(data.status)
        .bind(data.payment_id)
        .fetch_one(pool)
        .await?;

        Ok(order)
    }

    /// Finds an order by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders WHERE id = $1",
            ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(order)
    }

    /// Lists all orders without resolving products, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders ORDER BY created_at ASC",
            ORDER_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(orders)
    }

    /// Lists all orders with the product projection resolved
    pub async fn list_with_products(pool: &PgPool) -> Result<Vec<OrderWithProduct>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OrderProductRow>(
            r#"
            SELECT o.id, o.product_id, o.quantity, o.status, o.payment_id,
                   o.payment_status, o.created_at,
                   p.id AS product_ref, p.name AS product_name,
                   p.price AS product_price, p.stock AS product_stock
            FROM orders o
            LEFT JOIN products p ON p.id = o.product_id
            ORDER BY o.created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(OrderWithProduct::from).collect())
    }

    /// Sets the order status and optionally overwrites the product's stock
    ///
    /// Both writes run in one transaction. `stock` is an absolute value, not a
    /// delta against the order quantity. If `stock` is given and the product
    /// no longer exists, the transaction is rolled back.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: OrderStatus,
        stock: Option<i64>,
    ) -> Result<StatusUpdate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {}",
            ORDER_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(order) = order else {
            tx.rollback().await?;
            return Ok(StatusUpdate::OrderMissing);
        };

        if let Some(stock) = stock {
            let result = sqlx::query("UPDATE products SET stock = $2 WHERE id = $1")
                .bind(order.product_id)
                .bind(stock)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Ok(StatusUpdate::ProductMissing);
            }
        }

        tx.commit().await?;

        Ok(StatusUpdate::Updated(order))
    }

    /// Deletes an order by ID; product stock is not restored
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all orders
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

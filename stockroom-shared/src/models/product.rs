/// Product model and database operations
///
/// Products make up the catalog. Stock is changed either by a direct edit or
/// by the absolute stock overwrite that can accompany an order status update
/// (see [`crate::models::order::Order::update_status`]).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     sku VARCHAR(128) NOT NULL UNIQUE,
///     price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
///     stock BIGINT NOT NULL CHECK (stock >= 0),
///     category VARCHAR(128) NOT NULL,
///     minimum_stock_alert BIGINT NOT NULL CHECK (minimum_stock_alert >= 0),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str =
    "id, name, sku, price, stock, category, minimum_stock_alert, created_at";

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Stock keeping unit, unique across products
    pub sku: String,

    /// Unit price
    pub price: f64,

    /// Units on hand
    pub stock: i64,

    /// Category label
    pub category: String,

    /// Stock level below which the product counts as low stock
    pub minimum_stock_alert: i64,

    /// When the product was added (recency ordering key)
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether stock has dropped below the alert threshold
    ///
    /// Strict comparison: stock equal to the threshold is not low.
    pub fn is_low_stock(&self) -> bool {
        self.stock < self.minimum_stock_alert
    }

    /// Partial projection embedded in order listings
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            stock: self.stock,
        }
    }
}

/// Product fields resolved into an order listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// Input for creating a new product
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub minimum_stock_alert: i64,
}

/// Shallow-merge update for a product
///
/// Only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub minimum_stock_alert: Option<i64>,
}

impl UpdateProduct {
    /// True when no field would be written
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category.is_none()
            && self.minimum_stock_alert.is_none()
    }

    /// Applies the provided fields over `product` in place
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(ref name) = self.name {
            product.name = name.clone();
        }
        if let Some(ref sku) = self.sku {
            product.sku = sku.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(ref category) = self.category {
            product.category = category.clone();
        }
        if let Some(minimum_stock_alert) = self.minimum_stock_alert {
            product.minimum_stock_alert = minimum_stock_alert;
        }
    }
}

impl Product {
    /// Inserts a new product
    ///
    /// # Errors
    ///
    /// Fails with a unique violation on `products_sku_key` for a duplicate SKU,
    /// or a check violation for negative numeric fields.
    pub async fn create(pool: &PgPool, data: CreateProduct) -> Result<Self, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, sku, price, stock, category, minimum_stock_alert)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(data.name)
        .bind(data.sku)
        .bind(data.price)
        .bind(data.stock)
        .bind(data.category)
        .bind(data.minimum_stock_alert)
        .fetch_one(pool)
        .await?;

        Ok(product)
    }

    /// Finds a product by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Lists all products, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products ORDER BY created_at ASC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Lists the `limit` most recently created products, newest first
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products ORDER BY created_at DESC LIMIT $1",
            PRODUCT_COLUMNS
        ))
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(products)
    }

    /// Applies a shallow-merge update
    ///
    /// # Returns
    ///
    /// The updated product, or None if no product has this ID
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProduct,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        for (column, present) in [
            ("name", data.name.is_some()),
            ("sku", data.sku.is_some()),
            ("price", data.price.is_some()),
            ("stock", data.stock.is_some()),
            ("category", data.category.is_some()),
            ("minimum_stock_alert", data.minimum_stock_alert.is_some()),
        ] {
            if present {
                bind_count += 1;
                assignments.push(format!("{} = ${}", column, bind_count));
            }
        }

        let query = format!(
            "UPDATE products SET {} WHERE id = $1 RETURNING {}",
            assignments.join(", "),
            PRODUCT_COLUMNS
        );

        let mut q = sqlx::query_as::<_, Product>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(sku) = data.sku {
            q = q.bind(sku);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }
        if let Some(stock) = data.stock {
            q = q.bind(stock);
        }
        if let Some(category) = data.category {
            q = q.bind(category);
        }
        if let Some(minimum_stock_alert) = data.minimum_stock_alert {
            q = q.bind(minimum_stock_alert);
        }

        let product = q.fetch_optional(pool).await?;

        Ok(product)
    }

    /// Deletes a product by ID
    ///
    /// Orders referencing the product are left untouched.
    ///
    /// # Returns
    ///
    /// True if a product was deleted
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all products
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts products whose stock is below their alert threshold
    pub async fn count_low_stock(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE stock < minimum_stock_alert")
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

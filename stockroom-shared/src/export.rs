/// CSV rendering of the whole inventory
///
/// Output is three blocks, each a header row followed by one row per record,
/// concatenated in this order:
///
/// ```text
/// id,name,email,role
/// ...
/// id,name,price,stock,category,minimumStockAlert
/// ...
/// id,productId,quantity,status
/// ...
/// ```
///
/// Every row ends with `\n`. A field is quoted only when it contains a comma,
/// double quote, CR or LF, with inner quotes doubled.

use std::borrow::Cow;
use std::fmt::Write;

use crate::models::{order::Order, product::Product, user::User};

pub const USER_HEADER: &str = "id,name,email,role";
pub const PRODUCT_HEADER: &str = "id,name,price,stock,category,minimumStockAlert";
pub const ORDER_HEADER: &str = "id,productId,quantity,status";

/// Suggested download name
pub const EXPORT_FILENAME: &str = "inventory-export.csv";

/// Quotes a field if it would otherwise break the row
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Renders users, products and orders as one CSV document
pub fn render_inventory(users: &[User], products: &[Product], orders: &[Order]) -> String {
    let mut csv = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(csv, "{}", USER_HEADER);
    for user in users {
        let _ = writeln!(
            csv,
            "{},{},{},{}",
            user.id,
            csv_field(&user.name),
            csv_field(&user.email),
            csv_field(&user.role),
        );
    }

    let _ = writeln!(csv, "{}", PRODUCT_HEADER);
    for product in products {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{}",
            product.id,
            csv_field(&product.name),
            product.price,
            product.stock,
            csv_field(&product.category),
            product.minimum_stock_alert,
        );
    }

    let _ = writeln!(csv, "{}", ORDER_HEADER);
    for order in orders {
        let _ = writeln!(
            csv,
            "{},{},{},{}",
            order.id, order.product_id, order.quantity, order.status,
        );
    }

    csv
}

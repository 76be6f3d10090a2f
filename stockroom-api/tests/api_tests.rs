/// End-to-end tests for the HTTP surface
///
/// Every test runs the real router over a fresh in-memory store:
/// - Public vs. protected routes
/// - Signup and login flow
/// - Product CRUD and SKU uniqueness
/// - Order lifecycle, including the stock overwrite on status update
/// - Reporting and the CSV export

mod common;

use axum::http::{header, StatusCode};
use common::{json_body, text_body, TestContext};
use serde_json::json;
use stockroom_shared::store::Store;

#[tokio::test]
async fn test_welcome_and_health_are_public() {
    let ctx = TestContext::new();

    let response = ctx.anonymous("GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text_body(response).await.starts_with("Welcome"));

    let response = ctx.anonymous("GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new();

    for uri in ["/api/products", "/api/orders", "/api/users", "/api/export"] {
        let response = ctx.anonymous("GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert!(json_body(response).await["error"].is_string());
    }

    let request = axum::http::Request::builder()
        .uri("/api/products")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(axum::body::Body::empty())
        .unwrap();
    assert_eq!(ctx.send(request).await.status(), StatusCode::UNAUTHORIZED);

    let request = axum::http::Request::builder()
        .uri("/api/products")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    assert_eq!(ctx.send(request).await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_login_flow() {
    let ctx = TestContext::new();
    let credentials = json!({ "name": "Ada", "email": "ada@example.com", "password": "s3cret" });

    let response = ctx.anonymous("POST", "/api/signup", Some(credentials.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["user"]["role"], "staff");
    assert_ne!(body["user"]["password"], "s3cret");

    // Same email again
    let response = ctx.anonymous("POST", "/api/signup", Some(credentials)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "User already exists");

    let response = ctx
        .anonymous(
            "POST",
            "/api/login",
            Some(json!({ "email": "ada@example.com", "password": "s3cret" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "User logged in successfully");
    let token = body["token"].as_str().unwrap().to_string();

    // The issued token opens protected routes
    let request = axum::http::Request::builder()
        .uri("/api/users")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = ctx.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_login_errors_are_bad_requests() {
    let ctx = TestContext::new();
    ctx.anonymous(
        "POST",
        "/api/signup",
        Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "s3cret" })),
    )
    .await;

    let response = ctx
        .anonymous(
            "POST",
            "/api/login",
            Some(json!({ "email": "nobody@example.com", "password": "s3cret" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "User does not exist");

    let response = ctx
        .anonymous(
            "POST",
            "/api/login",
            Some(json!({ "email": "ada@example.com", "password": "wrong" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid password");

    let response = ctx
        .anonymous("POST", "/api/login", Some(json!({ "email": "ada@example.com" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "All fields are required");
}

#[tokio::test]
async fn test_malformed_json_gets_json_error() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/products")
        .header(header::AUTHORIZATION, ctx.auth_header())
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = ctx.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn test_duplicate_sku_is_rejected() {
    let ctx = TestContext::new();
    let widget = json!({
        "name": "Widget",
        "sku": "W1",
        "price": 10,
        "stock": 5,
        "category": "Tools",
        "minimumStockAlert": 2,
    });

    let response = ctx.request("POST", "/api/products", Some(widget.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Product created successfully");
    assert_eq!(body["product"]["minimumStockAlert"], 2);

    let response = ctx.request("POST", "/api/products", Some(widget)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["error"],
        "Product with this SKU already exists"
    );

    let response = ctx.request("GET", "/api/products", None).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_product_zero_values_and_missing_fields() {
    let ctx = TestContext::new();

    let response = ctx
        .request(
            "POST",
            "/api/products",
            Some(json!({
                "name": "Freebie",
                "sku": "F0",
                "price": 0,
                "stock": 0,
                "category": "Promo",
                "minimumStockAlert": 0,
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = ctx
        .request("POST", "/api/products", Some(json!({ "name": "Widget", "sku": "" })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_product_list_is_ok() {
    let ctx = TestContext::new();

    let response = ctx.request("GET", "/api/products", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_update_and_delete_product() {
    let ctx = TestContext::new();
    let product = ctx.create_product("W1", 5, 2).await;
    let uri = format!("/api/products/{}", product["id"].as_str().unwrap());

    let response = ctx.request("PUT", &uri, Some(json!({ "price": 12.5 }))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Product updated successfully");
    assert_eq!(body["updatedProduct"]["price"], 12.5);
    assert_eq!(body["updatedProduct"]["sku"], "W1");

    let response = ctx.request("DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Product deleted successfully");

    let response = ctx.request("DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Product not found");

    // Malformed ids never resolve
    let response = ctx.request("PUT", "/api/products/abc", Some(json!({ "stock": 1 }))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_update_overwrites_stock() {
    let ctx = TestContext::new();
    let product = ctx.create_product("W1", 5, 2).await;
    let product_id = product["id"].as_str().unwrap();
    let order = ctx.create_order(product_id, 2).await;
    assert_eq!(order["paymentStatus"], "unpaid");

    let uri = format!("/api/orders/{}", order["id"].as_str().unwrap());
    let response = ctx
        .request("PUT", &uri, Some(json!({ "status": "shipped", "stock": 0 })))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Order and Product updated successfully");
    assert_eq!(body["updatedOrder"]["status"], "shipped");

    let response = ctx.request("GET", "/api/products", None).await;
    assert_eq!(json_body(response).await[0]["stock"], 0);
}

#[tokio::test]
async fn test_order_for_missing_product() {
    let ctx = TestContext::new();

    let response = ctx
        .request(
            "POST",
            "/api/orders",
            Some(json!({
                "productId": uuid::Uuid::new_v4().to_string(),
                "quantity": 1,
                "status": "pending",
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Product not found");
    assert_eq!(ctx.store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn test_orders_survive_product_deletion() {
    let ctx = TestContext::new();
    let product = ctx.create_product("W1", 5, 2).await;
    let product_id = product["id"].as_str().unwrap();
    let order = ctx.create_order(product_id, 3).await;

    let response = ctx.request("GET", "/api/orders", None).await;
    let body = json_body(response).await;
    assert_eq!(body["message"], "Orders fetched successfully");
    assert_eq!(body["orders"][0]["productId"]["name"], "Widget");

    ctx.request("DELETE", &format!("/api/products/{}", product_id), None)
        .await;

    let response = ctx.request("GET", "/api/orders", None).await;
    let body = json_body(response).await;
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);
    assert!(body["orders"][0]["productId"].is_null());

    let order_uri = format!("/api/orders/{}", order["id"].as_str().unwrap());
    let response = ctx.request("DELETE", &order_uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Order deleted successfully");
    assert_eq!(ctx.store.count_orders().await.unwrap(), 0);
}

#[tokio::test]
async fn test_notify_and_delete_order() {
    let ctx = TestContext::new();
    let product = ctx.create_product("W1", 5, 2).await;
    let order = ctx.create_order(product["id"].as_str().unwrap(), 1).await;
    let uri = format!("/api/orders/{}", order["id"].as_str().unwrap());

    let response = ctx.request("GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "Order notification sent successfully"
    );

    let response = ctx.request("DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Order deleted successfully");

    let response = ctx.request("GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "Order not found");
}

#[tokio::test]
async fn test_report_counts() {
    let ctx = TestContext::new();
    let low = ctx.create_product("LOW", 1, 2).await;
    ctx.create_product("EDGE", 2, 2).await;
    ctx.create_product("OK", 10, 2).await;
    ctx.create_order(low["id"].as_str().unwrap(), 1).await;

    let body = json_body(ctx.request("GET", "/api/total-products", None).await).await;
    assert_eq!(body, json!({ "totalProducts": 3 }));

    let body = json_body(ctx.request("GET", "/api/total-orders", None).await).await;
    assert_eq!(body, json!({ "totalOrders": 1 }));

    let body = json_body(ctx.request("GET", "/api/low-stock-count", None).await).await;
    assert_eq!(body, json!({ "lowStockCount": 1 }));
}

#[tokio::test]
async fn test_recent_products() {
    let ctx = TestContext::new();
    for i in 0..7 {
        ctx.create_product(&format!("P{}", i), 5, 1).await;
    }

    let body = json_body(ctx.request("GET", "/api/recent-added-products", None).await).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0]["sku"], "P6");

    let body = json_body(
        ctx.request("GET", "/api/recent-added-products?limit=2", None)
            .await,
    )
    .await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);

    let response = ctx
        .request("GET", "/api/recent-added-products?limit=many", None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_export_on_empty_store() {
    let ctx = TestContext::new();

    let response = ctx.request("GET", "/api/export", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"inventory-export.csv\""
    );

    assert_eq!(
        text_body(response).await,
        "id,name,email,role\n\
         id,name,price,stock,category,minimumStockAlert\n\
         id,productId,quantity,status\n"
    );
}

#[tokio::test]
async fn test_export_includes_rows() {
    let ctx = TestContext::new();
    let product = ctx.create_product("W1", 5, 2).await;
    let order = ctx.create_order(product["id"].as_str().unwrap(), 4).await;

    let csv = text_body(ctx.request("GET", "/api/export", None).await).await;

    assert!(csv.contains(&format!("{},Widget,10,5,Tools,2", product["id"].as_str().unwrap())));
    assert!(csv.contains(&format!(
        "{},{},4,pending",
        order["id"].as_str().unwrap(),
        product["id"].as_str().unwrap()
    )));
}

//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory store, so these tests need no
//! database. Also provides request/response helpers and a signed-in user.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use std::sync::Arc;
use stockroom_api::app::{build_router, AppState};
use stockroom_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use stockroom_shared::auth::jwt::{create_token, Claims};
use stockroom_shared::store::{MemoryStore, Store};
use tower::Service as _;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: axum::Router,
    pub config: Config,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a context with an empty store and a valid token
    pub fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());

        let state = AppState::new(store.clone() as Arc<dyn Store>, config.clone());
        let app = build_router(state);

        // Tokens are stateless; the subject need not exist in the store
        let jwt_token = create_token(&Claims::new(Uuid::new_v4()), TEST_SECRET)
            .expect("token should be created");

        TestContext {
            store,
            app,
            config,
            jwt_token,
        }
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    /// Authenticated request with an optional JSON body
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, self.auth_header());

        self.send(with_body(builder, body)).await
    }

    /// Request without credentials
    pub async fn anonymous(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        self.send(with_body(builder, body)).await
    }

    /// Creates a product through the API and returns its JSON
    pub async fn create_product(&self, sku: &str, stock: i64, minimum_stock_alert: i64) -> Value {
        let response = self
            .request(
                "POST",
                "/api/products",
                Some(serde_json::json!({
                    "name": "Widget",
                    "sku": sku,
                    "price": 10,
                    "stock": stock,
                    "category": "Tools",
                    "minimumStockAlert": minimum_stock_alert,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["product"].clone()
    }

    /// Creates a pending order through the API and returns its JSON
    pub async fn create_order(&self, product_id: &str, quantity: i64) -> Value {
        let response = self
            .request(
                "POST",
                "/api/orders",
                Some(serde_json::json!({
                    "productId": product_id,
                    "quantity": quantity,
                    "status": "pending",
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["order"].clone()
    }
}

fn with_body(builder: axum::http::request::Builder, body: Option<Value>) -> Request<Body> {
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Configuration that never touches the environment
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
    }
}

/// Reads the body as text
pub async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Reads the body as JSON
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

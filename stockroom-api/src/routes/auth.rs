/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/signup` - Register a new user
/// - `POST /api/login` - Exchange credentials for a 24h bearer token

use super::ApiJson;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use stockroom_shared::{
    error::ServiceError,
    models::user::User,
    services::auth::{self, LoginRequest, SignupRequest},
};

/// Signup response
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: User,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: User,

    /// HS256 bearer token, valid for 24 hours
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/signup
/// Content-Type: application/json
///
/// {
///   "name": "Ada",
///   "email": "ada@example.com",
///   "password": "s3cret",
///   "role": "admin"
/// }
/// ```
///
/// `role` is optional and defaults to `staff`.
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields or email already registered
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let user = auth::register(state.store.as_ref(), req).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user,
        }),
    ))
}

/// Login endpoint
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// {
///   "email": "ada@example.com",
///   "password": "s3cret"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields, unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = auth::login(state.store.as_ref(), req, state.jwt_secret())
        .await
        .map_err(|e| match e {
            // An unknown email is a bad request here, not a missing resource
            ServiceError::NotFound(msg) => ApiError::BadRequest(msg),
            other => other.into(),
        })?;

    Ok(Json(LoginResponse {
        message: "User logged in successfully",
        user: outcome.user,
        token: outcome.token,
    }))
}

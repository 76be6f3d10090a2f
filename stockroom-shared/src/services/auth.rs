/// Signup, login and user listing

use serde::Deserialize;
use tracing::{debug, info};

use super::{present_text, required};
use crate::auth::{jwt, password};
use crate::error::{ServiceError, ServiceResult};
use crate::models::user::{CreateUser, User, DEFAULT_ROLE};
use crate::store::Store;

/// Signup payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Creates a user account
///
/// # Errors
///
/// - `Validation` if name, email or password is missing
/// - `Conflict` if the email is already registered
pub async fn register(store: &dyn Store, req: SignupRequest) -> ServiceResult<User> {
    let name = required(present_text(req.name))?;
    let email = required(present_text(req.email))?;
    // Passwords are not trimmed
    let plaintext = required(req.password.filter(|p| !p.is_empty()))?;
    let role = present_text(req.role).unwrap_or_else(|| DEFAULT_ROLE.to_string());

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(ServiceError::Conflict("User already exists".to_string()));
    }

    let password_hash = password::hash_password(&plaintext)?;

    // A concurrent signup can still win the race; the store's unique
    // constraint turns that into the same Conflict.
    let user = store
        .create_user(CreateUser {
            name,
            email,
            password_hash,
            role,
        })
        .await?;

    info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(user)
}

/// Verifies credentials and issues a 24-hour bearer token
///
/// # Errors
///
/// - `Validation` if email or password is missing
/// - `NotFound` if no user has this email
/// - `InvalidCredentials` if the password does not match
pub async fn login(store: &dyn Store, req: LoginRequest, secret: &str) -> ServiceResult<LoginOutcome> {
    let email = required(present_text(req.email))?;
    let plaintext = required(req.password.filter(|p| !p.is_empty()))?;

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ServiceError::not_found("User does not exist"))?;

    if !password::verify_password(&plaintext, &user.password)? {
        debug!(user_id = %user.id, "Password mismatch");
        return Err(ServiceError::InvalidCredentials("Invalid password".to_string()));
    }

    let token = jwt::create_token(&jwt::Claims::new(user.id), secret)?;

    info!(user_id = %user.id, "User logged in");
    Ok(LoginOutcome { user, token })
}

/// Lists every user
pub async fn list_users(store: &dyn Store) -> ServiceResult<Vec<User>> {
    Ok(store.list_users().await?)
}

/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 session tokens (24h, stateless)
/// - [`middleware`]: `Authorization: Bearer` header validation

pub mod jwt;
pub mod middleware;
pub mod password;

//! Authentication for texnomart.
//!
//! This crate provides:
//! - Opaque API tokens (`Authorization: Token <key>`)
//! - HS256 access/refresh JWTs (`Authorization: Bearer <jwt>`)
//! - bcrypt password hashing
//! - Axum extractors and the account/token routes

mod config;
mod error;
mod extractors;
mod handlers;
mod jwt;
mod password;
mod state;

#[cfg(test)]
mod testing;

/// Minimum bcrypt cost (`bcrypt::MIN_COST` is not exported by the bcrypt crate).
#[cfg(test)]
pub(crate) const BCRYPT_MIN_COST: u32 = 4;

pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::{CurrentUser, OptionalUser};
pub use handlers::auth_routes;
pub use jwt::{encode_claims, issue_pair, issue_token, verify_token};
pub use password::{hash_password, verify_password};
pub use state::AuthState;

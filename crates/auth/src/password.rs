//! bcrypt password hashing.
//!
//! Hashing is CPU bound, so both functions run on the blocking pool.

use texnomart_core::auth::AuthError as CoreError;

use crate::error::AuthError;

/// Hashes a plaintext password with the given bcrypt cost.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| CoreError::Hashing(e.to_string()))?
        .map_err(|e| CoreError::Hashing(e.to_string()).into())
}

/// Checks a plaintext password against a stored hash.
///
/// Malformed or empty hashes never match.
pub async fn verify_password(password: String, hash: String) -> bool {
    if hash.is_empty() {
        return false;
    }
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("s3cret".to_string(), crate::BCRYPT_MIN_COST)
            .await
            .unwrap();

        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret".to_string(), hash.clone()).await);
        assert!(!verify_password("wrong".to_string(), hash).await);
    }

    #[tokio::test]
    async fn malformed_hash_never_matches() {
        assert!(!verify_password("s3cret".to_string(), String::new()).await);
        assert!(!verify_password("s3cret".to_string(), "plain".to_string()).await);
    }
}

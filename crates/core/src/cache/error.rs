use thiserror::Error;

/// Failures reported by a cache backend.
///
/// Listing code treats both as a miss, so neither reaches an HTTP client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The backend could not be reached.
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    /// The backend was reached but rejected the command.
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failure_kind() {
        assert_eq!(
            CacheError::ConnectionFailed("redis://cache:6379 refused".to_string()).to_string(),
            "Cache connection failed: redis://cache:6379 refused"
        );
        assert_eq!(
            CacheError::OperationFailed("READONLY replica".to_string()).to_string(),
            "Cache operation failed: READONLY replica"
        );
    }
}

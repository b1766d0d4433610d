use thiserror::Error;

/// Errors raised by archival and notification side effects.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("failed to read archive: {0}")]
    ArchiveRead(String),
    #[error("failed to write archive: {0}")]
    ArchiveWrite(String),
    #[error("archive is malformed: {0}")]
    MalformedArchive(String),
    #[error("notification delivery failed: {0}")]
    Delivery(String),
    #[error("failed to resolve notification recipients: {0}")]
    Recipients(String),
}

/// Result type for lifecycle operations.
pub type Result<T> = std::result::Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_archive_display() {
        let error = LifecycleError::MalformedArchive("expected `[` at line 1".to_string());
        assert_eq!(
            error.to_string(),
            "archive is malformed: expected `[` at line 1"
        );
    }

    #[test]
    fn test_delivery_display() {
        let error = LifecycleError::Delivery("smtp refused".to_string());
        assert_eq!(error.to_string(), "notification delivery failed: smtp refused");
    }
}

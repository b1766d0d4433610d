//! HTTP status codes for repository failures.

use super::RepositoryError;

/// Status code a handler should answer with when a repository call fails.
///
/// | variant | status |
/// |---|---|
/// | `NotFound` | 404 |
/// | `AlreadyExists` | 409 (unique title, slug, username or token) |
/// | `InvalidData` | 400 (dangling category, product or user reference) |
/// | `ConnectionFailed` | 503 |
/// | `QueryFailed`, `Serialization`, `HookFailed` | 500 |
///
/// ```
/// use texnomart_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let missing = RepositoryError::not_found("Category", 7);
/// assert_eq!(repository_error_to_status_code(&missing), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::HookFailed(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_variant() {
        let cases = [
            (RepositoryError::not_found("Product", 3), 404),
            (
                RepositoryError::AlreadyExists {
                    entity_type: "Product",
                    id: "galaxy-s24".to_string(),
                },
                409,
            ),
            (RepositoryError::InvalidData("unknown category 9".to_string()), 400),
            (RepositoryError::ConnectionFailed("database is locked".to_string()), 503),
            (RepositoryError::QueryFailed("no such table".to_string()), 500),
            (RepositoryError::Serialization("bad timestamp".to_string()), 500),
            (RepositoryError::HookFailed("archive is not a JSON array".to_string()), 500),
        ];

        for (error, status) in cases {
            assert_eq!(repository_error_to_status_code(&error), status, "{error}");
        }
    }
}

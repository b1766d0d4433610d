use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use texnomart_core::storage::{repository_error_to_status_code, RepositoryError};
use thiserror::Error;

/// Auth errors for the texnomart_auth crate.
///
/// This wraps the core `AuthError` and adds storage failures that surface
/// while resolving users and tokens.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Error from the core auth module (validation, credentials, tokens).
    #[error(transparent)]
    Core(#[from] texnomart_core::auth::AuthError),

    /// Error from the user or token repository.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    fn status_code(&self) -> StatusCode {
        use texnomart_core::auth::AuthError as CoreError;

        match self {
            AuthError::Core(core_err) => match core_err {
                CoreError::InvalidCredentials
                | CoreError::InvalidToken(_)
                | CoreError::WrongTokenType { .. } => StatusCode::UNAUTHORIZED,
                CoreError::UsernameTaken
                | CoreError::TokenNotFound
                | CoreError::MissingField(_)
                | CoreError::InvalidUsername(_)
                | CoreError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                CoreError::Storage(_) | CoreError::Hashing(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AuthError::Repository(repo_err) => {
                StatusCode::from_u16(repository_error_to_status_code(repo_err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Auth request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

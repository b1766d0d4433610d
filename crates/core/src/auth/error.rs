use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Token not found")]
    TokenNotFound,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("expected {expected} token")]
    WrongTokenType { expected: &'static str },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_facing_messages() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(AuthError::UsernameTaken.to_string(), "Username already taken");
        assert_eq!(AuthError::TokenNotFound.to_string(), "Token not found");
    }

    #[test]
    fn test_wrong_token_type_display() {
        let error = AuthError::WrongTokenType {
            expected: "refresh",
        };
        assert_eq!(error.to_string(), "expected refresh token");
    }
}

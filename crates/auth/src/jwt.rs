//! HS256 access and refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use texnomart_core::auth::{build_claims, AuthError as CoreError, Claims, TokenPair, TokenType};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Signs `claims` with the configured secret.
pub fn encode_claims(config: &AuthConfig, claims: &Claims) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| CoreError::InvalidToken(e.to_string()).into())
}

/// Issues a token of the given type for a user, valid from now.
pub fn issue_token(
    config: &AuthConfig,
    user_id: i64,
    token_type: TokenType,
) -> Result<String, AuthError> {
    let ttl = match token_type {
        TokenType::Access => config.access_ttl,
        TokenType::Refresh => config.refresh_ttl,
    };
    let claims = build_claims(
        user_id,
        token_type,
        Utc::now(),
        Duration::seconds(ttl.as_secs() as i64),
        Uuid::new_v4().to_string(),
    );
    encode_claims(config, &claims)
}

/// Issues a fresh refresh/access pair for a user.
pub fn issue_pair(config: &AuthConfig, user_id: i64) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        refresh: issue_token(config, user_id, TokenType::Refresh)?,
        access: issue_token(config, user_id, TokenType::Access)?,
    })
}

/// Verifies signature, expiry and token type.
pub fn verify_token(
    config: &AuthConfig,
    token: &str,
    expected: TokenType,
) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| CoreError::InvalidToken(e.to_string()))?;

    if data.claims.token_type != expected {
        return Err(CoreError::WrongTokenType {
            expected: expected.as_str(),
        }
        .into());
    }
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::new("test-secret")
    }

    #[test]
    fn issued_access_token_verifies() {
        let token = issue_token(&config(), 42, TokenType::Access).unwrap();
        let claims = verify_token(&config(), &token, TokenType::Access).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn pair_tokens_have_distinct_types() {
        let pair = issue_pair(&config(), 7).unwrap();

        assert!(verify_token(&config(), &pair.refresh, TokenType::Refresh).is_ok());
        assert!(verify_token(&config(), &pair.access, TokenType::Access).is_ok());
        assert!(matches!(
            verify_token(&config(), &pair.refresh, TokenType::Access),
            Err(AuthError::Core(CoreError::WrongTokenType { expected: "access" }))
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = issue_token(&AuthConfig::new("other"), 1, TokenType::Access).unwrap();
        assert!(matches!(
            verify_token(&config(), &token, TokenType::Access),
            Err(AuthError::Core(CoreError::InvalidToken(_)))
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let claims = build_claims(
            1,
            TokenType::Access,
            Utc::now() - Duration::hours(2),
            Duration::minutes(5),
            "expired".to_string(),
        );
        let token = encode_claims(&config(), &claims).unwrap();

        assert!(matches!(
            verify_token(&config(), &token, TokenType::Access),
            Err(AuthError::Core(CoreError::InvalidToken(_)))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token(&config(), "not-a-jwt", TokenType::Access).is_err());
    }
}

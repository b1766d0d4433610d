use chrono::{DateTime, Duration, Utc};

use super::{Claims, Credential, TokenType};

/// Generate a random 40 character hex API token key.
#[cfg(feature = "auth")]
pub fn generate_token_key() -> String {
    use rand::Rng;

    let bytes: [u8; 20] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Build claims for a token issued at `issued_at` that lives for `ttl`.
pub fn build_claims(
    user_id: i64,
    token_type: TokenType,
    issued_at: DateTime<Utc>,
    ttl: Duration,
    jti: String,
) -> Claims {
    Claims {
        token_type,
        exp: (issued_at + ttl).timestamp().max(0) as usize,
        iat: issued_at.timestamp().max(0) as usize,
        jti,
        user_id,
    }
}

/// Parse an `Authorization` header value.
///
/// Accepts `Bearer <jwt>` and `Token <key>` (scheme is case-insensitive).
pub fn parse_authorization(header: &str) -> Option<Credential> {
    let (scheme, value) = header.trim().split_once(' ')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if scheme.eq_ignore_ascii_case("bearer") {
        Some(Credential::Bearer(value.to_string()))
    } else if scheme.eq_ignore_ascii_case("token") {
        Some(Credential::Token(value.to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[cfg(feature = "auth")]
    #[test]
    fn generate_token_key_produces_40_hex_chars() {
        let key = generate_token_key();
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[cfg(feature = "auth")]
    #[test]
    fn generate_token_key_is_unique() {
        assert_ne!(generate_token_key(), generate_token_key());
    }

    #[test]
    fn build_claims_adds_ttl_to_issued_at() {
        let issued = Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap();
        let claims = build_claims(
            7,
            TokenType::Access,
            issued,
            Duration::minutes(5),
            "jti-1".to_string(),
        );

        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.iat, issued.timestamp() as usize);
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn parse_authorization_schemes() {
        assert_eq!(
            parse_authorization("Bearer abc.def.ghi"),
            Some(Credential::Bearer("abc.def.ghi".to_string()))
        );
        assert_eq!(
            parse_authorization("Token 0123abcd"),
            Some(Credential::Token("0123abcd".to_string()))
        );
        assert_eq!(
            parse_authorization("token 0123abcd"),
            Some(Credential::Token("0123abcd".to_string()))
        );
    }

    #[test]
    fn parse_authorization_rejects_malformed() {
        assert_eq!(parse_authorization("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_authorization("Bearer"), None);
        assert_eq!(parse_authorization("Bearer   "), None);
        assert_eq!(parse_authorization(""), None);
    }
}

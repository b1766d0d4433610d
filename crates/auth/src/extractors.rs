//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use texnomart_core::auth::{parse_authorization, Credential, TokenType, User};

use crate::jwt::verify_token;
use crate::AuthState;

type AuthRejection = (StatusCode, &'static str);

/// Extractor for authenticated user. Returns 401 if not authenticated.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let credential = credential_from_parts(parts, &auth_state)?
            .ok_or((StatusCode::UNAUTHORIZED, "Authentication credentials were not provided"))?;

        resolve_user(&auth_state, credential).await.map(CurrentUser)
    }
}

/// Extractor for optionally authenticated user. Returns None if not authenticated.
pub struct OptionalUser(pub Option<User>);

impl<S> FromRequestParts<S> for OptionalUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let credential = match credential_from_parts(parts, &auth_state) {
            Ok(Some(credential)) => credential,
            _ => return Ok(OptionalUser(None)),
        };

        Ok(OptionalUser(resolve_user(&auth_state, credential).await.ok()))
    }
}

/// Reads the `Authorization` header, falling back to the access token cookie.
fn credential_from_parts(
    parts: &Parts,
    auth_state: &AuthState,
) -> Result<Option<Credential>, AuthRejection> {
    // Try Authorization header first (for API/mobile clients)
    if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let header_value = auth_header
            .to_str()
            .map_err(|_| (StatusCode::UNAUTHORIZED, "Invalid authorization header"))?;

        return parse_authorization(header_value)
            .map(Some)
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid authorization header"));
    }

    // Fall back to cookie (for web clients)
    let jar = CookieJar::from_headers(&parts.headers);
    Ok(jar
        .get(&auth_state.config.cookie_name)
        .map(|cookie| Credential::Bearer(cookie.value().to_string())))
}

async fn resolve_user(auth_state: &AuthState, credential: Credential) -> Result<User, AuthRejection> {
    let user_id = match credential {
        Credential::Bearer(token) => {
            verify_token(&auth_state.config, &token, TokenType::Access)
                .map_err(|_| (StatusCode::UNAUTHORIZED, "Given token not valid"))?
                .user_id
        }
        Credential::Token(key) => {
            auth_state
                .tokens
                .get_token(&key)
                .await
                .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "Token lookup failed"))?
                .ok_or((StatusCode::UNAUTHORIZED, "Invalid token"))?
                .user_id
        }
    };

    let user = auth_state
        .users
        .get_user(user_id)
        .await
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, "User lookup failed"))?
        .ok_or((StatusCode::UNAUTHORIZED, "User not found"))?;

    if !user.is_active {
        return Err((StatusCode::UNAUTHORIZED, "User inactive or deleted"));
    }
    Ok(user)
}

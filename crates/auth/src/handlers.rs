//! HTTP handlers for account and token routes.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use serde::Serialize;
use texnomart_core::auth::{
    generate_token_key, validate_registration, ApiToken, AuthError as CoreError, LoginRequest,
    NewUser, RefreshRequest, RegisterRequest, TokenPair, TokenType, User, UserSummary,
};
use texnomart_core::storage::RepositoryError;

use crate::error::AuthError;
use crate::extractors::CurrentUser;
use crate::jwt::{issue_pair, issue_token, verify_token};
use crate::password::{hash_password, verify_password};
use crate::AuthState;

#[derive(Serialize)]
struct ApiTokenResponse {
    token: String,
}

#[derive(Serialize)]
struct LoginResponse {
    success: bool,
    refresh: String,
    access: String,
    user: UserSummary,
}

#[derive(Serialize)]
struct PairResponse {
    token: TokenPair,
    user: String,
    success: bool,
}

#[derive(Serialize)]
struct AccessResponse {
    access: String,
}

#[derive(Serialize)]
struct RegisterResponse {
    success: bool,
    token: String,
    username: String,
    email: String,
}

#[derive(Serialize)]
struct LogoutResponse {
    success: bool,
    detail: &'static str,
}

/// Creates the auth router with all account and token routes.
///
/// Routes:
/// - `POST /api-token-auth` - Exchange credentials for an API token
/// - `POST /api/token/access` - Exchange credentials for a refresh/access pair
/// - `POST /api/token/pair` - Same, wrapped with the username
/// - `POST /api/token/refresh` - Exchange a refresh token for an access token
/// - `POST /user/register` - Create an account and its API token
/// - `POST /user/login` - Exchange credentials for tokens and profile
/// - `POST /user/logout` - Delete the current user's API token
/// - `GET /user/users` - List all accounts
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/api-token-auth", post(obtain_api_token))
        .route("/api/token/access", post(obtain_token_pair))
        .route("/api/token/pair", post(obtain_wrapped_token_pair))
        .route("/api/token/refresh", post(refresh_access_token))
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/user/logout", post(logout))
        .route("/user/users", get(list_users))
}

/// Looks up an active user by username and checks the password.
async fn authenticate(state: &AuthState, request: LoginRequest) -> Result<User, AuthError> {
    if request.username.is_empty() || request.password.is_empty() {
        return Err(CoreError::InvalidCredentials.into());
    }

    let user = state
        .users
        .get_user_by_username(&request.username)
        .await?
        .filter(|user| user.is_active)
        .ok_or(CoreError::InvalidCredentials)?;

    if !verify_password(request.password, user.password_hash.clone()).await {
        tracing::debug!(username = %user.username, "Password mismatch");
        return Err(CoreError::InvalidCredentials.into());
    }
    Ok(user)
}

/// Returns the user's API token, creating one if needed.
async fn get_or_create_api_token(state: &AuthState, user_id: i64) -> Result<ApiToken, AuthError> {
    if let Some(token) = state.tokens.get_token_for_user(user_id).await? {
        return Ok(token);
    }

    let token = ApiToken {
        key: generate_token_key(),
        user_id,
        created: Utc::now(),
    };
    state.tokens.create_token(&token).await?;
    Ok(token)
}

#[axum::debug_handler(state = AuthState)]
async fn obtain_api_token(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiTokenResponse>, AuthError> {
    let user = authenticate(&state, request).await?;
    let token = get_or_create_api_token(&state, user.id).await?;

    Ok(Json(ApiTokenResponse { token: token.key }))
}

#[axum::debug_handler(state = AuthState)]
async fn obtain_token_pair(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let user = authenticate(&state, request).await?;
    Ok(Json(issue_pair(&state.config, user.id)?))
}

#[axum::debug_handler(state = AuthState)]
async fn obtain_wrapped_token_pair(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<PairResponse>, AuthError> {
    let user = authenticate(&state, request).await?;
    let token = issue_pair(&state.config, user.id)?;

    Ok(Json(PairResponse {
        token,
        user: user.username,
        success: true,
    }))
}

#[axum::debug_handler(state = AuthState)]
async fn refresh_access_token(
    State(state): State<AuthState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<AccessResponse>, AuthError> {
    let claims = verify_token(&state.config, &request.refresh, TokenType::Refresh)?;
    let access = issue_token(&state.config, claims.user_id, TokenType::Access)?;

    Ok(Json(AccessResponse { access }))
}

#[axum::debug_handler(state = AuthState)]
async fn register(
    State(state): State<AuthState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validate_registration(&request)?;

    if state
        .users
        .get_user_by_username(&request.username)
        .await?
        .is_some()
    {
        return Err(CoreError::UsernameTaken.into());
    }

    let password_hash = hash_password(request.password, state.config.bcrypt_cost).await?;
    let new_user = NewUser {
        username: request.username,
        email: request.email,
        password_hash,
        first_name: request.first_name,
        last_name: request.last_name,
        date_joined: Utc::now(),
    };

    let user = match state.users.create_user(&new_user).await {
        Ok(user) => user,
        Err(RepositoryError::AlreadyExists { .. }) => return Err(CoreError::UsernameTaken.into()),
        Err(err) => return Err(err.into()),
    };
    let token = get_or_create_api_token(&state, user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "Registered user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            token: token.key,
            username: user.username,
            email: user.email,
        }),
    ))
}

#[axum::debug_handler(state = AuthState)]
async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AuthError> {
    let user = authenticate(&state, request).await?;
    let TokenPair { refresh, access } = issue_pair(&state.config, user.id)?;

    let cookie = Cookie::build((state.config.cookie_name.clone(), access.clone()))
        .path("/")
        .http_only(true)
        .secure(state.config.cookie_secure)
        .same_site(SameSite::Lax)
        .build();

    tracing::info!(user_id = user.id, "User logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            success: true,
            refresh,
            access,
            user: UserSummary::from(&user),
        }),
    ))
}

#[axum::debug_handler(state = AuthState)]
async fn logout(
    State(state): State<AuthState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AuthError> {
    match state.tokens.delete_token_for_user(user.id).await {
        Ok(()) => {}
        Err(RepositoryError::NotFound { .. }) => return Err(CoreError::TokenNotFound.into()),
        Err(err) => return Err(err.into()),
    }

    tracing::info!(user_id = user.id, "User logged out");

    let removal = Cookie::build(state.config.cookie_name.clone())
        .path("/")
        .build();
    Ok((
        jar.remove(removal),
        Json(LogoutResponse {
            success: true,
            detail: "Logged out!",
        }),
    ))
}

#[axum::debug_handler(state = AuthState)]
async fn list_users(State(state): State<AuthState>) -> Result<Json<Vec<User>>, AuthError> {
    Ok(Json(state.users.list_users().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::auth_state;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(state: AuthState) -> Router {
        auth_routes().with_state(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn register_ali(app: &Router) -> Value {
        let response = app
            .clone()
            .oneshot(post_json(
                "/user/register",
                json!({"username": "ali", "password": "s3cret", "email": "ali@example.uz"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn register_returns_token_and_profile() {
        let app = app(auth_state());
        let json = register_ali(&app).await;

        assert_eq!(json["success"], true);
        assert_eq!(json["username"], "ali");
        assert_eq!(json["email"], "ali@example.uz");
        assert_eq!(json["token"].as_str().unwrap().len(), 40);
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let app = app(auth_state());
        register_ali(&app).await;

        let response = app
            .oneshot(post_json(
                "/user/register",
                json!({"username": "ali", "password": "other", "email": "x@example.uz"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Username already taken"})
        );
    }

    #[tokio::test]
    async fn login_returns_tokens_and_user() {
        let app = app(auth_state());
        register_ali(&app).await;

        let response = app
            .oneshot(post_json(
                "/user/login",
                json!({"username": "ali", "password": "s3cret"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("set-cookie").is_some());
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json["refresh"].is_string());
        assert!(json["access"].is_string());
        assert_eq!(
            json["user"],
            json!({"username": "ali", "email": "ali@example.uz", "first_name": "", "last_name": ""})
        );
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let app = app(auth_state());
        register_ali(&app).await;

        let response = app
            .oneshot(post_json(
                "/user/login",
                json!({"username": "ali", "password": "wrong"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({"error": "Invalid credentials"}));
    }

    #[tokio::test]
    async fn logout_deletes_token_once() {
        let app = app(auth_state());
        let registered = register_ali(&app).await;
        let pair = body_json(
            app.clone()
                .oneshot(post_json(
                    "/api/token/access",
                    json!({"username": "ali", "password": "s3cret"}),
                ))
                .await
                .unwrap(),
        )
        .await;
        let access = pair["access"].as_str().unwrap().to_string();

        let logout = |auth: String| {
            Request::builder()
                .method("POST")
                .uri("/user/logout")
                .header("Authorization", auth)
                .body(Body::empty())
                .unwrap()
        };

        let key = registered["token"].as_str().unwrap();
        let response = app
            .clone()
            .oneshot(logout(format!("Token {key}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"success": true, "detail": "Logged out!"})
        );

        // The API token is gone, so authenticate with the JWT instead.
        let response = app.oneshot(logout(format!("Bearer {access}"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({"error": "Token not found"}));
    }

    #[tokio::test]
    async fn api_token_auth_reuses_existing_token() {
        let app = app(auth_state());
        let registered = register_ali(&app).await;

        let response = app
            .oneshot(post_json(
                "/api-token-auth",
                json!({"username": "ali", "password": "s3cret"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["token"], registered["token"]);
    }

    #[tokio::test]
    async fn token_pair_is_wrapped_with_username() {
        let app = app(auth_state());
        register_ali(&app).await;

        let response = app
            .oneshot(post_json(
                "/api/token/pair",
                json!({"username": "ali", "password": "s3cret"}),
            ))
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["user"], "ali");
        assert!(json["token"]["refresh"].is_string());
        assert!(json["token"]["access"].is_string());
    }

    #[tokio::test]
    async fn refresh_issues_new_access_token() {
        let app = app(auth_state());
        register_ali(&app).await;
        let pair = body_json(
            app.clone()
                .oneshot(post_json(
                    "/api/token/access",
                    json!({"username": "ali", "password": "s3cret"}),
                ))
                .await
                .unwrap(),
        )
        .await;

        let response = app
            .clone()
            .oneshot(post_json("/api/token/refresh", json!({"refresh": pair["refresh"]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["access"].is_string());

        // An access token is not a refresh token.
        let response = app
            .oneshot(post_json("/api/token/refresh", json!({"refresh": pair["access"]})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn list_users_hides_password_hash() {
        let app = app(auth_state());
        register_ali(&app).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/user/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let users = json.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["username"], "ali");
        assert!(users[0].get("password_hash").is_none());
    }
}

use std::time::Duration;

const DEFAULT_ACCESS_TTL_SECS: u64 = 5 * 60;
const DEFAULT_REFRESH_TTL_SECS: u64 = 24 * 60 * 60;
const DEV_JWT_SECRET: &str = "texnomart-insecure-dev-secret";

/// Complete auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify JWTs.
    pub jwt_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: u32,
    /// Cookie holding an access JWT for browser clients.
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Creates a configuration with default lifetimes and the given signing secret.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            access_ttl: Duration::from_secs(DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: Duration::from_secs(DEFAULT_REFRESH_TTL_SECS),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cookie_name: "access_token".to_string(),
            cookie_secure: true,
        }
    }

    /// Sets the bcrypt cost. Tests use `bcrypt::MIN_COST` to stay fast.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC signing secret (default: an insecure development value)
    /// - `JWT_ACCESS_TTL_SECONDS`: Access token lifetime (default: 300)
    /// - `JWT_REFRESH_TTL_SECONDS`: Refresh token lifetime (default: 86400)
    /// - `COOKIE_SECURE`: Whether to set secure flag on cookies (default: true)
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET is not set, using an insecure development secret");
            DEV_JWT_SECRET.to_string()
        });

        let access_ttl = env_secs("JWT_ACCESS_TTL_SECONDS", DEFAULT_ACCESS_TTL_SECS);
        let refresh_ttl = env_secs("JWT_REFRESH_TTL_SECONDS", DEFAULT_REFRESH_TTL_SECS);

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Self {
            access_ttl,
            refresh_ttl,
            cookie_secure,
            ..Self::new(jwt_secret)
        }
    }
}

fn env_secs(name: &str, default: u64) -> Duration {
    let secs = std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

use std::path::PathBuf;
use std::{env, time::Duration};

use texnomart_auth::AuthConfig;
use texnomart_core::cache::LIST_CACHE_TTL;

use crate::lifecycle::NotifyMode;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// List cache TTL in seconds (default: 180)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// Path to SQLite database file (default: "texnomart.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Directory holding the deletion archive (default: ".")
    pub base_dir: PathBuf,
    /// Archive file name inside `base_dir` (default: "deleted_data.json")
    pub archive_file: String,
    /// Sender address of creation notices.
    pub notify_from: String,
    /// Fixed notice recipients; empty means every active user with an email.
    pub notify_recipients: Vec<String>,
    pub notify_mode: NotifyMode,
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - List cache TTL in seconds (default: 180)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `SQLITE_PATH` - SQLite database path (default: "texnomart.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `BASE_DIR` - Directory of the deletion archive (default: ".")
    /// - `ARCHIVE_FILE` - Archive file name (default: "deleted_data.json")
    /// - `NOTIFY_FROM` - Notice sender (default: "noreply@texnomart.uz")
    /// - `NOTIFY_RECIPIENTS` - Comma-separated notice recipients (default: all users)
    /// - `NOTIFY_MODE` - `inline` or `queued` (default: inline)
    /// - `JWT_*` / `COOKIE_SECURE` - see [`AuthConfig::from_env`]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok(), AuthConfig::from_env())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, auth: AuthConfig) -> Self {
        let notify_mode = match lookup("NOTIFY_MODE") {
            Some(raw) => raw.parse().unwrap_or_else(|err: String| {
                tracing::warn!(error = %err, "Invalid NOTIFY_MODE, using inline");
                NotifyMode::Inline
            }),
            None => NotifyMode::Inline,
        };

        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(LIST_CACHE_TTL.as_secs()),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10_000),
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "texnomart.db".to_string()),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            base_dir: lookup("BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            archive_file: lookup("ARCHIVE_FILE")
                .unwrap_or_else(|| "deleted_data.json".to_string()),
            notify_from: lookup("NOTIFY_FROM")
                .unwrap_or_else(|| "noreply@texnomart.uz".to_string()),
            notify_recipients: lookup("NOTIFY_RECIPIENTS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|address| !address.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            notify_mode,
            auth,
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Full path of the deletion archive.
    pub fn archive_path(&self) -> PathBuf {
        self.base_dir.join(&self.archive_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned(), AuthConfig::new("test"))
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.cache_ttl(), Duration::from_secs(180));
        assert_eq!(config.cache_max_entries, 10_000);
        assert_eq!(config.sqlite_path, "texnomart.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.archive_path(), PathBuf::from("./deleted_data.json"));
        assert_eq!(config.notify_from, "noreply@texnomart.uz");
        assert_eq!(config.notify_mode, NotifyMode::Inline);
        assert!(config.notify_recipients.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CACHE_TTL_SECONDS", "600"),
            ("BASE_DIR", "/var/lib/texnomart"),
            ("ARCHIVE_FILE", "removed.json"),
            ("NOTIFY_MODE", "queued"),
            ("NOTIFY_RECIPIENTS", "ops@texnomart.uz, ,sales@texnomart.uz"),
        ]);

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert_eq!(
            config.archive_path(),
            PathBuf::from("/var/lib/texnomart/removed.json")
        );
        assert_eq!(config.notify_mode, NotifyMode::Queued);
        assert_eq!(
            config.notify_recipients,
            vec!["ops@texnomart.uz", "sales@texnomart.uz"]
        );
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "soon"), ("NOTIFY_MODE", "pigeon")]);

        assert_eq!(config.cache_ttl_seconds, 180);
        assert_eq!(config.notify_mode, NotifyMode::Inline);
    }
}

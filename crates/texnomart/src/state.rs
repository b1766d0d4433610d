//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Repositories are trait objects layered as
//! `cache -> lifecycle hooks -> storage backend`, and the backend combination
//! is chosen by feature flags.

use std::sync::Arc;

use texnomart_auth::AuthState;
use texnomart_core::cache::Cache;
use texnomart_core::lifecycle::RecipientResolver;
use texnomart_core::storage::{
    AttributeKeyRepository, AttributeValueRepository, CategoryRepository, CommentRepository,
    ImageRepository, OrderRepository, ProductAttributeRepository, ProductRepository,
    TokenRepository, UserRepository,
};

use crate::config::Config;
use crate::lifecycle::{JsonFileArchive, LogSink, Notifier, StaticRecipients, UserRecipients};
use crate::storage::{
    CachedCategoryRepository, CachedProductRepository, CachedUserRepository, Hooks,
    ObservedCategoryRepository, ObservedProductRepository,
};

#[cfg(feature = "inmemory")]
pub const STORAGE_BACKEND: &str = "inmemory";
#[cfg(feature = "sqlite")]
pub const STORAGE_BACKEND: &str = "sqlite";

#[cfg(feature = "memory")]
pub const CACHE_BACKEND: &str = "memory";
#[cfg(feature = "redis")]
pub const CACHE_BACKEND: &str = "redis";

/// Everything a storage backend has to provide.
pub trait Storage:
    CategoryRepository
    + ProductRepository
    + ImageRepository
    + OrderRepository
    + CommentRepository
    + AttributeKeyRepository
    + AttributeValueRepository
    + ProductAttributeRepository
    + UserRepository
    + TokenRepository
    + 'static
{
}

impl<T> Storage for T where
    T: CategoryRepository
        + ProductRepository
        + ImageRepository
        + OrderRepository
        + CommentRepository
        + AttributeKeyRepository
        + AttributeValueRepository
        + ProductAttributeRepository
        + UserRepository
        + TokenRepository
        + 'static
{
}

/// Shared application state.
///
/// This is cloned for each request handler and contains the repository
/// trait objects for database access.
#[derive(Clone)]
pub struct AppState {
    /// Cached listing, archived deletes, announced creates.
    pub categories: Arc<dyn CategoryRepository>,
    /// Cached listing, archived deletes, announced creates.
    pub products: Arc<dyn ProductRepository>,
    pub images: Arc<dyn ImageRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub attribute_keys: Arc<dyn AttributeKeyRepository>,
    pub attribute_values: Arc<dyn AttributeValueRepository>,
    pub product_attributes: Arc<dyn ProductAttributeRepository>,
    /// User and token access for the auth routes and extractors.
    pub auth: AuthState,
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

impl AppState {
    /// Wires the decorators around `storage` and `cache`.
    ///
    /// With `NotifyMode::Queued` this spawns the notification worker, so it
    /// must run inside a Tokio runtime.
    pub fn build<S, C>(storage: Arc<S>, cache: Arc<C>, config: &Config) -> Self
    where
        S: Storage,
        C: Cache + 'static,
    {
        let ttl = config.cache_ttl();

        let recipients: Arc<dyn RecipientResolver> = if config.notify_recipients.is_empty() {
            Arc::new(UserRecipients::new(storage.clone()))
        } else {
            Arc::new(StaticRecipients(config.notify_recipients.clone()))
        };
        let notifier = Notifier::new(
            config.notify_mode,
            config.notify_from.clone(),
            recipients,
            Arc::new(LogSink),
        );
        let archive = JsonFileArchive::new(config.archive_path());
        tracing::debug!(
            archive = %archive.path().display(),
            notify_mode = ?notifier.mode(),
            "Wiring lifecycle hooks"
        );
        let hooks = Hooks::new(Arc::new(archive), notifier);

        let categories = Arc::new(CachedCategoryRepository::new(
            Arc::new(ObservedCategoryRepository::new(storage.clone(), hooks.clone())),
            cache.clone(),
            ttl,
        ));
        let products = Arc::new(CachedProductRepository::new(
            Arc::new(ObservedProductRepository::new(storage.clone(), hooks)),
            cache.clone(),
            ttl,
        ));
        let users = Arc::new(CachedUserRepository::new(storage.clone(), cache, ttl));

        Self {
            categories,
            products,
            images: storage.clone(),
            orders: storage.clone(),
            comments: storage.clone(),
            attribute_keys: storage.clone(),
            attribute_values: storage.clone(),
            product_attributes: storage.clone(),
            auth: AuthState::new(users, storage, config.auth.clone()),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let storage = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            Ok(Self::build(storage, cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let storage = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            Ok(Self::build(storage, cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for local runs without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let storage = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));
            Ok(Self::build(storage, cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let storage = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);
            Ok(Self::build(storage, cache, config))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================

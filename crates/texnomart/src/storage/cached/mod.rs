//! Cached repository decorators.
//!
//! These decorators wrap the listing operations of a repository with the
//! read-through list cache: the full collection is stored under a fixed key
//! (`category_list`, `product_list`, `authentication-list`) for the configured
//! TTL. Writes go straight to the inner repository and never touch the cache,
//! so listings may be stale until the entry expires.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(SqliteRepository::new("texnomart.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let categories = CachedCategoryRepository::new(repo, cache, Duration::from_secs(180));
//! ```

mod catalog;
mod users;

pub use catalog::{CachedCategoryRepository, CachedProductRepository};
pub use users::CachedUserRepository;

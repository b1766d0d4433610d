//! Redis-backed list cache shared by every server instance.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use texnomart_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// [`Cache`] over a Redis server. Expiry is enforced by Redis itself.
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Connects to `url` (e.g. `redis://localhost:6379`).
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        tracing::info!("Connected to Redis cache");
        Ok(Self { manager })
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.manager
            .clone()
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut manager = self.manager.clone();
        let outcome = match ttl {
            // PSETEX rejects a zero expiry
            Some(ttl) => {
                let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
                manager.pset_ex::<_, _, ()>(key, value, millis).await
            }
            None => manager.set::<_, _, ()>(key, value).await,
        };
        outcome.map_err(map_redis_error)
    }
}

//! Cached user repository decorator.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use texnomart_core::auth::{NewUser, User};
use texnomart_core::cache::{get_or_compute, Cache, USER_LIST_KEY};
use texnomart_core::storage::{Result, UserRepository};

/// User repository whose listing is served from the `authentication-list` entry.
///
/// Cached users are stored without their password hash; lookups used for
/// credential checks (`get_user`, `get_user_by_username`) always go to storage.
pub struct CachedUserRepository<R, C>
where
    R: UserRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedUserRepository<R, C>
where
    R: UserRepository,
    C: Cache,
{
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl<R, C> UserRepository for CachedUserRepository<R, C>
where
    R: UserRepository + 'static,
    C: Cache + 'static,
{
    async fn list_users(&self) -> Result<Vec<User>> {
        get_or_compute(self.cache.as_ref(), USER_LIST_KEY, self.ttl, || {
            self.repository.list_users()
        })
        .await
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.repository.get_user(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.get_user_by_username(username).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.repository.create_user(user).await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.repository.update_user(user).await
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use chrono::Utc;

    use super::super::testing::RecordingCache;
    use crate::storage::InMemoryRepository;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@example.uz"),
            password_hash: "$2b$04$secret".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            date_joined: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_cached_listing_omits_password_hash() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(RecordingCache::default());
        let users = CachedUserRepository::new(repo, cache.clone(), Duration::from_secs(180));
        users.create_user(&new_user("ali")).await.unwrap();

        let fresh = users.list_users().await.unwrap();
        assert_eq!(fresh[0].password_hash, "$2b$04$secret");

        let store = cache.store.read().await;
        let (bytes, _) = store.get(USER_LIST_KEY).unwrap();
        let raw = String::from_utf8(bytes.clone()).unwrap();
        assert!(raw.contains("\"username\":\"ali\""));
        assert!(!raw.contains("secret"));
    }

    #[tokio::test]
    async fn test_username_lookup_keeps_password_hash() {
        let repo = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(RecordingCache::default());
        let users = CachedUserRepository::new(repo, cache, Duration::from_secs(180));
        users.create_user(&new_user("vali")).await.unwrap();
        users.list_users().await.unwrap();

        let found = users.get_user_by_username("vali").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "$2b$04$secret");
    }
}

//! Cached category and product repository decorators.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use texnomart_core::cache::{get_or_compute, Cache, CATEGORY_LIST_KEY, PRODUCT_LIST_KEY};
use texnomart_core::catalog::{Category, NewCategory, NewProduct, Product};
use texnomart_core::storage::{CategoryRepository, ProductRepository, Result};

/// Category repository whose full listing is served from the list cache.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedCategoryRepository<R, C>
where
    R: CategoryRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedCategoryRepository<R, C>
where
    R: CategoryRepository,
    C: Cache,
{
    /// Creates a new cached category repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - How long a cached listing stays valid
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
        }
    }
}

#[async_trait]
impl<R, C> CategoryRepository for CachedCategoryRepository<R, C>
where
    R: CategoryRepository + 'static,
    C: Cache + 'static,
{
    async fn list_categories(&self) -> Result<Vec<Category>> {
        get_or_compute(self.cache.as_ref(), CATEGORY_LIST_KEY, self.ttl, || {
            self.repository.list_categories()
        })
        .await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.repository.get_category(id).await
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.repository.get_category_by_slug(slug).await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        self.repository.create_category(category).await
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        self.repository.update_category(category).await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.repository.delete_category(id).await
    }
}

/// Product repository whose full listing is served from the list cache.
///
/// Only `list_products` is cached; per-category listings always hit storage.
pub struct CachedProductRepository<R, C>
where
    R: ProductRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, C> CachedProductRepository<R, C>
where
    R: ProductRepository,
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
impl<R, C> ProductRepository for CachedProductRepository<R, C>
where
    R: ProductRepository + 'static,
    C: Cache + 'static,
{
    async fn list_products(&self) -> Result<Vec<Product>> {
        get_or_compute(self.cache.as_ref(), PRODUCT_LIST_KEY, self.ttl, || {
            self.repository.list_products()
        })
        .await
    }

    async fn list_products_by_category(&self, category_id: i64) -> Result<Vec<Product>> {
        self.repository.list_products_by_category(category_id).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        self.repository.get_product(id).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        self.repository.create_product(product).await
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.repository.update_product(product).await
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.repository.delete_product(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use tokio::sync::RwLock;

    use super::super::testing::RecordingCache;
    use texnomart_core::cache::LIST_CACHE_TTL;
    use texnomart_core::catalog::CategoryRequest;
    use texnomart_core::storage::RepositoryError;

    // Mock repository that counts list calls
    #[derive(Default)]
    struct MockCategoryRepository {
        categories: RwLock<Vec<Category>>,
        list_calls: AtomicUsize,
        fail_list: bool,
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepository {
        async fn list_categories(&self) -> Result<Vec<Category>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list {
                return Err(RepositoryError::ConnectionFailed("db down".to_string()));
            }
            Ok(self.categories.read().await.clone())
        }

        async fn get_category(&self, id: i64) -> Result<Option<Category>> {
            let categories = self.categories.read().await;
            Ok(categories.iter().find(|c| c.id == id).cloned())
        }

        async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
            let categories = self.categories.read().await;
            Ok(categories.iter().find(|c| c.slug == slug).cloned())
        }

        async fn create_category(&self, category: &NewCategory) -> Result<Category> {
            let mut categories = self.categories.write().await;
            let created = Category {
                id: categories.len() as i64 + 1,
                title: category.title.clone(),
                slug: category.slug.clone(),
                image: category.image.clone(),
                created_at: category.created_at,
                updated_at: category.created_at,
            };
            categories.push(created.clone());
            Ok(created)
        }

        async fn update_category(&self, _category: &Category) -> Result<()> {
            Ok(())
        }

        async fn delete_category(&self, id: i64) -> Result<()> {
            self.categories.write().await.retain(|c| c.id != id);
            Ok(())
        }
    }

    fn cached(
        repo: Arc<MockCategoryRepository>,
        cache: Arc<RecordingCache>,
    ) -> CachedCategoryRepository<MockCategoryRepository, RecordingCache> {
        CachedCategoryRepository::new(repo, cache, LIST_CACHE_TTL)
    }

    fn request(title: &str) -> NewCategory {
        CategoryRequest::new(title).into_new(Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_second_listing_is_served_from_cache() {
        let repo = Arc::new(MockCategoryRepository::default());
        let cache = Arc::new(RecordingCache::default());
        let cached = cached(repo.clone(), cache.clone());
        cached.create_category(&request("Phones")).await.unwrap();

        let first = cached.list_categories().await.unwrap();
        let second = cached.list_categories().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 1);

        let store = cache.store.read().await;
        let (_, ttl) = store.get(CATEGORY_LIST_KEY).unwrap();
        assert_eq!(*ttl, Some(LIST_CACHE_TTL));
    }

    #[tokio::test]
    async fn test_writes_do_not_invalidate_listing() {
        let repo = Arc::new(MockCategoryRepository::default());
        let cache = Arc::new(RecordingCache::default());
        let cached = cached(repo.clone(), cache.clone());

        assert!(cached.list_categories().await.unwrap().is_empty());
        cached.create_category(&request("Laptops")).await.unwrap();

        // Stale until the entry expires.
        assert!(cached.list_categories().await.unwrap().is_empty());
        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.set_count(), 1);
    }

    #[cfg(feature = "memory")]
    #[tokio::test]
    async fn test_listing_is_recomputed_after_ttl() {
        let repo = Arc::new(MockCategoryRepository::default());
        let cache = Arc::new(crate::cache::MemoryCache::new(16));
        let cached =
            CachedCategoryRepository::new(repo.clone(), cache, Duration::from_millis(30));

        assert!(cached.list_categories().await.unwrap().is_empty());
        cached.create_category(&request("Laptops")).await.unwrap();
        assert!(cached.list_categories().await.unwrap().is_empty());
        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(60)).await;

        let refreshed = cached.list_categories().await.unwrap();
        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].title, "Laptops");
    }

    #[tokio::test]
    async fn test_storage_failure_is_not_cached() {
        let repo = Arc::new(MockCategoryRepository {
            fail_list: true,
            ..Default::default()
        });
        let cache = Arc::new(RecordingCache::default());
        let cached = cached(repo.clone(), cache.clone());

        assert!(cached.list_categories().await.is_err());
        assert!(cached.list_categories().await.is_err());
        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.set_count(), 0);
    }

    #[tokio::test]
    async fn test_lookups_bypass_cache() {
        let repo = Arc::new(MockCategoryRepository::default());
        let cache = Arc::new(RecordingCache::default());
        let cached = cached(repo.clone(), cache.clone());
        let created = cached.create_category(&request("Smart Home")).await.unwrap();

        let by_slug = cached.get_category_by_slug("smart-home").await.unwrap();
        assert_eq!(by_slug, Some(created));
        assert_eq!(cache.set_count(), 0);
    }
}

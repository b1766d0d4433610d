//! Repository decorators that run the lifecycle hooks.
//!
//! Deletes archive a snapshot of the row (and of every cascaded product) before
//! the storage backend removes it; a failed archive keeps the row. A category
//! delete is archived as one batch. Deletes run one at a time so a row is
//! archived at most once. Creates announce the new row after the insert.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use texnomart_core::catalog::{Category, NewCategory, NewProduct, Product};
use texnomart_core::lifecycle::{snapshot, ArchiveLog, ArchivedRecord, LifecycleError, Watched};
use texnomart_core::storage::{CategoryRepository, ProductRepository, RepositoryError, Result};

use crate::lifecycle::Notifier;

fn hook_failed(err: LifecycleError) -> RepositoryError {
    RepositoryError::HookFailed(err.to_string())
}

/// Shared hook plumbing for the observed decorators.
#[derive(Clone)]
pub struct Hooks {
    archive: Arc<dyn ArchiveLog>,
    notifier: Notifier,
    deletions: Arc<Mutex<()>>,
}

impl Hooks {
    pub fn new(archive: Arc<dyn ArchiveLog>, notifier: Notifier) -> Self {
        Self {
            archive,
            notifier,
            deletions: Arc::new(Mutex::new(())),
        }
    }

    async fn archive(&self, records: &[ArchivedRecord]) -> Result<()> {
        self.archive.append_all(records).await.map_err(|err| {
            tracing::error!(records = records.len(), error = %err, "Archiving failed");
            hook_failed(err)
        })
    }

    async fn announce<W: Watched + Sync>(&self, entity: &W) -> Result<()> {
        self.notifier.announce(entity).await.map_err(|err| {
            tracing::error!(model = W::MODEL, id = entity.id(), error = %err, "Creation notice failed");
            hook_failed(err)
        })
    }
}

/// Category repository that archives on delete and announces on create.
///
/// Needs product access to archive the products a category delete cascades to.
pub struct ObservedCategoryRepository<R>
where
    R: CategoryRepository + ProductRepository,
{
    repository: Arc<R>,
    hooks: Hooks,
}

impl<R> ObservedCategoryRepository<R>
where
    R: CategoryRepository + ProductRepository,
{
    pub fn new(repository: Arc<R>, hooks: Hooks) -> Self {
        Self { repository, hooks }
    }
}

#[async_trait]
impl<R> CategoryRepository for ObservedCategoryRepository<R>
where
    R: CategoryRepository + ProductRepository + 'static,
{
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.repository.list_categories().await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.repository.get_category(id).await
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.repository.get_category_by_slug(slug).await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let created = self.repository.create_category(category).await?;
        tracing::debug!(category_id = created.id, title = %created.title, "Category created");

        self.hooks.announce(&created).await?;
        Ok(created)
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        self.repository.update_category(category).await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let _deleting = self.hooks.deletions.lock().await;

        let category = self
            .repository
            .get_category(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Category", id))?;

        // Cascaded products first, then the category itself.
        let products = self.repository.list_products_by_category(id).await?;
        let records: Vec<_> = products
            .iter()
            .map(snapshot)
            .chain(std::iter::once(snapshot(&category)))
            .collect();
        self.hooks.archive(&records).await?;

        self.repository.delete_category(id).await?;
        tracing::debug!(category_id = id, products = products.len(), "Category deleted");
        Ok(())
    }
}

/// Product repository that archives on delete and announces on create.
pub struct ObservedProductRepository<R>
where
    R: ProductRepository,
{
    repository: Arc<R>,
    hooks: Hooks,
}

impl<R> ObservedProductRepository<R>
where
    R: ProductRepository,
{
    pub fn new(repository: Arc<R>, hooks: Hooks) -> Self {
        Self { repository, hooks }
    }
}

#[async_trait]
impl<R> ProductRepository for ObservedProductRepository<R>
where
    R: ProductRepository + 'static,
{
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.repository.list_products().await
    }

    async fn list_products_by_category(&self, category_id: i64) -> Result<Vec<Product>> {
        self.repository.list_products_by_category(category_id).await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        self.repository.get_product(id).await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let created = self.repository.create_product(product).await?;
        tracing::debug!(product_id = created.id, name = %created.name, "Product created");

        self.hooks.announce(&created).await?;
        Ok(created)
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.repository.update_product(product).await
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        let _deleting = self.hooks.deletions.lock().await;

        let product = self
            .repository
            .get_product(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("Product", id))?;

        self.hooks.archive(&[snapshot(&product)]).await?;
        self.repository.delete_product(id).await?;
        tracing::debug!(product_id = id, "Product deleted");
        Ok(())
    }
}

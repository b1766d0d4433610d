//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use texnomart_core::auth::{ApiToken, NewUser, User};
use texnomart_core::catalog::{
    AttributeKey, AttributeValue, Category, Comment, Image, NewAttributeKey, NewAttributeValue,
    NewCategory, NewComment, NewImage, NewOrder, NewProduct, NewProductAttribute, Order, Product,
    ProductAttribute,
};
use texnomart_core::storage::{
    AttributeKeyRepository, AttributeValueRepository, CategoryRepository, CommentRepository,
    ImageRepository, OrderRepository, ProductAttributeRepository, ProductRepository,
    RepositoryError, Result, TokenRepository, UserRepository,
};

use super::table::Table;

#[derive(Debug)]
struct Store {
    categories: Table<Category>,
    products: Table<Product>,
    images: Table<Image>,
    orders: Table<Order>,
    comments: Table<Comment>,
    attribute_keys: Table<AttributeKey>,
    attribute_values: Table<AttributeValue>,
    product_attributes: Table<ProductAttribute>,
    users: Table<User>,
    /// API tokens keyed by user ID.
    tokens: HashMap<i64, ApiToken>,
}

impl Store {
    fn new() -> Self {
        Self {
            categories: Table::new("Category"),
            products: Table::new("Product"),
            images: Table::new("Image"),
            orders: Table::new("Order"),
            comments: Table::new("Comment"),
            attribute_keys: Table::new("AttributeKey"),
            attribute_values: Table::new("AttributeValue"),
            product_attributes: Table::new("ProductAttribute"),
            users: Table::new("User"),
            tokens: HashMap::new(),
        }
    }

    /// Removes the rows that reference any of `product_ids`.
    fn remove_product_dependents(&mut self, product_ids: &[i64]) {
        let references = |id: Option<i64>| id.is_some_and(|id| product_ids.contains(&id));

        self.images
            .remove_where(|image| product_ids.contains(&image.product_id));
        self.orders.remove_where(|order| references(order.product_id));
        self.comments
            .remove_where(|comment| product_ids.contains(&comment.product_id));
        self.product_attributes
            .remove_where(|attribute| references(attribute.product_id));
    }

    fn ensure_category_title_free(&self, title: &str, except: Option<i64>) -> Result<()> {
        if self
            .categories
            .values()
            .any(|c| c.title == title && Some(c.id) != except)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Category",
                id: title.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_product_slug_free(&self, slug: &str, except: Option<i64>) -> Result<()> {
        if self
            .products
            .values()
            .any(|p| p.slug == slug && Some(p.id) != except)
        {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Product",
                id: slug.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_order_refs(&self, user_id: Option<i64>, product_id: Option<i64>) -> Result<()> {
        if let Some(user_id) = user_id {
            self.users.ensure_exists(user_id)?;
        }
        if let Some(product_id) = product_id {
            self.products.ensure_exists(product_id)?;
        }
        Ok(())
    }

    fn ensure_attribute_refs(&self, attribute: &NewProductAttribute) -> Result<()> {
        if let Some(id) = attribute.attr_key_id {
            self.attribute_keys.ensure_exists(id)?;
        }
        if let Some(id) = attribute.attr_value_id {
            self.attribute_values.ensure_exists(id)?;
        }
        if let Some(id) = attribute.product_id {
            self.products.ensure_exists(id)?;
        }
        Ok(())
    }
}

/// In-memory storage backend.
///
/// All tables live behind one `Arc<RwLock<_>>` so cascading deletes are atomic.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new())),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.store.read().await.categories.list())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        Ok(self.store.read().await.categories.get(id))
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let store = self.store.read().await;
        let found = store.categories.values().find(|c| c.slug == slug).cloned();
        Ok(found)
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let mut store = self.store.write().await;
        store.ensure_category_title_free(&category.title, None)?;
        Ok(store.categories.insert_with(|id| Category {
            id,
            title: category.title.clone(),
            slug: category.slug.clone(),
            image: category.image.clone(),
            created_at: category.created_at,
            updated_at: category.created_at,
        }))
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        let mut store = self.store.write().await;
        store.ensure_category_title_free(&category.title, Some(category.id))?;
        store.categories.replace(category.id, category.clone())
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;
        store.categories.remove(id)?;
        let product_ids = store.products.remove_where(|p| p.category_id == id);
        store.remove_product_dependents(&product_ids);
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.store.read().await.products.list())
    }

    async fn list_products_by_category(&self, category_id: i64) -> Result<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        Ok(self.store.read().await.products.get(id))
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let mut store = self.store.write().await;
        store.categories.ensure_exists(product.category_id)?;
        store.ensure_product_slug_free(&product.slug, None)?;
        Ok(store.products.insert_with(|id| Product {
            id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            category_id: product.category_id,
            description: product.description.clone(),
            price: product.price,
            discount: product.discount,
            quantity: product.quantity,
            primary_image: product.primary_image.clone(),
            created_at: product.created_at,
            updated_at: product.created_at,
        }))
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut store = self.store.write().await;
        store.categories.ensure_exists(product.category_id)?;
        store.ensure_product_slug_free(&product.slug, Some(product.id))?;
        store.products.replace(product.id, product.clone())
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;
        store.products.remove(id)?;
        store.remove_product_dependents(&[id]);
        Ok(())
    }
}

#[async_trait]
impl ImageRepository for InMemoryRepository {
    async fn list_images(&self) -> Result<Vec<Image>> {
        Ok(self.store.read().await.images.list())
    }

    async fn get_image(&self, id: i64) -> Result<Option<Image>> {
        Ok(self.store.read().await.images.get(id))
    }

    async fn create_image(&self, image: &NewImage) -> Result<Image> {
        let mut store = self.store.write().await;
        store.products.ensure_exists(image.product_id)?;
        Ok(store.images.insert_with(|id| Image {
            id,
            image: image.image.clone(),
            product_id: image.product_id,
            is_primary: image.is_primary,
            created_at: image.created_at,
            updated_at: image.created_at,
        }))
    }

    async fn update_image(&self, image: &Image) -> Result<()> {
        let mut store = self.store.write().await;
        store.products.ensure_exists(image.product_id)?;
        store.images.replace(image.id, image.clone())
    }

    async fn delete_image(&self, id: i64) -> Result<()> {
        self.store.write().await.images.remove(id).map(|_| ())
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepository {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.store.read().await.orders.list())
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        Ok(self.store.read().await.orders.get(id))
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let mut store = self.store.write().await;
        store.ensure_order_refs(order.user_id, order.product_id)?;
        Ok(store.orders.insert_with(|id| Order {
            id,
            user_id: order.user_id,
            product_id: order.product_id,
            quantity: order.quantity,
            first_payment: order.first_payment,
            month: order.month,
            created_at: order.created_at,
            updated_at: order.created_at,
        }))
    }

    async fn update_order(&self, order: &Order) -> Result<()> {
        let mut store = self.store.write().await;
        store.ensure_order_refs(order.user_id, order.product_id)?;
        store.orders.replace(order.id, order.clone())
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        self.store.write().await.orders.remove(id).map(|_| ())
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository {
    async fn list_comments(&self) -> Result<Vec<Comment>> {
        Ok(self.store.read().await.comments.list())
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        Ok(self.store.read().await.comments.get(id))
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let mut store = self.store.write().await;
        store.ensure_order_refs(comment.user_id, Some(comment.product_id))?;
        Ok(store.comments.insert_with(|id| Comment {
            id,
            message: comment.message.clone(),
            file: comment.file.clone(),
            product_id: comment.product_id,
            user_id: comment.user_id,
            rating: comment.rating,
            created_at: comment.created_at,
            updated_at: comment.created_at,
        }))
    }

    async fn update_comment(&self, comment: &Comment) -> Result<()> {
        let mut store = self.store.write().await;
        store.ensure_order_refs(comment.user_id, Some(comment.product_id))?;
        store.comments.replace(comment.id, comment.clone())
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        self.store.write().await.comments.remove(id).map(|_| ())
    }
}

#[async_trait]
impl AttributeKeyRepository for InMemoryRepository {
    async fn list_attribute_keys(&self) -> Result<Vec<AttributeKey>> {
        Ok(self.store.read().await.attribute_keys.list())
    }

    async fn get_attribute_key(&self, id: i64) -> Result<Option<AttributeKey>> {
        Ok(self.store.read().await.attribute_keys.get(id))
    }

    async fn create_attribute_key(&self, key: &NewAttributeKey) -> Result<AttributeKey> {
        let mut store = self.store.write().await;
        Ok(store.attribute_keys.insert_with(|id| AttributeKey {
            id,
            key_name: key.key_name.clone(),
        }))
    }

    async fn update_attribute_key(&self, key: &AttributeKey) -> Result<()> {
        self.store
            .write()
            .await
            .attribute_keys
            .replace(key.id, key.clone())
    }

    async fn delete_attribute_key(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;
        store.attribute_keys.remove(id)?;
        store
            .product_attributes
            .remove_where(|a| a.attr_key_id == Some(id));
        Ok(())
    }
}

#[async_trait]
impl AttributeValueRepository for InMemoryRepository {
    async fn list_attribute_values(&self) -> Result<Vec<AttributeValue>> {
        Ok(self.store.read().await.attribute_values.list())
    }

    async fn get_attribute_value(&self, id: i64) -> Result<Option<AttributeValue>> {
        Ok(self.store.read().await.attribute_values.get(id))
    }

    async fn create_attribute_value(&self, value: &NewAttributeValue) -> Result<AttributeValue> {
        let mut store = self.store.write().await;
        Ok(store.attribute_values.insert_with(|id| AttributeValue {
            id,
            value_name: value.value_name.clone(),
            created_at: value.created_at,
            updated_at: value.created_at,
        }))
    }

    async fn update_attribute_value(&self, value: &AttributeValue) -> Result<()> {
        self.store
            .write()
            .await
            .attribute_values
            .replace(value.id, value.clone())
    }

    async fn delete_attribute_value(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;
        store.attribute_values.remove(id)?;
        store
            .product_attributes
            .remove_where(|a| a.attr_value_id == Some(id));
        Ok(())
    }
}

#[async_trait]
impl ProductAttributeRepository for InMemoryRepository {
    async fn list_product_attributes(&self) -> Result<Vec<ProductAttribute>> {
        Ok(self.store.read().await.product_attributes.list())
    }

    async fn get_product_attribute(&self, id: i64) -> Result<Option<ProductAttribute>> {
        Ok(self.store.read().await.product_attributes.get(id))
    }

    async fn create_product_attribute(
        &self,
        attribute: &NewProductAttribute,
    ) -> Result<ProductAttribute> {
        let mut store = self.store.write().await;
        store.ensure_attribute_refs(attribute)?;
        Ok(store.product_attributes.insert_with(|id| ProductAttribute {
            id,
            attr_key_id: attribute.attr_key_id,
            attr_value_id: attribute.attr_value_id,
            product_id: attribute.product_id,
        }))
    }

    async fn update_product_attribute(&self, attribute: &ProductAttribute) -> Result<()> {
        let mut store = self.store.write().await;
        store.ensure_attribute_refs(&NewProductAttribute {
            attr_key_id: attribute.attr_key_id,
            attr_value_id: attribute.attr_value_id,
            product_id: attribute.product_id,
        })?;
        store
            .product_attributes
            .replace(attribute.id, attribute.clone())
    }

    async fn delete_product_attribute(&self, id: i64) -> Result<()> {
        self.store
            .write()
            .await
            .product_attributes
            .remove(id)
            .map(|_| ())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.read().await.users.list())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.store.read().await.users.get(id))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        let found = store.users.values().find(|u| u.username == username).cloned();
        Ok(found)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let mut store = self.store.write().await;
        if store.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.username.clone(),
            });
        }
        Ok(store.users.insert_with(|id| User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: true,
            date_joined: user.date_joined,
            last_login: None,
        }))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.store.write().await.users.replace(user.id, user.clone())
    }
}

#[async_trait]
impl TokenRepository for InMemoryRepository {
    async fn get_token(&self, key: &str) -> Result<Option<ApiToken>> {
        let store = self.store.read().await;
        Ok(store.tokens.values().find(|t| t.key == key).cloned())
    }

    async fn get_token_for_user(&self, user_id: i64) -> Result<Option<ApiToken>> {
        Ok(self.store.read().await.tokens.get(&user_id).cloned())
    }

    async fn create_token(&self, token: &ApiToken) -> Result<()> {
        let mut store = self.store.write().await;
        store.users.ensure_exists(token.user_id)?;
        if store.tokens.contains_key(&token.user_id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Token",
                id: token.user_id.to_string(),
            });
        }
        store.tokens.insert(token.user_id, token.clone());
        Ok(())
    }

    async fn delete_token_for_user(&self, user_id: i64) -> Result<()> {
        self.store
            .write()
            .await
            .tokens
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("Token", user_id))
    }
}

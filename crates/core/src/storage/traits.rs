use async_trait::async_trait;

use crate::auth::{ApiToken, NewUser, User};
use crate::catalog::{
    AttributeKey, AttributeValue, Category, Comment, Image, NewAttributeKey, NewAttributeValue,
    NewCategory, NewComment, NewImage, NewOrder, NewProduct, NewProductAttribute, Order, Product,
    ProductAttribute,
};

use super::Result;

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Lists all categories ordered by ID.
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Gets a category by its ID.
    async fn get_category(&self, id: i64) -> Result<Option<Category>>;

    /// Gets a category by its slug.
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;

    /// Creates a category and returns it with its assigned ID.
    async fn create_category(&self, category: &NewCategory) -> Result<Category>;

    /// Replaces an existing category.
    async fn update_category(&self, category: &Category) -> Result<()>;

    /// Deletes a category and, with it, every product in the category.
    async fn delete_category(&self, id: i64) -> Result<()>;
}

/// Repository for product operations.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Lists all products ordered by ID.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Lists the products of one category ordered by ID.
    async fn list_products_by_category(&self, category_id: i64) -> Result<Vec<Product>>;

    async fn get_product(&self, id: i64) -> Result<Option<Product>>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product>;

    async fn update_product(&self, product: &Product) -> Result<()>;

    async fn delete_product(&self, id: i64) -> Result<()>;
}

/// Repository for product image operations.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn list_images(&self) -> Result<Vec<Image>>;

    async fn get_image(&self, id: i64) -> Result<Option<Image>>;

    async fn create_image(&self, image: &NewImage) -> Result<Image>;

    async fn update_image(&self, image: &Image) -> Result<()>;

    async fn delete_image(&self, id: i64) -> Result<()>;
}

/// Repository for order operations.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list_orders(&self) -> Result<Vec<Order>>;

    async fn get_order(&self, id: i64) -> Result<Option<Order>>;

    async fn create_order(&self, order: &NewOrder) -> Result<Order>;

    async fn update_order(&self, order: &Order) -> Result<()>;

    async fn delete_order(&self, id: i64) -> Result<()>;
}

/// Repository for product review operations.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn list_comments(&self) -> Result<Vec<Comment>>;

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>>;

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;

    async fn update_comment(&self, comment: &Comment) -> Result<()>;

    async fn delete_comment(&self, id: i64) -> Result<()>;
}

/// Repository for attribute names.
#[async_trait]
pub trait AttributeKeyRepository: Send + Sync {
    async fn list_attribute_keys(&self) -> Result<Vec<AttributeKey>>;

    async fn get_attribute_key(&self, id: i64) -> Result<Option<AttributeKey>>;

    async fn create_attribute_key(&self, key: &NewAttributeKey) -> Result<AttributeKey>;

    async fn update_attribute_key(&self, key: &AttributeKey) -> Result<()>;

    async fn delete_attribute_key(&self, id: i64) -> Result<()>;
}

/// Repository for attribute values.
#[async_trait]
pub trait AttributeValueRepository: Send + Sync {
    async fn list_attribute_values(&self) -> Result<Vec<AttributeValue>>;

    async fn get_attribute_value(&self, id: i64) -> Result<Option<AttributeValue>>;

    async fn create_attribute_value(&self, value: &NewAttributeValue) -> Result<AttributeValue>;

    async fn update_attribute_value(&self, value: &AttributeValue) -> Result<()>;

    async fn delete_attribute_value(&self, id: i64) -> Result<()>;
}

/// Repository for product/attribute links.
#[async_trait]
pub trait ProductAttributeRepository: Send + Sync {
    async fn list_product_attributes(&self) -> Result<Vec<ProductAttribute>>;

    async fn get_product_attribute(&self, id: i64) -> Result<Option<ProductAttribute>>;

    async fn create_product_attribute(
        &self,
        attribute: &NewProductAttribute,
    ) -> Result<ProductAttribute>;

    async fn update_product_attribute(&self, attribute: &ProductAttribute) -> Result<()>;

    async fn delete_product_attribute(&self, id: i64) -> Result<()>;
}

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users ordered by ID.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Gets a user by their ID.
    async fn get_user(&self, id: i64) -> Result<Option<User>>;

    /// Gets a user by their username.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Creates a user. Fails with `AlreadyExists` if the username is taken.
    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;
}

/// Repository for opaque API tokens (one per user).
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Gets a token by its key.
    async fn get_token(&self, key: &str) -> Result<Option<ApiToken>>;

    /// Gets the token belonging to a user.
    async fn get_token_for_user(&self, user_id: i64) -> Result<Option<ApiToken>>;

    /// Stores a token. Fails with `AlreadyExists` if the user already has one.
    async fn create_token(&self, token: &ApiToken) -> Result<()>;

    /// Deletes the token belonging to a user. Returns `NotFound` if there is none.
    async fn delete_token_for_user(&self, user_id: i64) -> Result<()>;
}

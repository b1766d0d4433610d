//! SQLite repository implementation.
//!
//! Implements the repository traits from `texnomart_core::storage` using SQLite.

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Row};
use tokio_rusqlite::Connection;

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

use super::conversions::{
    format_datetime, row_to_attribute_key, row_to_attribute_value, row_to_category,
    row_to_comment, row_to_image, row_to_order, row_to_product, row_to_product_attribute,
    row_to_token, row_to_user,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Positional parameters moved into a `conn.call` closure.
type Params = Vec<Value>;

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn fetch_all<T, F>(&self, sql: &'static str, params: Params, map: F) -> Result<Vec<T>>
    where
        T: Send + 'static,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(params_from_iter(params), map)
                    .map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn fetch_optional<T, F>(
        &self,
        sql: &'static str,
        params: Params,
        map: F,
        entity_type: &'static str,
        id: String,
    ) -> Result<Option<T>>
    where
        T: Send + 'static,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql).map_err(wrap_err)?;
                match stmt.query_row(params_from_iter(params), map) {
                    Ok(item) => Ok(Some(item)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id))
    }

    /// Runs an `INSERT` and returns the new row ID.
    async fn insert(
        &self,
        sql: &'static str,
        params: Params,
        entity_type: &'static str,
        label: String,
    ) -> Result<i64> {
        self.conn
            .call(move |conn| {
                conn.execute(sql, params_from_iter(params))
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, label))
    }

    /// Runs an `UPDATE`/`DELETE` that must touch exactly one row.
    async fn execute_one(
        &self,
        sql: &'static str,
        params: Params,
        entity_type: &'static str,
        id: String,
    ) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(sql, params_from_iter(params))
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, entity_type, id))
    }
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn datetime(value: &chrono::DateTime<chrono::Utc>) -> Value {
    Value::Text(format_datetime(value))
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.fetch_all(schema::SELECT_CATEGORIES, vec![], row_to_category)
            .await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>> {
        self.fetch_optional(
            schema::SELECT_CATEGORY_BY_ID,
            vec![id.into()],
            row_to_category,
            "Category",
            id.to_string(),
        )
        .await
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.fetch_optional(
            schema::SELECT_CATEGORY_BY_SLUG,
            vec![text(slug)],
            row_to_category,
            "Category",
            slug.to_string(),
        )
        .await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let id = self
            .insert(
                schema::INSERT_CATEGORY,
                vec![
                    text(&category.title),
                    text(&category.slug),
                    category.image.clone().into(),
                    datetime(&category.created_at),
                ],
                "Category",
                category.title.clone(),
            )
            .await?;

        Ok(Category {
            id,
            title: category.title.clone(),
            slug: category.slug.clone(),
            image: category.image.clone(),
            created_at: category.created_at,
            updated_at: category.created_at,
        })
    }

    async fn update_category(&self, category: &Category) -> Result<()> {
        self.execute_one(
            schema::UPDATE_CATEGORY,
            vec![
                category.id.into(),
                text(&category.title),
                text(&category.slug),
                category.image.clone().into(),
                datetime(&category.updated_at),
            ],
            "Category",
            category.id.to_string(),
        )
        .await
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_CATEGORY,
            vec![id.into()],
            "Category",
            id.to_string(),
        )
        .await
    }
}

// ============================================================================
// ProductRepository implementation
// ============================================================================

#[async_trait]
impl ProductRepository for SqliteRepository {
    async fn list_products(&self) -> Result<Vec<Product>> {
        self.fetch_all(schema::SELECT_PRODUCTS, vec![], row_to_product)
            .await
    }

    async fn list_products_by_category(&self, category_id: i64) -> Result<Vec<Product>> {
        self.fetch_all(
            schema::SELECT_PRODUCTS_BY_CATEGORY,
            vec![category_id.into()],
            row_to_product,
        )
        .await
    }

    async fn get_product(&self, id: i64) -> Result<Option<Product>> {
        self.fetch_optional(
            schema::SELECT_PRODUCT_BY_ID,
            vec![id.into()],
            row_to_product,
            "Product",
            id.to_string(),
        )
        .await
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let id = self
            .insert(
                schema::INSERT_PRODUCT,
                vec![
                    text(&product.name),
                    text(&product.slug),
                    product.category_id.into(),
                    text(&product.description),
                    product.price.into(),
                    product.discount.into(),
                    product.quantity.into(),
                    product.primary_image.clone().into(),
                    datetime(&product.created_at),
                ],
                "Product",
                product.slug.clone(),
            )
            .await?;

        Ok(Product {
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
        })
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        self.execute_one(
            schema::UPDATE_PRODUCT,
            vec![
                product.id.into(),
                text(&product.name),
                text(&product.slug),
                product.category_id.into(),
                text(&product.description),
                product.price.into(),
                product.discount.into(),
                product.quantity.into(),
                product.primary_image.clone().into(),
                datetime(&product.updated_at),
            ],
            "Product",
            product.id.to_string(),
        )
        .await
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_PRODUCT,
            vec![id.into()],
            "Product",
            id.to_string(),
        )
        .await
    }
}

// ============================================================================
// ImageRepository implementation
// ============================================================================

#[async_trait]
impl ImageRepository for SqliteRepository {
    async fn list_images(&self) -> Result<Vec<Image>> {
        self.fetch_all(schema::SELECT_IMAGES, vec![], row_to_image)
            .await
    }

    async fn get_image(&self, id: i64) -> Result<Option<Image>> {
        self.fetch_optional(
            schema::SELECT_IMAGE_BY_ID,
            vec![id.into()],
            row_to_image,
            "Image",
            id.to_string(),
        )
        .await
    }

    async fn create_image(&self, image: &NewImage) -> Result<Image> {
        let id = self
            .insert(
                schema::INSERT_IMAGE,
                vec![
                    text(&image.image),
                    image.product_id.into(),
                    image.is_primary.into(),
                    datetime(&image.created_at),
                ],
                "Image",
                image.image.clone(),
            )
            .await?;

        Ok(Image {
            id,
            image: image.image.clone(),
            product_id: image.product_id,
            is_primary: image.is_primary,
            created_at: image.created_at,
            updated_at: image.created_at,
        })
    }

    async fn update_image(&self, image: &Image) -> Result<()> {
        self.execute_one(
            schema::UPDATE_IMAGE,
            vec![
                image.id.into(),
                text(&image.image),
                image.product_id.into(),
                image.is_primary.into(),
                datetime(&image.updated_at),
            ],
            "Image",
            image.id.to_string(),
        )
        .await
    }

    async fn delete_image(&self, id: i64) -> Result<()> {
        self.execute_one(schema::DELETE_IMAGE, vec![id.into()], "Image", id.to_string())
            .await
    }
}

// ============================================================================
// OrderRepository implementation
// ============================================================================

#[async_trait]
impl OrderRepository for SqliteRepository {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.fetch_all(schema::SELECT_ORDERS, vec![], row_to_order)
            .await
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>> {
        self.fetch_optional(
            schema::SELECT_ORDER_BY_ID,
            vec![id.into()],
            row_to_order,
            "Order",
            id.to_string(),
        )
        .await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        let id = self
            .insert(
                schema::INSERT_ORDER,
                vec![
                    order.user_id.into(),
                    order.product_id.into(),
                    order.quantity.into(),
                    order.first_payment.into(),
                    order.month.into(),
                    datetime(&order.created_at),
                ],
                "Order",
                "new".to_string(),
            )
            .await?;

        Ok(Order {
            id,
            user_id: order.user_id,
            product_id: order.product_id,
            quantity: order.quantity,
            first_payment: order.first_payment,
            month: order.month,
            created_at: order.created_at,
            updated_at: order.created_at,
        })
    }

    async fn update_order(&self, order: &Order) -> Result<()> {
        self.execute_one(
            schema::UPDATE_ORDER,
            vec![
                order.id.into(),
                order.user_id.into(),
                order.product_id.into(),
                order.quantity.into(),
                order.first_payment.into(),
                order.month.into(),
                datetime(&order.updated_at),
            ],
            "Order",
            order.id.to_string(),
        )
        .await
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        self.execute_one(schema::DELETE_ORDER, vec![id.into()], "Order", id.to_string())
            .await
    }
}

// ============================================================================
// CommentRepository implementation
// ============================================================================

#[async_trait]
impl CommentRepository for SqliteRepository {
    async fn list_comments(&self) -> Result<Vec<Comment>> {
        self.fetch_all(schema::SELECT_COMMENTS, vec![], row_to_comment)
            .await
    }

    async fn get_comment(&self, id: i64) -> Result<Option<Comment>> {
        self.fetch_optional(
            schema::SELECT_COMMENT_BY_ID,
            vec![id.into()],
            row_to_comment,
            "Comment",
            id.to_string(),
        )
        .await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let id = self
            .insert(
                schema::INSERT_COMMENT,
                vec![
                    comment.message.clone().into(),
                    comment.file.clone().into(),
                    comment.product_id.into(),
                    comment.user_id.into(),
                    comment.rating.into(),
                    datetime(&comment.created_at),
                ],
                "Comment",
                "new".to_string(),
            )
            .await?;

        Ok(Comment {
            id,
            message: comment.message.clone(),
            file: comment.file.clone(),
            product_id: comment.product_id,
            user_id: comment.user_id,
            rating: comment.rating,
            created_at: comment.created_at,
            updated_at: comment.created_at,
        })
    }

    async fn update_comment(&self, comment: &Comment) -> Result<()> {
        self.execute_one(
            schema::UPDATE_COMMENT,
            vec![
                comment.id.into(),
                comment.message.clone().into(),
                comment.file.clone().into(),
                comment.product_id.into(),
                comment.user_id.into(),
                comment.rating.into(),
                datetime(&comment.updated_at),
            ],
            "Comment",
            comment.id.to_string(),
        )
        .await
    }

    async fn delete_comment(&self, id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_COMMENT,
            vec![id.into()],
            "Comment",
            id.to_string(),
        )
        .await
    }
}

// ============================================================================
// Attribute repositories
// ============================================================================

#[async_trait]
impl AttributeKeyRepository for SqliteRepository {
    async fn list_attribute_keys(&self) -> Result<Vec<AttributeKey>> {
        self.fetch_all(schema::SELECT_ATTRIBUTE_KEYS, vec![], row_to_attribute_key)
            .await
    }

    async fn get_attribute_key(&self, id: i64) -> Result<Option<AttributeKey>> {
        self.fetch_optional(
            schema::SELECT_ATTRIBUTE_KEY_BY_ID,
            vec![id.into()],
            row_to_attribute_key,
            "AttributeKey",
            id.to_string(),
        )
        .await
    }

    async fn create_attribute_key(&self, key: &NewAttributeKey) -> Result<AttributeKey> {
        let id = self
            .insert(
                schema::INSERT_ATTRIBUTE_KEY,
                vec![key.key_name.clone().into()],
                "AttributeKey",
                "new".to_string(),
            )
            .await?;

        Ok(AttributeKey {
            id,
            key_name: key.key_name.clone(),
        })
    }

    async fn update_attribute_key(&self, key: &AttributeKey) -> Result<()> {
        self.execute_one(
            schema::UPDATE_ATTRIBUTE_KEY,
            vec![key.id.into(), key.key_name.clone().into()],
            "AttributeKey",
            key.id.to_string(),
        )
        .await
    }

    async fn delete_attribute_key(&self, id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_ATTRIBUTE_KEY,
            vec![id.into()],
            "AttributeKey",
            id.to_string(),
        )
        .await
    }
}

#[async_trait]
impl AttributeValueRepository for SqliteRepository {
    async fn list_attribute_values(&self) -> Result<Vec<AttributeValue>> {
        self.fetch_all(schema::SELECT_ATTRIBUTE_VALUES, vec![], row_to_attribute_value)
            .await
    }

    async fn get_attribute_value(&self, id: i64) -> Result<Option<AttributeValue>> {
        self.fetch_optional(
            schema::SELECT_ATTRIBUTE_VALUE_BY_ID,
            vec![id.into()],
            row_to_attribute_value,
            "AttributeValue",
            id.to_string(),
        )
        .await
    }

    async fn create_attribute_value(&self, value: &NewAttributeValue) -> Result<AttributeValue> {
        let id = self
            .insert(
                schema::INSERT_ATTRIBUTE_VALUE,
                vec![value.value_name.clone().into(), datetime(&value.created_at)],
                "AttributeValue",
                "new".to_string(),
            )
            .await?;

        Ok(AttributeValue {
            id,
            value_name: value.value_name.clone(),
            created_at: value.created_at,
            updated_at: value.created_at,
        })
    }

    async fn update_attribute_value(&self, value: &AttributeValue) -> Result<()> {
        self.execute_one(
            schema::UPDATE_ATTRIBUTE_VALUE,
            vec![
                value.id.into(),
                value.value_name.clone().into(),
                datetime(&value.updated_at),
            ],
            "AttributeValue",
            value.id.to_string(),
        )
        .await
    }

    async fn delete_attribute_value(&self, id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_ATTRIBUTE_VALUE,
            vec![id.into()],
            "AttributeValue",
            id.to_string(),
        )
        .await
    }
}

#[async_trait]
impl ProductAttributeRepository for SqliteRepository {
    async fn list_product_attributes(&self) -> Result<Vec<ProductAttribute>> {
        self.fetch_all(
            schema::SELECT_PRODUCT_ATTRIBUTES,
            vec![],
            row_to_product_attribute,
        )
        .await
    }

    async fn get_product_attribute(&self, id: i64) -> Result<Option<ProductAttribute>> {
        self.fetch_optional(
            schema::SELECT_PRODUCT_ATTRIBUTE_BY_ID,
            vec![id.into()],
            row_to_product_attribute,
            "ProductAttribute",
            id.to_string(),
        )
        .await
    }

    async fn create_product_attribute(
        &self,
        attribute: &NewProductAttribute,
    ) -> Result<ProductAttribute> {
        let id = self
            .insert(
                schema::INSERT_PRODUCT_ATTRIBUTE,
                vec![
                    attribute.attr_key_id.into(),
                    attribute.attr_value_id.into(),
                    attribute.product_id.into(),
                ],
                "ProductAttribute",
                "new".to_string(),
            )
            .await?;

        Ok(ProductAttribute {
            id,
            attr_key_id: attribute.attr_key_id,
            attr_value_id: attribute.attr_value_id,
            product_id: attribute.product_id,
        })
    }

    async fn update_product_attribute(&self, attribute: &ProductAttribute) -> Result<()> {
        self.execute_one(
            schema::UPDATE_PRODUCT_ATTRIBUTE,
            vec![
                attribute.id.into(),
                attribute.attr_key_id.into(),
                attribute.attr_value_id.into(),
                attribute.product_id.into(),
            ],
            "ProductAttribute",
            attribute.id.to_string(),
        )
        .await
    }

    async fn delete_product_attribute(&self, id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_PRODUCT_ATTRIBUTE,
            vec![id.into()],
            "ProductAttribute",
            id.to_string(),
        )
        .await
    }
}

// ============================================================================
// UserRepository / TokenRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.fetch_all(schema::SELECT_USERS, vec![], row_to_user)
            .await
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.fetch_optional(
            schema::SELECT_USER_BY_ID,
            vec![id.into()],
            row_to_user,
            "User",
            id.to_string(),
        )
        .await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.fetch_optional(
            schema::SELECT_USER_BY_USERNAME,
            vec![text(username)],
            row_to_user,
            "User",
            username.to_string(),
        )
        .await
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let id = self
            .insert(
                schema::INSERT_USER,
                vec![
                    text(&user.username),
                    text(&user.email),
                    text(&user.password_hash),
                    text(&user.first_name),
                    text(&user.last_name),
                    datetime(&user.date_joined),
                ],
                "User",
                user.username.clone(),
            )
            .await?;

        Ok(User {
            id,
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: true,
            date_joined: user.date_joined,
            last_login: None,
        })
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.execute_one(
            schema::UPDATE_USER,
            vec![
                user.id.into(),
                text(&user.username),
                text(&user.email),
                text(&user.password_hash),
                text(&user.first_name),
                text(&user.last_name),
                user.is_active.into(),
                user.last_login.as_ref().map(format_datetime).into(),
            ],
            "User",
            user.id.to_string(),
        )
        .await
    }
}

#[async_trait]
impl TokenRepository for SqliteRepository {
    async fn get_token(&self, key: &str) -> Result<Option<ApiToken>> {
        self.fetch_optional(
            schema::SELECT_TOKEN_BY_KEY,
            vec![text(key)],
            row_to_token,
            "Token",
            key.to_string(),
        )
        .await
    }

    async fn get_token_for_user(&self, user_id: i64) -> Result<Option<ApiToken>> {
        self.fetch_optional(
            schema::SELECT_TOKEN_BY_USER,
            vec![user_id.into()],
            row_to_token,
            "Token",
            user_id.to_string(),
        )
        .await
    }

    async fn create_token(&self, token: &ApiToken) -> Result<()> {
        self.insert(
            schema::INSERT_TOKEN,
            vec![
                text(&token.key),
                token.user_id.into(),
                datetime(&token.created),
            ],
            "Token",
            token.user_id.to_string(),
        )
        .await
        .map(|_| ())
    }

    async fn delete_token_for_user(&self, user_id: i64) -> Result<()> {
        self.execute_one(
            schema::DELETE_TOKEN_BY_USER,
            vec![user_id.into()],
            "Token",
            user_id.to_string(),
        )
        .await
    }
}

//! API request types for catalogue operations.
//!
//! Write payloads are used for both `POST` (create) and `PUT` (full replace).
//! Following the Functional Core pattern, these are pure data types with no I/O;
//! the current time is passed in by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_f64, deserialize_optional_i64, deserialize_optional_string};

use super::error::{CatalogError, Result};
use super::operations::{
    require_slug, resolve_slug, validate_month, validate_product_fields, validate_rating,
    validate_title,
};
use super::types::{
    AttributeKey, AttributeValue, Category, Comment, Image, NewAttributeKey, NewAttributeValue,
    NewCategory, NewComment, NewImage, NewOrder, NewProduct, NewProductAttribute, Order, Product,
    ProductAttribute,
};

fn default_order_quantity() -> u32 {
    1
}

fn default_month() -> u8 {
    3
}

/// Request payload for a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image: Option<String>,
}

impl CategoryRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: None,
            image: None,
        }
    }

    /// Validate and convert into a category ready to be stored.
    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewCategory> {
        validate_title(&self.title)?;
        let slug = resolve_slug(self.slug.as_deref(), &self.title);
        Ok(NewCategory {
            title: self.title,
            slug,
            image: self.image,
            created_at: now,
        })
    }

    /// Replace the writable fields of an existing category.
    ///
    /// Without a slug in the request the stored one is kept; a blank stored
    /// slug is derived from the new title.
    pub fn apply_to(mut self, category: &mut Category, now: DateTime<Utc>) -> Result<()> {
        self.slug = self.slug.or_else(|| Some(category.slug.clone()));
        let new = self.into_new(now)?;
        category.title = new.title;
        category.slug = new.slug;
        category.image = new.image;
        category.updated_at = now;
        Ok(())
    }
}

/// Request payload for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub slug: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub discount: u32,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub primary_image: Option<String>,
}

impl ProductRequest {
    pub fn new(name: impl Into<String>, category_id: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            slug: None,
            category_id,
            description: String::new(),
            price,
            discount: 0,
            quantity: 0,
            primary_image: None,
        }
    }

    pub fn with_discount(mut self, discount: u32) -> Self {
        self.discount = discount;
        self
    }

    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewProduct> {
        validate_product_fields(&self.name, self.price, self.discount)?;
        let slug = require_slug(self.slug.as_deref(), &self.name)?;
        Ok(NewProduct {
            name: self.name,
            slug,
            category_id: self.category_id,
            description: self.description,
            price: self.price,
            discount: self.discount,
            quantity: self.quantity,
            primary_image: self.primary_image,
            created_at: now,
        })
    }

    /// Replace the writable fields of an existing product, keeping its slug
    /// unless the request carries one.
    pub fn apply_to(mut self, product: &mut Product, now: DateTime<Utc>) -> Result<()> {
        self.slug = self.slug.or_else(|| Some(product.slug.clone()));
        let new = self.into_new(now)?;
        product.name = new.name;
        product.slug = new.slug;
        product.category_id = new.category_id;
        product.description = new.description;
        product.price = new.price;
        product.discount = new.discount;
        product.quantity = new.quantity;
        product.primary_image = new.primary_image;
        product.updated_at = now;
        Ok(())
    }
}

/// Request payload for a product image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    pub image: String,
    pub product_id: i64,
    #[serde(default)]
    pub is_primary: bool,
}

impl ImageRequest {
    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewImage> {
        if self.image.trim().is_empty() {
            return Err(CatalogError::EmptyImage);
        }
        Ok(NewImage {
            image: self.image,
            product_id: self.product_id,
            is_primary: self.is_primary,
            created_at: now,
        })
    }

    pub fn apply_to(self, image: &mut Image, now: DateTime<Utc>) -> Result<()> {
        let new = self.into_new(now)?;
        image.image = new.image;
        image.product_id = new.product_id;
        image.is_primary = new.is_primary;
        image.updated_at = now;
        Ok(())
    }
}

/// Request payload for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default = "default_order_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub first_payment: f64,
    #[serde(default = "default_month")]
    pub month: u8,
}

impl OrderRequest {
    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewOrder> {
        validate_month(self.month)?;
        Ok(NewOrder {
            user_id: self.user_id,
            product_id: self.product_id,
            quantity: self.quantity,
            first_payment: self.first_payment,
            month: self.month,
            created_at: now,
        })
    }

    pub fn apply_to(self, order: &mut Order, now: DateTime<Utc>) -> Result<()> {
        let new = self.into_new(now)?;
        order.user_id = new.user_id;
        order.product_id = new.product_id;
        order.quantity = new.quantity;
        order.first_payment = new.first_payment;
        order.month = new.month;
        order.updated_at = now;
        Ok(())
    }
}

/// Request payload for a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub file: Option<String>,
    pub product_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub rating: u8,
}

impl CommentRequest {
    pub fn into_new(self, now: DateTime<Utc>) -> Result<NewComment> {
        validate_rating(self.rating)?;
        Ok(NewComment {
            message: self.message,
            file: self.file,
            product_id: self.product_id,
            user_id: self.user_id,
            rating: self.rating,
            created_at: now,
        })
    }

    pub fn apply_to(self, comment: &mut Comment, now: DateTime<Utc>) -> Result<()> {
        let new = self.into_new(now)?;
        comment.message = new.message;
        comment.file = new.file;
        comment.product_id = new.product_id;
        comment.user_id = new.user_id;
        comment.rating = new.rating;
        comment.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeKeyRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub key_name: Option<String>,
}

impl AttributeKeyRequest {
    pub fn into_new(self) -> NewAttributeKey {
        NewAttributeKey {
            key_name: self.key_name,
        }
    }

    pub fn apply_to(self, key: &mut AttributeKey) {
        key.key_name = self.key_name;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeValueRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub value_name: Option<String>,
}

impl AttributeValueRequest {
    pub fn into_new(self, now: DateTime<Utc>) -> NewAttributeValue {
        NewAttributeValue {
            value_name: self.value_name,
            created_at: now,
        }
    }

    pub fn apply_to(self, value: &mut AttributeValue, now: DateTime<Utc>) {
        value.value_name = self.value_name;
        value.updated_at = now;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductAttributeRequest {
    #[serde(default)]
    pub attr_key_id: Option<i64>,
    #[serde(default)]
    pub attr_value_id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
}

impl ProductAttributeRequest {
    pub fn into_new(self) -> NewProductAttribute {
        NewProductAttribute {
            attr_key_id: self.attr_key_id,
            attr_value_id: self.attr_value_id,
            product_id: self.product_id,
        }
    }

    pub fn apply_to(self, attribute: &mut ProductAttribute) {
        attribute.attr_key_id = self.attr_key_id;
        attribute.attr_value_id = self.attr_value_id;
        attribute.product_id = self.product_id;
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCategoriesQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

/// Query parameters for listing products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListProductsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
}

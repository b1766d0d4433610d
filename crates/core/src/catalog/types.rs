use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// Path of the uploaded category image, if any.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub title: String,
    pub slug: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A product for sale inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub category_id: i64,
    pub description: String,
    pub price: f64,
    /// Discount in percent (0..=100).
    pub discount: u32,
    pub quantity: u32,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price after applying the discount percentage.
    pub fn discounted_price(&self) -> f64 {
        super::operations::discounted_price(self.price, self.discount)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub category_id: i64,
    pub description: String,
    pub price: f64,
    pub discount: u32,
    pub quantity: u32,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub image: String,
    pub product_id: i64,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImage {
    pub image: String,
    pub product_id: i64,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// An instalment order placed by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: u32,
    pub first_payment: f64,
    /// Instalment period in months (3..=12).
    pub month: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: Option<i64>,
    pub product_id: Option<i64>,
    pub quantity: u32,
    pub first_payment: f64,
    pub month: u8,
    pub created_at: DateTime<Utc>,
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub message: Option<String>,
    pub file: Option<String>,
    pub product_id: i64,
    pub user_id: Option<i64>,
    /// Star rating (0..=5).
    pub rating: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub message: Option<String>,
    pub file: Option<String>,
    pub product_id: i64,
    pub user_id: Option<i64>,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

/// Name of a product attribute, e.g. "Color".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeKey {
    pub id: i64,
    pub key_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttributeKey {
    pub key_name: Option<String>,
}

/// Value of a product attribute, e.g. "Black".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: i64,
    pub value_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttributeValue {
    pub value_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Links an attribute key and value to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub id: i64,
    pub attr_key_id: Option<i64>,
    pub attr_value_id: Option<i64>,
    pub product_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductAttribute {
    pub attr_key_id: Option<i64>,
    pub attr_value_id: Option<i64>,
    pub product_id: Option<i64>,
}

/// Order together with its derived instalment amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    /// `None` when the order has no product attached.
    pub monthly_payment: Option<f64>,
}

/// Product together with its derived price after discount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub discounted_price: f64,
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        let discounted_price = product.discounted_price();
        Self {
            product,
            discounted_price,
        }
    }
}

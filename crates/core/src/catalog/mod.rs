mod error;
mod operations;
mod requests;
mod types;

pub use error::{CatalogError, Result};
pub use operations::{
    discounted_price, filter_categories, filter_products, matches_search, monthly_payment,
    require_slug, resolve_slug, slugify, validate_month, validate_product_fields, validate_rating,
    validate_title, with_primary_images,
};
pub use requests::{
    AttributeKeyRequest, AttributeValueRequest, CategoryRequest, CommentRequest, ImageRequest,
    ListCategoriesQuery, ListProductsQuery, OrderRequest, ProductAttributeRequest, ProductRequest,
};
pub use types::{
    AttributeKey, AttributeValue, Category, Comment, Image, NewAttributeKey, NewAttributeValue,
    NewCategory, NewComment, NewImage, NewOrder, NewProduct, NewProductAttribute, Order,
    OrderDetail, Product, ProductAttribute, ProductDetail,
};

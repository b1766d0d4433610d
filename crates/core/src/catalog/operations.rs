use unicode_normalization::UnicodeNormalization;

use super::error::{CatalogError, Result};
use super::requests::{ListCategoriesQuery, ListProductsQuery};
use super::types::{Category, Image, Product};

/// Converts text into a URL slug.
///
/// Decomposes the text (NFKD) and keeps only its ASCII part, so accented
/// letters lose their marks and non-Latin scripts vanish. Then lowercases,
/// drops everything that is not a word character, whitespace or hyphen,
/// collapses runs of whitespace and hyphens into a single hyphen and trims
/// leading/trailing hyphens and underscores.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for c in value.nfkd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else if c == '-' || c.is_ascii_whitespace() {
            pending_separator = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Returns the explicit slug when given, otherwise derives one from `source`.
///
/// The derived slug may be empty when `source` has no ASCII-representable text.
pub fn resolve_slug(explicit: Option<&str>, source: &str) -> String {
    match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(source),
    }
}

/// Like [`resolve_slug`], but rejects an empty result.
pub fn require_slug(explicit: Option<&str>, source: &str) -> Result<String> {
    let slug = resolve_slug(explicit, source);
    if slug.is_empty() {
        return Err(CatalogError::EmptySlug(source.to_string()));
    }
    Ok(slug)
}

/// Price after applying a percentage discount. A zero discount keeps the price.
pub fn discounted_price(price: f64, discount: u32) -> f64 {
    if discount == 0 {
        price
    } else {
        price * (1.0 - f64::from(discount) / 100.0)
    }
}

/// Monthly instalment for a product price, floored to a whole amount.
pub fn monthly_payment(price: f64, month: u8) -> f64 {
    (price / f64::from(month)).floor()
}

pub fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(CatalogError::EmptyTitle);
    }
    if title.chars().count() > 100 {
        return Err(CatalogError::TitleTooLong);
    }
    Ok(())
}

pub fn validate_product_fields(name: &str, price: f64, discount: u32) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::EmptyName);
    }
    if name.chars().count() > 100 {
        return Err(CatalogError::NameTooLong);
    }
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::InvalidPrice);
    }
    if discount > 100 {
        return Err(CatalogError::DiscountOutOfRange(discount));
    }
    Ok(())
}

pub fn validate_month(month: u8) -> Result<()> {
    if !(3..=12).contains(&month) {
        return Err(CatalogError::MonthOutOfRange(month));
    }
    Ok(())
}

pub fn validate_rating(rating: u8) -> Result<()> {
    if rating > 5 {
        return Err(CatalogError::RatingOutOfRange(rating));
    }
    Ok(())
}

/// Case-insensitive search: every whitespace or comma separated term must
/// appear in at least one of `fields`.
pub fn matches_search(fields: &[&str], search: &str) -> bool {
    let fields: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
    search
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .all(|term| fields.iter().any(|field| field.contains(&term)))
}

/// Applies list query parameters to categories.
pub fn filter_categories(categories: &[Category], query: &ListCategoriesQuery) -> Vec<Category> {
    categories
        .iter()
        .filter(|c| query.title.as_ref().is_none_or(|t| &c.title == t))
        .filter(|c| {
            query
                .search
                .as_ref()
                .is_none_or(|s| matches_search(&[&c.title, &c.slug], s))
        })
        .cloned()
        .collect()
}

/// Applies list query parameters to products.
pub fn filter_products(products: &[Product], query: &ListProductsQuery) -> Vec<Product> {
    products
        .iter()
        .filter(|p| query.category.is_none_or(|id| p.category_id == id))
        .filter(|p| query.price.is_none_or(|price| p.price == price))
        .filter(|p| {
            query
                .search
                .as_ref()
                .is_none_or(|s| matches_search(&[&p.name, &p.slug], s))
        })
        .cloned()
        .collect()
}

/// Replaces each product's `primary_image` with the path of its first image
/// flagged as primary, or `None` when it has none.
pub fn with_primary_images(products: Vec<Product>, images: &[Image]) -> Vec<Product> {
    products
        .into_iter()
        .map(|mut product| {
            product.primary_image = images
                .iter()
                .filter(|img| img.product_id == product.id && img.is_primary)
                .min_by_key(|img| img.id)
                .map(|img| img.image.clone());
            product
        })
        .collect()
}

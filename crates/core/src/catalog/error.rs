use thiserror::Error;

/// Errors that can occur when validating catalogue records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Category title cannot be empty")]
    EmptyTitle,
    #[error("Category title too long (max 100 characters)")]
    TitleTooLong,
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Product name too long (max 100 characters)")]
    NameTooLong,
    #[error("Cannot derive a slug from {0:?}")]
    EmptySlug(String),
    #[error("Price must be a non-negative number")]
    InvalidPrice,
    #[error("Discount must be between 0 and 100, got {0}")]
    DiscountOutOfRange(u32),
    #[error("Month must be between 3 and 12, got {0}")]
    MonthOutOfRange(u8),
    #[error("Rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("Image path cannot be empty")]
    EmptyImage,
}

/// Result type for catalogue validation.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::EmptyTitle.to_string(),
            "Category title cannot be empty"
        );
        assert_eq!(
            CatalogError::MonthOutOfRange(13).to_string(),
            "Month must be between 3 and 12, got 13"
        );
        assert_eq!(
            CatalogError::EmptySlug("!!!".to_string()).to_string(),
            "Cannot derive a slug from \"!!!\""
        );
    }
}

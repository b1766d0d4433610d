use std::time::Duration;

/// Cache key for the full category list.
pub const CATEGORY_LIST_KEY: &str = "category_list";

/// Cache key for the full product list.
pub const PRODUCT_LIST_KEY: &str = "product_list";

/// Cache key for the full user list.
pub const USER_LIST_KEY: &str = "authentication-list";

/// Lifetime of a cached collection listing.
pub const LIST_CACHE_TTL: Duration = Duration::from_secs(60 * 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_keys_are_distinct() {
        assert_ne!(CATEGORY_LIST_KEY, PRODUCT_LIST_KEY);
        assert_ne!(PRODUCT_LIST_KEY, USER_LIST_KEY);
        assert_ne!(CATEGORY_LIST_KEY, USER_LIST_KEY);
    }

    #[test]
    fn test_list_ttl_is_three_minutes() {
        assert_eq!(LIST_CACHE_TTL.as_secs(), 180);
    }
}

//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! Column order in each `row_to_*` matches the `SELECT` constants in `schema`.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use texnomart_core::auth::{ApiToken, User};
use texnomart_core::catalog::{
    AttributeKey, AttributeValue, Category, Comment, Image, Order, Product, ProductAttribute,
};

/// Expected columns: id, title, slug, image, created_at, updated_at
pub fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        image: row.get(3)?,
        created_at: datetime_column(row, 4)?,
        updated_at: datetime_column(row, 5)?,
    })
}

/// Expected columns: id, name, slug, category_id, description, price,
/// discount, quantity, primary_image, created_at, updated_at
pub fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        category_id: row.get(3)?,
        description: row.get(4)?,
        price: row.get(5)?,
        discount: row.get(6)?,
        quantity: row.get(7)?,
        primary_image: row.get(8)?,
        created_at: datetime_column(row, 9)?,
        updated_at: datetime_column(row, 10)?,
    })
}

/// Expected columns: id, image, product_id, is_primary, created_at, updated_at
pub fn row_to_image(row: &Row) -> rusqlite::Result<Image> {
    Ok(Image {
        id: row.get(0)?,
        image: row.get(1)?,
        product_id: row.get(2)?,
        is_primary: row.get(3)?,
        created_at: datetime_column(row, 4)?,
        updated_at: datetime_column(row, 5)?,
    })
}

/// Expected columns: id, user_id, product_id, quantity, first_payment, month,
/// created_at, updated_at
pub fn row_to_order(row: &Row) -> rusqlite::Result<Order> {
    Ok(Order {
        id: row.get(0)?,
        user_id: row.get(1)?,
        product_id: row.get(2)?,
        quantity: row.get(3)?,
        first_payment: row.get(4)?,
        month: row.get(5)?,
        created_at: datetime_column(row, 6)?,
        updated_at: datetime_column(row, 7)?,
    })
}

/// Expected columns: id, message, file, product_id, user_id, rating,
/// created_at, updated_at
pub fn row_to_comment(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        message: row.get(1)?,
        file: row.get(2)?,
        product_id: row.get(3)?,
        user_id: row.get(4)?,
        rating: row.get(5)?,
        created_at: datetime_column(row, 6)?,
        updated_at: datetime_column(row, 7)?,
    })
}

pub fn row_to_attribute_key(row: &Row) -> rusqlite::Result<AttributeKey> {
    Ok(AttributeKey {
        id: row.get(0)?,
        key_name: row.get(1)?,
    })
}

pub fn row_to_attribute_value(row: &Row) -> rusqlite::Result<AttributeValue> {
    Ok(AttributeValue {
        id: row.get(0)?,
        value_name: row.get(1)?,
        created_at: datetime_column(row, 2)?,
        updated_at: datetime_column(row, 3)?,
    })
}

pub fn row_to_product_attribute(row: &Row) -> rusqlite::Result<ProductAttribute> {
    Ok(ProductAttribute {
        id: row.get(0)?,
        attr_key_id: row.get(1)?,
        attr_value_id: row.get(2)?,
        product_id: row.get(3)?,
    })
}

/// Expected columns: id, username, email, password_hash, first_name,
/// last_name, is_active, date_joined, last_login
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let last_login: Option<String> = row.get(8)?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        is_active: row.get(6)?,
        date_joined: datetime_column(row, 7)?,
        last_login: last_login
            .map(|value| parse_datetime(8, &value))
            .transpose()?,
    })
}

/// Expected columns: key, user_id, created
pub fn row_to_token(row: &Row) -> rusqlite::Result<ApiToken> {
    Ok(ApiToken {
        key: row.get(0)?,
        user_id: row.get(1)?,
        created: datetime_column(row, 2)?,
    })
}

fn datetime_column(row: &Row, index: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(index)?;
    parse_datetime(index, &value)
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(index: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_round_trips_through_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let formatted = format_datetime(&dt);

        assert_eq!(formatted, "2024-06-15T10:30:00+00:00");
        assert_eq!(parse_datetime(0, &formatted).unwrap(), dt);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let result = parse_datetime(4, "yesterday");
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(4, _, _))
        ));
    }

    #[test]
    fn test_row_to_category_reads_columns_in_order() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let category = conn
            .query_row(
                "SELECT 3, 'Phones', 'phones', NULL, '2024-06-15T10:30:00+00:00', '2024-06-16T08:00:00+00:00'",
                [],
                row_to_category,
            )
            .unwrap();

        assert_eq!(category.id, 3);
        assert_eq!(category.slug, "phones");
        assert_eq!(category.image, None);
        assert!(category.updated_at > category.created_at);
    }

    #[test]
    fn test_row_to_user_handles_missing_last_login() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let user = conn
            .query_row(
                "SELECT 1, 'ali', 'ali@example.uz', 'hash', '', '', 1, '2024-06-15T10:30:00+00:00', NULL",
                [],
                row_to_user,
            )
            .unwrap();

        assert!(user.is_active);
        assert_eq!(user.last_login, None);
    }
}

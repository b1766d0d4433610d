//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Every list query orders by `id` so results match the
//! in-memory backend.

/// SQL statement to create all tables.
///
/// Foreign keys are enforced per connection, so the pragma lives here too.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    is_active INTEGER NOT NULL,
    date_joined TEXT NOT NULL,
    last_login TEXT
);

CREATE TABLE IF NOT EXISTS auth_tokens (
    key TEXT PRIMARY KEY,
    user_id INTEGER NOT NULL UNIQUE,
    created TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL UNIQUE,
    slug TEXT NOT NULL,
    image TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    category_id INTEGER NOT NULL,
    description TEXT NOT NULL,
    price REAL NOT NULL,
    discount INTEGER NOT NULL,
    quantity INTEGER NOT NULL,
    primary_image TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS images (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    image TEXT NOT NULL,
    product_id INTEGER NOT NULL,
    is_primary INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS orders (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER,
    product_id INTEGER,
    quantity INTEGER NOT NULL,
    first_payment REAL NOT NULL,
    month INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT,
    file TEXT,
    product_id INTEGER NOT NULL,
    user_id INTEGER,
    rating INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS attribute_keys (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key_name TEXT
);

CREATE TABLE IF NOT EXISTS attribute_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    value_name TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS product_attributes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    attr_key_id INTEGER,
    attr_value_id INTEGER,
    product_id INTEGER,
    FOREIGN KEY (attr_key_id) REFERENCES attribute_keys(id) ON DELETE CASCADE,
    FOREIGN KEY (attr_value_id) REFERENCES attribute_values(id) ON DELETE CASCADE,
    FOREIGN KEY (product_id) REFERENCES products(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id);
CREATE INDEX IF NOT EXISTS idx_categories_slug ON categories(slug);
CREATE INDEX IF NOT EXISTS idx_images_product_id ON images(product_id);
"#;

// Category queries
pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (title, slug, image, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?4)
"#;

pub const SELECT_CATEGORIES: &str = r#"
SELECT id, title, slug, image, created_at, updated_at
FROM categories
ORDER BY id
"#;

pub const SELECT_CATEGORY_BY_ID: &str = r#"
SELECT id, title, slug, image, created_at, updated_at
FROM categories
WHERE id = ?1
"#;

pub const SELECT_CATEGORY_BY_SLUG: &str = r#"
SELECT id, title, slug, image, created_at, updated_at
FROM categories
WHERE slug = ?1
ORDER BY id
LIMIT 1
"#;

pub const UPDATE_CATEGORY: &str = r#"
UPDATE categories
SET title = ?2, slug = ?3, image = ?4, updated_at = ?5
WHERE id = ?1
"#;

pub const DELETE_CATEGORY: &str = "DELETE FROM categories WHERE id = ?1";

// Product queries
pub const INSERT_PRODUCT: &str = r#"
INSERT INTO products (name, slug, category_id, description, price, discount, quantity, primary_image, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
"#;

pub const SELECT_PRODUCTS: &str = r#"
SELECT id, name, slug, category_id, description, price, discount, quantity, primary_image, created_at, updated_at
FROM products
ORDER BY id
"#;

pub const SELECT_PRODUCTS_BY_CATEGORY: &str = r#"
SELECT id, name, slug, category_id, description, price, discount, quantity, primary_image, created_at, updated_at
FROM products
WHERE category_id = ?1
ORDER BY id
"#;

pub const SELECT_PRODUCT_BY_ID: &str = r#"
SELECT id, name, slug, category_id, description, price, discount, quantity, primary_image, created_at, updated_at
FROM products
WHERE id = ?1
"#;

pub const UPDATE_PRODUCT: &str = r#"
UPDATE products
SET name = ?2, slug = ?3, category_id = ?4, description = ?5, price = ?6,
    discount = ?7, quantity = ?8, primary_image = ?9, updated_at = ?10
WHERE id = ?1
"#;

pub const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = ?1";

// Image queries
pub const INSERT_IMAGE: &str = r#"
INSERT INTO images (image, product_id, is_primary, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?4)
"#;

pub const SELECT_IMAGES: &str = r#"
SELECT id, image, product_id, is_primary, created_at, updated_at
FROM images
ORDER BY id
"#;

pub const SELECT_IMAGE_BY_ID: &str = r#"
SELECT id, image, product_id, is_primary, created_at, updated_at
FROM images
WHERE id = ?1
"#;

pub const UPDATE_IMAGE: &str = r#"
UPDATE images
SET image = ?2, product_id = ?3, is_primary = ?4, updated_at = ?5
WHERE id = ?1
"#;

pub const DELETE_IMAGE: &str = "DELETE FROM images WHERE id = ?1";

// Order queries
pub const INSERT_ORDER: &str = r#"
INSERT INTO orders (user_id, product_id, quantity, first_payment, month, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
"#;

pub const SELECT_ORDERS: &str = r#"
SELECT id, user_id, product_id, quantity, first_payment, month, created_at, updated_at
FROM orders
ORDER BY id
"#;

pub const SELECT_ORDER_BY_ID: &str = r#"
SELECT id, user_id, product_id, quantity, first_payment, month, created_at, updated_at
FROM orders
WHERE id = ?1
"#;

pub const UPDATE_ORDER: &str = r#"
UPDATE orders
SET user_id = ?2, product_id = ?3, quantity = ?4, first_payment = ?5, month = ?6, updated_at = ?7
WHERE id = ?1
"#;

pub const DELETE_ORDER: &str = "DELETE FROM orders WHERE id = ?1";

// Comment queries
pub const INSERT_COMMENT: &str = r#"
INSERT INTO comments (message, file, product_id, user_id, rating, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
"#;

pub const SELECT_COMMENTS: &str = r#"
SELECT id, message, file, product_id, user_id, rating, created_at, updated_at
FROM comments
ORDER BY id
"#;

pub const SELECT_COMMENT_BY_ID: &str = r#"
SELECT id, message, file, product_id, user_id, rating, created_at, updated_at
FROM comments
WHERE id = ?1
"#;

pub const UPDATE_COMMENT: &str = r#"
UPDATE comments
SET message = ?2, file = ?3, product_id = ?4, user_id = ?5, rating = ?6, updated_at = ?7
WHERE id = ?1
"#;

pub const DELETE_COMMENT: &str = "DELETE FROM comments WHERE id = ?1";

// Attribute queries
pub const INSERT_ATTRIBUTE_KEY: &str = "INSERT INTO attribute_keys (key_name) VALUES (?1)";

pub const SELECT_ATTRIBUTE_KEYS: &str = "SELECT id, key_name FROM attribute_keys ORDER BY id";

pub const SELECT_ATTRIBUTE_KEY_BY_ID: &str = "SELECT id, key_name FROM attribute_keys WHERE id = ?1";

pub const UPDATE_ATTRIBUTE_KEY: &str = "UPDATE attribute_keys SET key_name = ?2 WHERE id = ?1";

pub const DELETE_ATTRIBUTE_KEY: &str = "DELETE FROM attribute_keys WHERE id = ?1";

pub const INSERT_ATTRIBUTE_VALUE: &str = r#"
INSERT INTO attribute_values (value_name, created_at, updated_at)
VALUES (?1, ?2, ?2)
"#;

pub const SELECT_ATTRIBUTE_VALUES: &str = r#"
SELECT id, value_name, created_at, updated_at
FROM attribute_values
ORDER BY id
"#;

pub const SELECT_ATTRIBUTE_VALUE_BY_ID: &str = r#"
SELECT id, value_name, created_at, updated_at
FROM attribute_values
WHERE id = ?1
"#;

pub const UPDATE_ATTRIBUTE_VALUE: &str = r#"
UPDATE attribute_values
SET value_name = ?2, updated_at = ?3
WHERE id = ?1
"#;

pub const DELETE_ATTRIBUTE_VALUE: &str = "DELETE FROM attribute_values WHERE id = ?1";

pub const INSERT_PRODUCT_ATTRIBUTE: &str = r#"
INSERT INTO product_attributes (attr_key_id, attr_value_id, product_id)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_PRODUCT_ATTRIBUTES: &str = r#"
SELECT id, attr_key_id, attr_value_id, product_id
FROM product_attributes
ORDER BY id
"#;

pub const SELECT_PRODUCT_ATTRIBUTE_BY_ID: &str = r#"
SELECT id, attr_key_id, attr_value_id, product_id
FROM product_attributes
WHERE id = ?1
"#;

pub const UPDATE_PRODUCT_ATTRIBUTE: &str = r#"
UPDATE product_attributes
SET attr_key_id = ?2, attr_value_id = ?3, product_id = ?4
WHERE id = ?1
"#;

pub const DELETE_PRODUCT_ATTRIBUTE: &str = "DELETE FROM product_attributes WHERE id = ?1";

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (username, email, password_hash, first_name, last_name, is_active, date_joined)
VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6)
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, username, email, password_hash, first_name, last_name, is_active, date_joined, last_login
FROM users
ORDER BY id
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, username, email, password_hash, first_name, last_name, is_active, date_joined, last_login
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_USERNAME: &str = r#"
SELECT id, username, email, password_hash, first_name, last_name, is_active, date_joined, last_login
FROM users
WHERE username = ?1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET username = ?2, email = ?3, password_hash = ?4, first_name = ?5, last_name = ?6,
    is_active = ?7, last_login = ?8
WHERE id = ?1
"#;

// Token queries
pub const INSERT_TOKEN: &str = r#"
INSERT INTO auth_tokens (key, user_id, created)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_TOKEN_BY_KEY: &str = "SELECT key, user_id, created FROM auth_tokens WHERE key = ?1";

pub const SELECT_TOKEN_BY_USER: &str =
    "SELECT key, user_id, created FROM auth_tokens WHERE user_id = ?1";

pub const DELETE_TOKEN_BY_USER: &str = "DELETE FROM auth_tokens WHERE user_id = ?1";

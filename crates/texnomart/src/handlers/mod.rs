pub mod attributes;
pub mod categories;
pub mod comments;
pub mod error;
pub mod health;
pub mod images;
pub mod orders;
pub mod products;

pub use error::AppError;

//! Shared cache backend (feature `redis`).

mod cache;
mod error;

pub use cache::RedisCache;

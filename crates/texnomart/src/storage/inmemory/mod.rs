//! In-memory storage backend for testing and development.
//!
//! This module provides an in-memory implementation of the repository traits
//! that keeps all rows in ordered maps behind a single `Arc<RwLock<_>>`.
//! Data is not persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use texnomart::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! let category = repo.create_category(&new_category).await?;
//! ```

mod repository;
mod table;

pub use repository::InMemoryRepository;

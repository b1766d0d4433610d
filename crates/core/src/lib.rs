//! Functional core for texnomart.
//!
//! Domain types, request payloads, pure operations and the traits that the
//! server crate implements for storage, caching and lifecycle side effects.

pub mod auth;
pub mod cache;
pub mod catalog;
pub mod lifecycle;
pub mod serde;
pub mod storage;

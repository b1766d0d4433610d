//! Single-process cache backend (feature `memory`).

mod cache;

pub use cache::MemoryCache;

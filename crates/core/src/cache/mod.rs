mod error;
mod keys;
mod read_through;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{CATEGORY_LIST_KEY, LIST_CACHE_TTL, PRODUCT_LIST_KEY, USER_LIST_KEY};
pub use read_through::get_or_compute;
pub use serialization::{deserialize_value, serialize_value, SerializationError};
pub use traits::Cache;

use texnomart_core::cache::CacheError;

/// Connection-level failures become `ConnectionFailed`; everything else is
/// an `OperationFailed`.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    let lost_connection =
        err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout();
    if lost_connection {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

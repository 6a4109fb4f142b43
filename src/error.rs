//! Error types for cache operations.
//!
//! Only two conditions are ever surfaced: a lookup for a key the cache does
//! not hold, and a configuration that cannot produce a cache. Neither is
//! retried or logged by the crate; both go straight back to the caller and
//! leave the cache exactly as it was.

use alloc::string::String;
use thiserror::Error;

/// Errors returned by [`LruCache`](crate::LruCache) and the memoizer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// `get` was called with a key that is not in the cache.
    ///
    /// Recoverable: check [`contains`](crate::LruCache::contains) first or
    /// fall back to computing the value.
    #[error("key not found in cache")]
    NotFound,

    /// The cache could not be constructed from the supplied settings,
    /// e.g. a capacity of zero.
    #[error("invalid cache configuration: {0}")]
    InvalidConfiguration(String),
}

/// Convenience result alias for cache operations.
pub type Result<T> = core::result::Result<T, CacheError>;

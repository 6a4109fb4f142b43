//! Cache Configuration Module
//!
//! Configuration structures for the LRU cache and the memoizer. Each config
//! has public fields for direct instantiation, plus a validating `new` that
//! accepts a plain `usize` and rejects zero.
//!
//! | Config | Used by | Description |
//! |--------|---------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Entry-count capacity |
//! | `MemoConfig` | [`Memoized`](crate::memo::Memoized) | Memo table size, default 100 |
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Create config with all fields
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//!
//! // Or validate a runtime value
//! assert!(LruCacheConfig::new(0).is_err());
//! ```

pub mod lru;
pub mod memo;

pub use lru::LruCacheConfig;
pub use memo::{MemoConfig, DEFAULT_MAX_SIZE};

use crate::error::{CacheError, Result};
use core::num::NonZeroUsize;

/// Converts a runtime size into a `NonZeroUsize`, naming the offending
/// setting in the error.
pub(crate) fn non_zero(setting: &str, value: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(value).ok_or_else(|| {
        CacheError::InvalidConfiguration(alloc::format!("{} must be > 0, got {}", setting, value))
    })
}

//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Sizing
//!
//! `capacity` is the maximum number of entries. The hash index and the node
//! arena are preallocated for up to 65,536 entries; larger caches grow into
//! their capacity as they fill and stop allocating once full, since evicted
//! slots are reused.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::LruCache;
//!
//! let config = LruCacheConfig::new(10_000).unwrap();
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 10_000);
//! ```

use crate::error::Result;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when a new key is inserted
/// into a full cache.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a config from a runtime capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            capacity: super::non_zero("capacity", capacity)?,
        })
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
        assert_eq!(LruCacheConfig::new(1000).unwrap(), config);
    }

    #[test]
    fn test_lru_config_rejects_zero() {
        match LruCacheConfig::new(0) {
            Err(CacheError::InvalidConfiguration(msg)) => {
                assert!(msg.contains("capacity"), "unexpected message: {}", msg);
            }
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }
    }
}

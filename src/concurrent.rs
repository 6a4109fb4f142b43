//! Thread-safe LRU cache.
//!
//! [`SyncLruCache`] puts a whole [`LruCache`] behind one `parking_lot::Mutex`.
//! Every operation, reads included, takes the lock, because a `get` relinks
//! the entry at the tail of the recency list. Holding one lock over the index
//! and the list together is what keeps the two consistent; the recency order
//! is global, so eviction picks the least recently used entry across all
//! threads.
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │              SyncLruCache              │
//! │  ┌──────────────────────────────────┐  │
//! │  │              Mutex               │  │
//! │  │  ┌────────────┐  ┌────────────┐  │  │
//! │  │  │ hash index │─▶│recency list│  │  │
//! │  │  └────────────┘  └────────────┘  │  │
//! │  └──────────────────────────────────┘  │
//! └────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use recency_cache::concurrent::SyncLruCache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(SyncLruCache::new(1000)?);
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = Arc::clone(&cache);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 cache.set(format!("key_{}_{}", t, i), i);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(cache.len(), 400);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::lru::LruCache;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;
use parking_lot::Mutex;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// An LRU cache that can be shared across threads.
///
/// Values are returned as clones so the lock is never held by the caller;
/// use [`get_with`](Self::get_with) to read a value in place instead.
pub struct SyncLruCache<K, V, S = DefaultHashBuilder> {
    inner: Mutex<LruCache<K, V, S>>,
}

impl<K: Hash + Eq, V> SyncLruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(SyncLruCache {
            inner: Mutex::new(LruCache::new(capacity)?),
        })
    }

    /// Creates a cache from a configuration with an optional hasher.
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        SyncLruCache {
            inner: Mutex::new(LruCache::init(config, hasher)),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SyncLruCache<K, V, S> {
    /// Creates a cache with a custom hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        SyncLruCache {
            inner: Mutex::new(LruCache::with_hasher(cap, hash_builder)),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    pub fn cap(&self) -> NonZeroUsize {
        self.inner.lock().cap()
    }

    /// Returns the number of entries currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns `true` if `key` is cached. Does not affect recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.lock().contains(key)
    }

    /// Returns a clone of the value for `key` and marks it most recently
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`](crate::CacheError::NotFound) if `key`
    /// is absent.
    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Applies `f` to the value for `key` while the lock is held, marking the
    /// entry most recently used.
    ///
    /// ```
    /// use recency_cache::concurrent::SyncLruCache;
    ///
    /// let cache = SyncLruCache::new(4)?;
    /// cache.set("greeting", String::from("hello"));
    /// assert_eq!(cache.get_with(&"greeting", |s| s.len()), Ok(5));
    /// # Ok::<(), recency_cache::CacheError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`](crate::CacheError::NotFound) if `key`
    /// is absent; `f` is not called.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Result<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.inner.lock().get(key).map(f)
    }

    /// Returns clones of every entry from least to most recently used.
    ///
    /// The snapshot is taken under one lock acquisition, so it reflects a
    /// single consistent state of the cache.
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> SyncLruCache<K, V, S> {
    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Returns the evicted entry if inserting a new key displaced the least
    /// recently used one.
    pub fn set(&self, key: K, value: V) -> Option<(K, V)> {
        self.inner.lock().set(key, value)
    }
}

impl<K, V, S> fmt::Debug for SyncLruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Some(cache) => f.debug_tuple("SyncLruCache").field(&*cache).finish(),
            None => f.debug_tuple("SyncLruCache").field(&"<locked>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    extern crate std;
    use std::format;
    use std::string::{String, ToString};
    use std::sync::Arc;
    use std::thread;
    use std::vec;

    #[test]
    fn test_basic_operations() {
        let cache: SyncLruCache<String, i32> = SyncLruCache::new(100).unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);

        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.set("c".to_string(), 3);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.cap().get(), 100);
        assert!(cache.contains("a"));
        assert_eq!(cache.get("a"), Ok(1));
        assert_eq!(cache.get("d"), Err(CacheError::NotFound));
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result: Result<SyncLruCache<u32, u32>> = SyncLruCache::new(0);
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_eviction_follows_global_recency() {
        let cache = SyncLruCache::new(2).unwrap();
        cache.set(1, 10);
        cache.set(2, 20);
        assert_eq!(cache.get(&1), Ok(10));
        assert_eq!(cache.set(3, 30), Some((2, 20)));
        assert_eq!(cache.snapshot(), vec![(1, 10), (3, 30)]);
    }

    #[test]
    fn test_get_with_missing_key_skips_closure() {
        let cache: SyncLruCache<u32, u32> = SyncLruCache::new(2).unwrap();
        let mut called = false;
        let result = cache.get_with(&7, |_| called = true);
        assert_eq!(result, Err(CacheError::NotFound));
        assert!(!called);
    }

    #[test]
    fn test_concurrent_access() {
        let cache: Arc<SyncLruCache<String, usize>> = Arc::new(SyncLruCache::new(1000).unwrap());
        let num_threads = 8;
        let ops_per_thread = 500;

        let handles: vec::Vec<_> = (0..num_threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..ops_per_thread {
                        let key = format!("key_{}_{}", t, i);
                        cache.set(key.clone(), i);
                        let _ = cache.get(&key);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), cache.cap().get());
        assert_eq!(cache.snapshot().len(), 1000);
    }

    #[test]
    fn test_debug_reports_inner_cache() {
        let cache: SyncLruCache<u8, u8> = SyncLruCache::new(3).unwrap();
        cache.set(1, 1);
        let debug_str = format!("{:?}", cache);
        assert!(debug_str.contains("SyncLruCache"));
        assert!(debug_str.contains("LruCache"));
    }
}

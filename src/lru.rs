//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a fixed-capacity LRU cache with O(1) operations for
//! every cache operation, including eviction.
//!
//! # Algorithm
//!
//! Entries live in a [`List`] ordered by recency: the head is the least
//! recently used entry and the tail the most recently used. A hash index maps
//! each key to the [`Handle`] of its node, so a lookup finds the node directly
//! and "touching" it is a constant-time unlink and relink at the tail.
//!
//! ```text
//!   index: HashMap<K, Handle>
//!   ┌─────┬──────────┐
//!   │ "a" │ Handle(0)│───────────────┐
//!   │ "b" │ Handle(1)│──────┐        │
//!   │ "c" │ Handle(2)│─┐    │        │
//!   └─────┴──────────┘ │    │        │
//!                      ▼    ▼        ▼
//!   recency list:  head ─▶ [c] ─▶ [b] ─▶ [a] ◀─ tail
//!                  (LRU, evicted next)    (MRU)
//! ```
//!
//! When a new key arrives and the cache is full, the head node is the
//! eviction victim. It is unlinked, its key dropped from the index, and only
//! then is the new entry appended at the tail.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Set: O(1) amortized
//!   - Contains: O(1)
//!   - Eviction: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - Each key is stored twice (index and entry), so keys must be `Clone`
//!
//! # Thread Safety
//!
//! `LruCache` is not thread-safe: even `get` mutates the recency order. Wrap
//! it in a `Mutex` or use [`SyncLruCache`](crate::concurrent::SyncLruCache)
//! (feature `concurrent`), which locks the index and list together.

use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::error::{CacheError, Result};
use crate::list::{self, Handle, List};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on entries preallocated at construction.
const PREALLOC_LIMIT: usize = 1 << 16;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When a new key is inserted
/// into a full cache, the least recently used entry is evicted.
///
/// # Examples
///
/// ```
/// use recency_cache::{CacheError, LruCache};
///
/// let mut cache = LruCache::new(2)?;
///
/// cache.set("apple", 1);
/// cache.set("banana", 2);
///
/// // Reading refreshes recency
/// assert_eq!(cache.get(&"apple"), Ok(&1));
///
/// // Adding beyond capacity evicts the least recently used entry
/// assert_eq!(cache.set("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), Err(CacheError::NotFound));
///
/// let order: Vec<_> = cache.iter().collect();
/// assert_eq!(order, [(&"apple", &1), (&"cherry", &3)]);
/// # Ok::<(), CacheError>(())
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<CacheEntry<K, V>>,
    map: HashMap<K, Handle, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let config = LruCacheConfig::new(capacity)?;
        Ok(Self::init(config, None))
    }

    /// Creates a cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration specifying the capacity
    /// * `hasher` - Optional custom hash builder. If `None`, uses `DefaultHashBuilder`
    pub fn init(config: LruCacheConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let prealloc = cap.get().min(PREALLOC_LIMIT);
        debug!(capacity = cap.get(), "creating LRU cache");
        LruCache {
            config: LruCacheConfig { capacity: cap },
            list: List::with_capacity(prealloc),
            map: HashMap::with_capacity_and_hasher(prealloc, hash_builder),
        }
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns true if `key` is cached. Does not affect recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if `key` is absent; the cache is left
    /// unchanged.
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.touch(key)?;
        Ok(&self.list.get(node).value)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.touch(key)?;
        Ok(&mut self.list.get_mut(node).value)
    }

    /// Returns the value for `key` without changing its recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = *self.map.get(key)?;
        Some(&self.list.get(node).value)
    }

    /// Returns the least recently used entry, the next eviction victim.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.first().map(|node| self.list.get(node).as_pair())
    }

    /// Returns the most recently used entry.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.last().map(|node| self.list.get(node).as_pair())
    }

    /// Iterates over the entries from least to most recently used.
    ///
    /// The order is taken at call time; calling again re-walks from the
    /// current head.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    fn touch<Q>(&mut self, key: &Q) -> Result<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied().ok_or(CacheError::NotFound)?;
        self.list.move_to_tail(node);
        Ok(node)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or updates `key`, marking it most recently used.
    ///
    /// Updating an existing key replaces its value in place and never evicts.
    /// Inserting a new key into a full cache first evicts the least recently
    /// used entry, which is returned.
    pub fn set(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&node) = self.map.get(&key) {
            self.list.get_mut(node).replace_value(value);
            self.list.move_to_tail(node);
            return None;
        }

        let evicted = if self.map.len() >= self.cap().get() {
            self.evict_lru()
        } else {
            None
        };

        let node = self.list.push_tail(CacheEntry::new(key.clone(), value));
        self.map.insert(key, node);
        evicted
    }

    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_head()?.into_pair();
        self.map.remove(&key);
        trace!(len = self.map.len(), "evicted least recently used entry");
        Some((key, value))
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over cache entries from least to most recently used.
///
/// Created by [`LruCache::iter`]. Reversing it walks from the most recently
/// used entry instead.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, CacheEntry<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(CacheEntry::as_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(CacheEntry::as_pair)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

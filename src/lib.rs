#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How an access moves through the cache
//!
//! ```text
//!  set("d", 4) on a full cache of capacity 3
//!
//!  before:  head ─▶ [a] ─▶ [b] ─▶ [c] ◀─ tail
//!                    │
//!                    └── least recently used: evicted, removed from index
//!
//!  after:   head ─▶ [b] ─▶ [c] ─▶ [d] ◀─ tail
//!
//!  get("b")
//!
//!  after:   head ─▶ [c] ─▶ [d] ─▶ [b] ◀─ tail
//! ```
//!
//! ## Quick Reference
//!
//! | Operation | Effect on recency | Cost |
//! |-----------|-------------------|------|
//! | [`LruCache::set`] | entry becomes most recent | O(1) |
//! | [`LruCache::get`] | entry becomes most recent | O(1) |
//! | [`LruCache::contains`] | none | O(1) |
//! | [`LruCache::peek`] | none | O(1) |
//! | [`LruCache::iter`] | none | O(n) |
//!
//! ## Construction from a configuration
//!
//! ```rust
//! use recency_cache::LruCache;
//! use recency_cache::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(2).unwrap(),
//! };
//! let mut cache = LruCache::init(config, None);
//! cache.set("a", 1);
//! cache.set("b", 2);
//! let _ = cache.get(&"a"); // "a" becomes most recently used
//! cache.set("c", 3);       // "b" evicted (least recently used)
//! assert!(!cache.contains(&"b"));
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the LRU cache
//! - [`list`]: the arena-backed recency list underneath it
//! - [`memo`]: LRU memoization of functions
//! - [`config`]: configuration structures
//! - [`error`]: the error type shared by every fallible operation
//! - [`concurrent`]: a lock-protected cache for sharing across threads (requires `concurrent` feature)

#![no_std]

extern crate alloc;

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Error type and result alias.
pub mod error;

/// Doubly linked recency list stored in an index-addressed arena.
///
/// Nodes are referred to by [`Handle`](list::Handle)s that stay valid until
/// the node is released, so the cache's index can point straight at them.
pub mod list;

/// Cache entry type.
pub mod entry;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// the capacity is reached.
pub mod lru;

/// Function memoization backed by an LRU cache.
pub mod memo;

/// Thread-safe cache wrapper.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use lru::LruCache;
pub use memo::{lru_cache, lru_cache_with, ArgKey, MemoBuilder, Memoized};

#[cfg(feature = "concurrent")]
pub use concurrent::SyncLruCache;

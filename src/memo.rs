//! LRU memoization of functions.
//!
//! [`Memoized`] wraps a function and remembers its most recent results in an
//! [`LruCache`]. A call first asks the cache whether the argument key is
//! present; on a hit the stored result is returned and the function is not
//! invoked, on a miss the function runs and its result is stored.
//!
//! Two entry points replace a decorator that is usable both bare and with a
//! size argument:
//!
//! - [`lru_cache(f)`](lru_cache) wraps `f` with the default capacity
//!   ([`DEFAULT_MAX_SIZE`](crate::config::DEFAULT_MAX_SIZE), 100).
//! - [`lru_cache_with(size)`](lru_cache_with) validates `size` and returns a
//!   [`MemoBuilder`] whose [`wrap`](MemoBuilder::wrap) applies it to `f`.
//!
//! # Argument keys
//!
//! Any `Hash + Eq + Clone` type can serve as the key, a tuple of the
//! arguments being the usual choice. For functions with named arguments,
//! [`ArgKey`] combines an ordered positional list with a name-sorted list of
//! named values, so calls that pass the same names in a different order map
//! to the same entry.
//!
//! ```
//! use recency_cache::memo::{lru_cache_with, ArgKey};
//!
//! let mut calls = 0;
//! let mut scale = lru_cache_with(16)?.wrap(|key: &ArgKey<i64>| {
//!     calls += 1;
//!     let base: i64 = key.positional().iter().sum();
//!     let factor = key.get("factor").copied().unwrap_or(1);
//!     let offset = key.get("offset").copied().unwrap_or(0);
//!     base * factor + offset
//! });
//!
//! let a = ArgKey::new().arg(2).arg(3).kwarg("factor", 10).kwarg("offset", 1);
//! let b = ArgKey::new().arg(2).arg(3).kwarg("offset", 1).kwarg("factor", 10);
//! assert_eq!(scale.call(a), 51);
//! assert_eq!(scale.call(b), 51);
//! drop(scale);
//! assert_eq!(calls, 1);
//! # Ok::<(), recency_cache::CacheError>(())
//! ```

use crate::config::{LruCacheConfig, MemoConfig};
use crate::error::Result;
use crate::lru::LruCache;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use tracing::trace;

/// Composite key for a call made with positional and named arguments.
///
/// Positional values are order-sensitive. Named values are kept sorted by
/// name, so the order they were supplied in does not matter; supplying the
/// same name twice keeps the later value. All values share the type `P`,
/// which must be `Hash + Eq` for the key to be usable in a cache; use an enum
/// when arguments have different types.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ArgKey<P> {
    positional: Vec<P>,
    named: Vec<(String, P)>,
}

impl<P> ArgKey<P> {
    /// Creates a key with no arguments.
    pub fn new() -> Self {
        ArgKey {
            positional: Vec::new(),
            named: Vec::new(),
        }
    }

    /// Creates a key from positional arguments only.
    pub fn from_args<I: IntoIterator<Item = P>>(args: I) -> Self {
        ArgKey {
            positional: args.into_iter().collect(),
            named: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: P) -> Self {
        self.positional.push(value);
        self
    }

    /// Adds a named argument, keeping the named list sorted.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: P) -> Self {
        let name = name.into();
        match self
            .named
            .binary_search_by(|(existing, _)| existing.as_str().cmp(name.as_str()))
        {
            Ok(i) => self.named[i].1 = value,
            Err(i) => self.named.insert(i, (name, value)),
        }
        self
    }

    /// Positional arguments in call order.
    pub fn positional(&self) -> &[P] {
        &self.positional
    }

    /// Named arguments sorted by name.
    pub fn named(&self) -> &[(String, P)] {
        &self.named
    }

    /// Looks up a named argument.
    pub fn get(&self, name: &str) -> Option<&P> {
        self.named
            .binary_search_by(|(existing, _)| existing.as_str().cmp(name))
            .ok()
            .map(|i| &self.named[i].1)
    }
}

impl<P> Default for ArgKey<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for ArgKey<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgKey")
            .field("positional", &self.positional)
            .field("named", &self.named)
            .finish()
    }
}

/// A function wrapped with an LRU memo table.
///
/// `K` is the argument key, `R` the result (cloned out of the table on a
/// hit), `F` the wrapped function.
pub struct Memoized<K, R, F> {
    func: F,
    cache: LruCache<K, R>,
}

impl<K, R, F> Memoized<K, R, F>
where
    K: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(&K) -> R,
{
    /// Wraps `func` with a memo table sized by `config`.
    pub fn new(config: MemoConfig, func: F) -> Self {
        let config = LruCacheConfig {
            capacity: config.max_size,
        };
        Memoized {
            func,
            cache: LruCache::init(config, None),
        }
    }

    /// Returns the result for `key`, invoking the wrapped function only if
    /// the result is not already remembered.
    pub fn call(&mut self, key: K) -> R {
        if self.cache.contains(&key) {
            if let Ok(hit) = self.cache.get(&key) {
                return hit.clone();
            }
        }

        trace!(cached = self.cache.len(), "memo miss");
        let result = (self.func)(&key);
        self.cache.set(key, result.clone());
        result
    }

    /// The backing cache, for inspection.
    pub fn cache(&self) -> &LruCache<K, R> {
        &self.cache
    }
}

impl<K, R, F> fmt::Debug for Memoized<K, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// A validated memo size waiting for a function to wrap.
///
/// Returned by [`lru_cache_with`].
#[derive(Debug, Clone, Copy)]
pub struct MemoBuilder {
    config: MemoConfig,
}

impl MemoBuilder {
    /// Creates a builder from a configuration.
    pub fn new(config: MemoConfig) -> Self {
        MemoBuilder { config }
    }

    /// Wraps `func` with a memo table of the configured size.
    pub fn wrap<K, R, F>(self, func: F) -> Memoized<K, R, F>
    where
        K: Hash + Eq + Clone,
        R: Clone,
        F: FnMut(&K) -> R,
    {
        Memoized::new(self.config, func)
    }
}

/// Wraps `func` with a memo table of the default size (100).
///
/// ```
/// use recency_cache::memo::lru_cache;
///
/// let mut add = lru_cache(|&(a, b): &(i32, i32)| a + b);
/// assert_eq!(add.call((1, 2)), 3);
/// assert_eq!(add.cache().cap().get(), 100);
/// ```
pub fn lru_cache<K, R, F>(func: F) -> Memoized<K, R, F>
where
    K: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(&K) -> R,
{
    Memoized::new(MemoConfig::default(), func)
}

/// Validates `max_size` and returns a builder that wraps functions with a
/// memo table of that size.
///
/// # Errors
///
/// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
/// if `max_size` is zero.
pub fn lru_cache_with(max_size: usize) -> Result<MemoBuilder> {
    Ok(MemoBuilder::new(MemoConfig::new(max_size)?))
}

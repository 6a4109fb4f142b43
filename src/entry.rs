//! Cache entry type.
//!
//! A [`CacheEntry`] is the payload of one recency-list node: the key it is
//! indexed under and the value stored for it. The key is kept next to the
//! value so that evicting the head of the list tells the cache which index
//! slot to drop without a reverse lookup.

use core::fmt;

/// One cached binding.
///
/// # Examples
///
/// ```
/// use recency_cache::entry::CacheEntry;
///
/// let mut entry = CacheEntry::new("user:123", 1);
/// assert_eq!(entry.replace_value(2), 1);
/// assert_eq!(entry.into_pair(), ("user:123", 2));
/// ```
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new entry.
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Borrows the key and value together.
    #[inline]
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Replaces the value in place and returns the previous one.
    #[inline]
    pub fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    /// Consumes the entry, returning `(key, value)`.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Clone, V: Clone> Clone for CacheEntry<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

//! Configuration for the LRU memoizer.

use crate::error::Result;
use core::fmt;
use core::num::NonZeroUsize;

/// Memo table size used when none is given.
pub const DEFAULT_MAX_SIZE: usize = 100;

const DEFAULT_MAX_SIZE_NZ: NonZeroUsize = match NonZeroUsize::new(DEFAULT_MAX_SIZE) {
    Some(n) => n,
    None => panic!("DEFAULT_MAX_SIZE must be non-zero"),
};

/// Configuration for a [`Memoized`](crate::memo::Memoized) function.
///
/// # Examples
///
/// ```
/// use recency_cache::config::MemoConfig;
///
/// assert_eq!(MemoConfig::default().max_size.get(), 100);
/// assert_eq!(MemoConfig::new(200).unwrap().max_size.get(), 200);
/// assert!(MemoConfig::new(0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MemoConfig {
    /// Maximum number of remembered results.
    pub max_size: NonZeroUsize,
}

impl MemoConfig {
    /// Builds a config from a runtime size.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`](crate::CacheError::InvalidConfiguration)
    /// if `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self> {
        Ok(Self {
            max_size: super::non_zero("max_size", max_size)?,
        })
    }
}

impl Default for MemoConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE_NZ,
        }
    }
}

impl fmt::Debug for MemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoConfig")
            .field("max_size", &self.max_size)
            .finish()
    }
}

//! Error types for the recache library.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` / `validate` methods).
//!
//! All regular cache operations report fallible outcomes as `bool`/`Option`
//! sentinels and never construct an error; `InvariantError` exists only for
//! the explicit debugging surface.
//!
//! ## Example Usage
//!
//! ```
//! use recache::cache::BoundedCache;
//!
//! let cache: BoundedCache<u64, String> = BoundedCache::new(8);
//! cache.put(1, "one".to_string());
//! assert!(cache.check_invariants().is_ok());
//! ```

use std::fmt;

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`BoundedCache::check_invariants`](crate::cache::BoundedCache::check_invariants)
/// and [`EvictionPolicy::validate`](crate::policy::EvictionPolicy::validate).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

//! Fluent construction of caches.
//!
//! The builder separates "what to configure" from "which policy to run",
//! so call sites can pick a strategy from configuration without naming
//! policy types.
//!
//! # Example
//!
//! ```
//! use recache::builder::{CacheBuilder, PolicyKind};
//!
//! let cache = CacheBuilder::new(128)
//!     .policy(PolicyKind::TimeThreshold)
//!     .build::<u64, String>();
//!
//! cache.put(1, "one".to_string());
//! assert_eq!(cache.limit(), 128);
//! ```

use std::hash::Hash;

use crate::cache::BoundedCache;
use crate::policy::{AccessOrderPolicy, EvictionPolicy, TimeThresholdPolicy};

/// Selects the eviction strategy a built cache will run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    /// Recency list, exact LRU, O(1) per event.
    #[default]
    AccessOrder,
    /// Oldest `last_accessed` tick, O(n) scan per eviction.
    TimeThreshold,
}

/// Builder for [`BoundedCache`] instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    limit: usize,
    policy: PolicyKind,
}

impl CacheBuilder {
    /// Starts a builder for a cache holding at most `limit` entries.
    ///
    /// A limit of 0 builds a permanently disabled cache.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            policy: PolicyKind::default(),
        }
    }

    /// Selects the eviction policy. Defaults to [`PolicyKind::AccessOrder`].
    pub fn policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the cache.
    ///
    /// `K: Ord` is required because the time-threshold policy breaks
    /// equal-tick ties toward the smallest key.
    pub fn build<K, V>(self) -> BoundedCache<K, V>
    where
        K: Copy + Eq + Hash + Ord + Send + 'static,
        V: Send + Sync + 'static,
    {
        let policy: Box<dyn EvictionPolicy<K, V> + Send> = match self.policy {
            PolicyKind::AccessOrder => Box::new(AccessOrderPolicy::with_capacity(self.limit)),
            PolicyKind::TimeThreshold => Box::new(TimeThresholdPolicy::new()),
        };
        BoundedCache::with_policy(self.limit, policy)
    }
}

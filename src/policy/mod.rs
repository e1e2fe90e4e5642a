//! # Eviction Policy Trait
//!
//! This module defines the capability trait for cache eviction policies and
//! provides the two concrete strategies:
//!
//! | Policy                  | File                | Eviction basis             | Cost per eviction |
//! |-------------------------|---------------------|----------------------------|-------------------|
//! | [`AccessOrderPolicy`]   | `access_order.rs`   | Recency list tail          | O(1)              |
//! | [`TimeThresholdPolicy`] | `time_threshold.rs` | Oldest `last_accessed`     | O(n) scan         |
//!
//! ## Contract
//!
//! The orchestrator drives the policy with three events:
//!
//! - [`insert`](EvictionPolicy::insert) — `key` just entered the store.
//!   Called exactly once per key lifetime, after any eviction.
//! - [`update`](EvictionPolicy::update) — `key` was read or overwritten.
//!   Called on every successful Get and every Put to an existing key.
//! - [`evict`](EvictionPolicy::evict) — select a victim. The policy does NOT
//!   remove the victim from the store; the orchestrator does.
//!
//! Policies run while the cache lock is held and must not re-enter the cache.
//!
//! ## Trait Design
//!
//! `remove`, `clear`, and `validate` have default no-op bodies so stateless
//! policies (like the timestamp scan) implement only the contract they need,
//! while stateful policies keep their bookkeeping in sync with the store.

pub mod access_order;
pub mod time_threshold;

pub use access_order::AccessOrderPolicy;
pub use time_threshold::TimeThresholdPolicy;

use std::hash::Hash;

use crate::error::InvariantError;
use crate::store::EntryStore;

/// Decides which key to evict and how insert/access events update ordering.
///
/// # Example
///
/// ```
/// use recache::policy::{AccessOrderPolicy, EvictionPolicy};
/// use recache::store::EntryStore;
///
/// let mut policy: Box<dyn EvictionPolicy<u64, &str>> = Box::new(AccessOrderPolicy::new());
/// let store: EntryStore<u64, &str> = EntryStore::with_capacity(4);
///
/// policy.insert(1);
/// policy.insert(2);
/// policy.update(&1);
///
/// // Key 2 is now least recently used.
/// assert_eq!(policy.evict(&store), Some(2));
/// ```
pub trait EvictionPolicy<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Selects a victim key without removing it from `entries`.
    ///
    /// Returns `None` when nothing is eligible (e.g. the policy's ordering
    /// structure is empty).
    fn evict(&mut self, entries: &EntryStore<K, V>) -> Option<K>;

    /// Records that `key` just entered the store.
    fn insert(&mut self, key: K);

    /// Records that `key` was just accessed or overwritten.
    fn update(&mut self, key: &K);

    /// Records that `key` was explicitly removed from the store.
    fn remove(&mut self, _key: &K) {}

    /// Records that the store was cleared.
    fn clear(&mut self) {}

    /// Checks the policy's bookkeeping against the store.
    ///
    /// Used by [`BoundedCache::check_invariants`](crate::cache::BoundedCache::check_invariants)
    /// and tests; stateless policies have nothing to check.
    fn validate(&self, _entries: &EntryStore<K, V>) -> Result<(), InvariantError> {
        Ok(())
    }

    /// Short policy name for log events.
    fn name(&self) -> &'static str;
}

//! # Bounded Cache Orchestrator
//!
//! Combines the entry store, aggregate counters, and a pluggable eviction
//! policy under a single exclusive lock.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                     BoundedCache<K, V>                       │
//!   │                                                              │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │              Arc<Mutex<CacheCore<K, V>>>               │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   │                             │                                │
//!   │                             ▼                                │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │                   CacheCore<K, V>                      │ │
//!   │   │                                                        │ │
//!   │   │   EntryStore<K, V>        key -> Arc<V> + stats        │ │
//!   │   │   Box<dyn EvictionPolicy> victim selection + ordering  │ │
//!   │   │   counters                total/successful reads,      │ │
//!   │   │                           total writes, tick clock     │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Put/Get Flow
//!
//! ```text
//!   put(k, v)                          get(&k)
//!   ═══════════════════════════        ═══════════════════════════
//!   limit == 0 ──► false               lock
//!   lock                               total_reads += 1
//!   absent, while len >= limit:        absent ──► None
//!     policy.evict ──► remove victim   policy.update(k)
//!   absent: insert + policy.insert     successful_reads += 1
//!   present: policy.update             entry.reads += 1, stamp tick
//!   stamp value/writes/tick            unlock ──► Some(Arc<V>)
//!   unlock ──► existed
//! ```
//!
//! ## Concurrency Model
//!
//! One `parking_lot::Mutex` is held for the full duration of each operation,
//! making all operations mutually exclusive and linearizable. Policy calls
//! happen while the lock is held; policies must not re-enter the cache.
//! Replacing the policy goes through [`BoundedCache::set_policy`], which
//! takes the same lock, so a swap can never race a Put/Get.
//!
//! ## Eviction-Miss Hazard
//!
//! If the policy reports no victim while the store is full, the put proceeds
//! and the store exceeds `limit` by one entry. This mirrors the documented
//! behavior of the operation contract; the cache logs a `warn!` and bounds
//! the damage: fullness is tested with `>=` and eviction loops until the
//! store is below the limit, so the next insert under a victim-producing
//! policy drains the overflow entirely.

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::error::InvariantError;
use crate::policy::{AccessOrderPolicy, EvictionPolicy};
use crate::store::{CacheEntry, EntryStats, EntryStore};

/// Snapshot of cache-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries.
    pub len: usize,
    /// Maximum number of entries.
    pub limit: usize,
    /// Number of `get` calls, hit or miss.
    pub total_reads: u64,
    /// Number of `get` calls that found the key.
    pub successful_reads: u64,
    /// Number of `put` calls that mutated the cache.
    pub total_writes: u64,
}

/// Unsynchronized cache engine: store + counters + boxed policy.
///
/// Single-threaded by itself; [`BoundedCache`] provides the locked wrapper.
/// Useful directly when the caller already owns synchronization.
pub struct CacheCore<K, V>
where
    K: Copy + Eq + Hash,
{
    entries: EntryStore<K, V>,
    policy: Box<dyn EvictionPolicy<K, V> + Send>,
    limit: usize,
    tick: u64,
    total_reads: u64,
    successful_reads: u64,
    total_writes: u64,
}

impl<K, V> CacheCore<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates a core with the default access-order policy.
    ///
    /// A limit of 0 permanently disables the cache: every put is rejected.
    pub fn new(limit: usize) -> Self
    where
        K: Send + 'static,
        V: 'static,
    {
        Self::with_policy(limit, Box::new(AccessOrderPolicy::with_capacity(limit)))
    }

    /// Creates a core with an explicit eviction policy.
    pub fn with_policy(limit: usize, policy: Box<dyn EvictionPolicy<K, V> + Send>) -> Self {
        Self {
            entries: EntryStore::with_capacity(limit),
            policy,
            limit,
            tick: 0,
            total_reads: 0,
            successful_reads: 0,
            total_writes: 0,
        }
    }

    /// Replaces the eviction policy.
    ///
    /// The previous policy's ordering state is discarded; the new policy is
    /// seeded with every key currently in the store so its bookkeeping starts
    /// consistent.
    pub fn set_policy(&mut self, policy: Box<dyn EvictionPolicy<K, V> + Send>) {
        self.policy = policy;
        let keys: Vec<K> = self.entries.keys().copied().collect();
        for key in keys {
            self.policy.insert(key);
        }
        trace!(policy = self.policy.name(), "eviction policy replaced");
    }

    /// Inserts or overwrites `key`, returning whether it already existed.
    pub fn put(&mut self, key: K, value: Arc<V>) -> bool {
        if self.limit == 0 {
            return false;
        }

        let existed = self.entries.contains(&key);
        if !existed {
            // Loops so an overflow left by an earlier eviction miss drains
            // as soon as the policy produces victims again.
            while self.entries.len() >= self.limit {
                match self.policy.evict(&self.entries) {
                    Some(victim) => {
                        self.entries.remove(&victim);
                        trace!(
                            policy = self.policy.name(),
                            len = self.entries.len(),
                            limit = self.limit,
                            "evicted entry to make room"
                        );
                    }
                    None => {
                        // Accepted hazard: proceed without freeing space, so
                        // the store may exceed the limit by one entry.
                        warn!(
                            policy = self.policy.name(),
                            len = self.entries.len(),
                            limit = self.limit,
                            "eviction policy returned no victim; store may exceed limit"
                        );
                        break;
                    }
                }
            }
            self.entries.insert(key, CacheEntry::new(Arc::clone(&value)));
            self.policy.insert(key);
        } else {
            self.policy.update(&key);
        }

        let tick = self.next_tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.record_write(value, tick);
        }
        self.total_writes += 1;
        existed
    }

    /// Returns the value for `key`, refreshing its recency, or `None`.
    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        self.total_reads += 1;
        if !self.entries.contains(key) {
            return None;
        }
        self.policy.update(key);
        self.successful_reads += 1;
        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        entry.record_read(tick);
        Some(entry.value())
    }

    /// Returns the value for `key` without touching recency, stats, or counters.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| entry.value())
    }

    /// Removes `key`, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        let entry = self.entries.remove(key)?;
        self.policy.remove(key);
        Some(entry.value())
    }

    /// Removes all entries and resets the policy's ordering state.
    ///
    /// Counters are not reset; they describe the cache's lifetime.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.policy.clear();
    }

    /// Returns `true` if `key` has an entry. Does not affect recency.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Snapshot of the aggregate counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            len: self.entries.len(),
            limit: self.limit,
            total_reads: self.total_reads,
            successful_reads: self.successful_reads,
            total_writes: self.total_writes,
        }
    }

    /// Per-entry statistics for `key`, if present.
    pub fn entry_stats(&self, key: &K) -> Option<EntryStats> {
        self.entries.get(key).map(|entry| entry.stats())
    }

    /// Checks the size bound and the policy's bookkeeping.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.limit > 0 && self.entries.len() > self.limit {
            return Err(InvariantError::new(format!(
                "store holds {} entries, limit is {}",
                self.entries.len(),
                self.limit
            )));
        }
        if self.limit == 0 && !self.entries.is_empty() {
            return Err(InvariantError::new("zero-limit cache holds entries"));
        }
        self.policy.validate(&self.entries)
    }

    fn next_tick(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }
}

impl<K, V> std::fmt::Debug for CacheCore<K, V>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheCore")
            .field("len", &self.len())
            .field("limit", &self.limit)
            .field("policy", &self.policy.name())
            .finish_non_exhaustive()
    }
}

/// Thread-safe bounded cache: a cloneable handle over a locked [`CacheCore`].
///
/// Every operation holds the mutex for its full duration, so concurrent
/// callers observe a total order of operations and never a partial update.
///
/// # Example
///
/// ```
/// use recache::cache::BoundedCache;
///
/// let cache: BoundedCache<u64, String> = BoundedCache::new(2);
///
/// assert!(!cache.put(1, "one".to_string()));
/// assert!(!cache.put(2, "two".to_string()));
/// assert!(cache.put(1, "uno".to_string())); // overwrite reports existence
///
/// // Key 2 is now least recently used and goes first.
/// cache.put(3, "three".to_string());
/// assert!(!cache.contains(&2));
/// assert_eq!(cache.get(&1).as_deref(), Some(&"uno".to_string()));
/// ```
pub struct BoundedCache<K, V>
where
    K: Copy + Eq + Hash,
{
    inner: Arc<Mutex<CacheCore<K, V>>>,
    limit: usize,
}

impl<K, V> Clone for BoundedCache<K, V>
where
    K: Copy + Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limit: self.limit,
        }
    }
}

impl<K, V> BoundedCache<K, V>
where
    K: Copy + Eq + Hash + Send + 'static,
    V: Send + Sync + 'static,
{
    /// Creates a cache with the default access-order (LRU) policy.
    ///
    /// A limit of 0 creates a permanently disabled cache: every put returns
    /// `false` and performs no mutation.
    pub fn new(limit: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheCore::new(limit))),
            limit,
        }
    }

    /// Creates a cache with an explicit eviction policy.
    ///
    /// ```
    /// use recache::cache::BoundedCache;
    /// use recache::policy::TimeThresholdPolicy;
    ///
    /// let cache: BoundedCache<u64, String> =
    ///     BoundedCache::with_policy(16, Box::new(TimeThresholdPolicy::new()));
    /// cache.put(1, "one".to_string());
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn with_policy(limit: usize, policy: Box<dyn EvictionPolicy<K, V> + Send>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheCore::with_policy(limit, policy))),
            limit,
        }
    }

    /// Replaces the eviction policy under the same lock as Put/Get.
    ///
    /// Safe to call while other threads are using the cache; the swap is
    /// serialized with every other operation.
    pub fn set_policy(&self, policy: Box<dyn EvictionPolicy<K, V> + Send>) {
        let mut core = self.inner.lock();
        core.set_policy(policy);
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns whether the key already existed. If the cache is full and the
    /// key is new, the policy's victim is evicted first.
    pub fn put(&self, key: K, value: V) -> bool {
        // Disabled cache short-circuits without locking.
        if self.limit == 0 {
            return false;
        }
        let mut core = self.inner.lock();
        core.put(key, Arc::new(value))
    }

    /// Inserts a pre-wrapped `Arc<V>` (zero-copy if already shared).
    pub fn put_arc(&self, key: K, value: Arc<V>) -> bool {
        if self.limit == 0 {
            return false;
        }
        let mut core = self.inner.lock();
        core.put(key, value)
    }

    /// Gets a value, refreshing its recency and read statistics.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut core = self.inner.lock();
        core.get(key)
    }

    /// Gets a value without touching recency, stats, or counters.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let core = self.inner.lock();
        core.peek(key)
    }

    /// Removes an entry and returns its value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut core = self.inner.lock();
        core.remove(key)
    }

    /// Returns `true` if the key exists. Does not affect recency.
    pub fn contains(&self, key: &K) -> bool {
        let core = self.inner.lock();
        core.contains(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        let core = self.inner.lock();
        core.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        let core = self.inner.lock();
        core.is_empty()
    }

    /// Maximum number of entries.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut core = self.inner.lock();
        core.clear();
    }

    /// Snapshot of the aggregate counters.
    pub fn stats(&self) -> CacheStats {
        let core = self.inner.lock();
        core.stats()
    }

    /// Per-entry statistics for `key`, if present.
    pub fn entry_stats(&self, key: &K) -> Option<EntryStats> {
        let core = self.inner.lock();
        core.entry_stats(key)
    }

    /// Checks the size bound and the policy's bookkeeping.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let core = self.inner.lock();
        core.check_invariants()
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V>
where
    K: Copy + Eq + Hash + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.inner.lock();
        f.debug_struct("BoundedCache")
            .field("len", &core.len())
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

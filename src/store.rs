//! Entry storage for the cache orchestrator.
//!
//! The store focuses on key/value ownership and per-entry statistics, while
//! policies manage eviction order. Values are held as `Arc<V>` so callers can
//! keep references even after eviction.
//!
//! `last_accessed` is a logical tick, not wall-clock time: the orchestrator
//! stamps entries from a monotonically increasing counter on every successful
//! Put/Get. Ticks are unique, so "oldest entry" is always well defined.

use std::hash::Hash;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Per-entry access statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryStats {
    /// Number of successful reads of this entry.
    pub reads: u64,
    /// Number of writes to this entry, including the creating write.
    pub writes: u64,
    /// Logical tick of the most recent read or write.
    pub last_accessed: u64,
}

/// A stored value together with its statistics.
#[derive(Debug)]
pub struct CacheEntry<V> {
    value: Arc<V>,
    stats: EntryStats,
}

impl<V> CacheEntry<V> {
    /// Creates an entry holding `value` with zeroed stats.
    pub fn new(value: Arc<V>) -> Self {
        Self {
            value,
            stats: EntryStats::default(),
        }
    }

    /// Returns a clone of the stored `Arc<V>`.
    pub fn value(&self) -> Arc<V> {
        Arc::clone(&self.value)
    }

    /// Returns this entry's statistics.
    pub fn stats(&self) -> EntryStats {
        self.stats
    }

    /// Replaces the stored value, recording a write at `tick`.
    pub fn record_write(&mut self, value: Arc<V>, tick: u64) {
        self.value = value;
        self.stats.writes += 1;
        self.stats.last_accessed = tick;
    }

    /// Records a successful read at `tick`.
    pub fn record_read(&mut self, tick: u64) {
        self.stats.reads += 1;
        self.stats.last_accessed = tick;
    }
}

/// Key-to-entry table backing the cache.
///
/// A thin wrapper over `FxHashMap` so policies can inspect entries without
/// seeing the orchestrator's counters or lock.
#[derive(Debug)]
pub struct EntryStore<K, V>
where
    K: Copy + Eq + Hash,
{
    entries: FxHashMap<K, CacheEntry<V>>,
}

impl<K, V> EntryStore<K, V>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `key` has an entry.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the entry for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Returns a mutable entry for `key`, if present.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut CacheEntry<V>> {
        self.entries.get_mut(key)
    }

    /// Inserts an entry for `key`, returning the previous entry if any.
    pub fn insert(&mut self, key: K, entry: CacheEntry<V>) -> Option<CacheEntry<V>> {
        self.entries.insert(key, entry)
    }

    /// Removes the entry for `key`.
    pub fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        self.entries.remove(key)
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over `(key, entry)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &CacheEntry<V>)> {
        self.entries.iter()
    }

    /// Iterates over keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
}

//! Timestamp-scan eviction policy.
//!
//! Maintains no ordering structure of its own: the orchestrator already
//! stamps every entry's `last_accessed` tick on each Put/Get, so freshness is
//! fully recorded in the store. Eviction scans all entries and selects the
//! one with the oldest tick.
//!
//! O(n) per eviction, trading bookkeeping simplicity for scan cost. That is
//! acceptable because eviction runs at most once per Put that would grow the
//! store past its limit.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::policy::EvictionPolicy;
use crate::store::EntryStore;

/// Stateless policy evicting the entry with the oldest `last_accessed` tick.
///
/// Ticks are unique (one per successful Put/Get), so the scan normally has a
/// single oldest entry; if two entries ever carry the same tick the smaller
/// key wins, making the selection deterministic. The `K: Ord` bound exists
/// for that tie-break alone.
#[derive(Debug)]
pub struct TimeThresholdPolicy<K, V> {
    _marker: PhantomData<fn(K, V)>,
}

impl<K, V> TimeThresholdPolicy<K, V> {
    /// Creates the policy. It carries no state.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<K, V> Default for TimeThresholdPolicy<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EvictionPolicy<K, V> for TimeThresholdPolicy<K, V>
where
    K: Copy + Eq + Hash + Ord,
{
    fn evict(&mut self, entries: &EntryStore<K, V>) -> Option<K> {
        let mut victim: Option<(K, u64)> = None;
        for (&key, entry) in entries.iter() {
            let tick = entry.stats().last_accessed;
            let older = match victim {
                None => true,
                Some((best_key, best_tick)) => {
                    tick < best_tick || (tick == best_tick && key < best_key)
                }
            };
            if older {
                victim = Some((key, tick));
            }
        }
        victim.map(|(key, _)| key)
    }

    // Freshness is recorded by the orchestrator stamping the entry.
    fn insert(&mut self, _key: K) {}

    fn update(&mut self, _key: &K) {}

    fn name(&self) -> &'static str {
        "time-threshold"
    }
}

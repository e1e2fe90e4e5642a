//! Access-order (recency list) eviction policy.
//!
//! ## Operations Flow
//!
//! ```text
//!   INSERT new key
//!   ═══════════════════════════════════════════════════════════
//!   Before:  head ──► [A] ◄──► [B] ◄── tail
//!   insert(C):
//!     head ──► [C] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   ACCESS existing key
//!   ═══════════════════════════════════════════════════════════
//!   Before:  head ──► [C] ◄──► [A] ◄──► [B] ◄── tail
//!   update(B):
//!     head ──► [B] ◄──► [C] ◄──► [A] ◄── tail
//!
//!   EVICT
//!   ═══════════════════════════════════════════════════════════
//!   evict() ──► A   (tail is definitionally the LRU key)
//! ```
//!
//! Every access moves the key to the front, so the tail is always the least
//! recently used key and no tie-break is ever needed: the order is total by
//! construction. All operations are O(1) through the list's key index.

use std::hash::Hash;

use crate::ds::RecencyList;
use crate::error::InvariantError;
use crate::policy::EvictionPolicy;
use crate::store::EntryStore;

/// Recency-list policy: exact LRU order, O(1) per event.
///
/// Invariant: after every completed cache operation, the set of keys in the
/// list equals the set of keys in the entry store. [`validate`] checks this.
///
/// [`validate`]: EvictionPolicy::validate
#[derive(Debug, Default)]
pub struct AccessOrderPolicy<K>
where
    K: Copy + Eq + Hash,
{
    list: RecencyList<K>,
}

impl<K> AccessOrderPolicy<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates a policy with an empty recency list.
    pub fn new() -> Self {
        Self {
            list: RecencyList::new(),
        }
    }

    /// Creates a policy with reserved list capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
        }
    }

    /// Returns the tracked keys from most to least recently used.
    pub fn recency_order(&self) -> impl Iterator<Item = K> + '_ {
        self.list.iter()
    }
}

impl<K, V> EvictionPolicy<K, V> for AccessOrderPolicy<K>
where
    K: Copy + Eq + Hash,
{
    fn evict(&mut self, _entries: &EntryStore<K, V>) -> Option<K> {
        self.list.pop_back()
    }

    fn insert(&mut self, key: K) {
        self.list.push_front(key);
    }

    fn update(&mut self, key: &K) {
        // No-op if the key is absent; the calling contract means it never is.
        self.list.move_to_front(key);
    }

    fn remove(&mut self, key: &K) {
        self.list.remove(key);
    }

    fn clear(&mut self) {
        self.list.clear();
    }

    fn validate(&self, entries: &EntryStore<K, V>) -> Result<(), InvariantError> {
        if self.list.len() != entries.len() {
            return Err(InvariantError::new(format!(
                "recency list tracks {} keys but store holds {}",
                self.list.len(),
                entries.len()
            )));
        }
        for key in self.list.iter() {
            if !entries.contains(&key) {
                return Err(InvariantError::new(
                    "recency list tracks a key missing from the store",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "access-order"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::CacheEntry;

    // Boxing pins V the same way the orchestrator does.
    fn boxed() -> Box<dyn EvictionPolicy<u64, &'static str>> {
        Box::new(AccessOrderPolicy::new())
    }

    fn empty_store() -> EntryStore<u64, &'static str> {
        EntryStore::with_capacity(8)
    }

    #[test]
    fn evict_takes_least_recently_inserted() {
        let mut policy = boxed();
        let store = empty_store();

        policy.insert(1);
        policy.insert(2);
        policy.insert(3);

        assert_eq!(policy.evict(&store), Some(1));
        assert_eq!(policy.evict(&store), Some(2));
        assert_eq!(policy.evict(&store), Some(3));
        assert_eq!(policy.evict(&store), None);
    }

    #[test]
    fn update_refreshes_recency() {
        let mut policy = boxed();
        let store = empty_store();

        policy.insert(1);
        policy.insert(2);
        policy.insert(3);
        policy.update(&1);

        // 1 was refreshed, so 2 is now the tail.
        assert_eq!(policy.evict(&store), Some(2));
    }

    #[test]
    fn update_on_absent_key_is_a_noop() {
        let mut policy = boxed();
        let store = empty_store();

        policy.insert(1);
        policy.update(&99);
        assert_eq!(policy.evict(&store), Some(1));
    }

    #[test]
    fn remove_drops_key_from_ordering() {
        let mut policy = boxed();
        let store = empty_store();

        policy.insert(1);
        policy.insert(2);
        policy.remove(&1);
        assert_eq!(policy.evict(&store), Some(2));
        assert_eq!(policy.evict(&store), None);
    }

    #[test]
    fn clear_empties_the_list() {
        let mut policy = boxed();
        let store = empty_store();

        policy.insert(1);
        policy.insert(2);
        policy.clear();
        assert_eq!(policy.evict(&store), None);
    }

    #[test]
    fn validate_detects_size_mismatch() {
        let mut policy = boxed();
        let mut store = empty_store();

        policy.insert(1);
        store.insert(1, CacheEntry::new(Arc::new("one")));
        assert!(policy.validate(&store).is_ok());

        store.insert(2, CacheEntry::new(Arc::new("two")));
        assert!(policy.validate(&store).is_err());
    }

    #[test]
    fn validate_detects_untracked_store_key() {
        let mut policy = boxed();
        let mut store = empty_store();

        policy.insert(1);
        store.insert(2, CacheEntry::new(Arc::new("two")));

        let err = policy.validate(&store).unwrap_err();
        assert!(err.message().contains("missing from the store"));
    }

    #[test]
    fn recency_order_reports_mru_first() {
        let mut policy: AccessOrderPolicy<u64> = AccessOrderPolicy::new();

        let p: &mut dyn EvictionPolicy<u64, ()> = &mut policy;
        p.insert(1);
        p.insert(2);
        p.insert(3);
        p.update(&1);

        let order: Vec<_> = policy.recency_order().collect();
        assert_eq!(order, vec![1, 3, 2]);
    }
}

//! Cross-policy invariant tests.
//!
//! Exercises both eviction policies through the public cache surface and
//! checks the properties that must hold after every operation: the size
//! bound, policy bookkeeping consistency, and deterministic victim
//! selection.

use recache::prelude::*;

fn lru_cache(limit: usize) -> BoundedCache<u64, String> {
    CacheBuilder::new(limit)
        .policy(PolicyKind::AccessOrder)
        .build()
}

fn time_cache(limit: usize) -> BoundedCache<u64, String> {
    CacheBuilder::new(limit)
        .policy(PolicyKind::TimeThreshold)
        .build()
}

fn all_caches(limit: usize) -> Vec<(&'static str, BoundedCache<u64, String>)> {
    vec![
        ("access-order", lru_cache(limit)),
        ("time-threshold", time_cache(limit)),
    ]
}

#[test]
fn round_trip_under_every_policy() {
    for (name, cache) in all_caches(4) {
        assert!(
            !cache.put(1, "one".to_string()),
            "{name}: first put must report a new key"
        );
        assert_eq!(
            cache.get(&1).as_deref(),
            Some(&"one".to_string()),
            "{name}: get must return the stored value"
        );
        assert!(
            cache.put(1, "uno".to_string()),
            "{name}: second put must report an existing key"
        );
        assert_eq!(
            cache.get(&1).as_deref(),
            Some(&"uno".to_string()),
            "{name}: overwrite must replace the value"
        );
    }
}

#[test]
fn size_never_exceeds_limit() {
    for (name, cache) in all_caches(8) {
        for i in 0..200 {
            cache.put(i, format!("value-{i}"));
            assert!(
                cache.len() <= 8,
                "{name}: store grew to {} with limit 8",
                cache.len()
            );
            cache
                .check_invariants()
                .unwrap_or_else(|e| panic!("{name}: invariant violated after put {i}: {e}"));
        }
    }
}

#[test]
fn interleaved_operations_keep_invariants() {
    for (name, cache) in all_caches(5) {
        for i in 0u64..100 {
            cache.put(i % 13, format!("v{i}"));
            cache.get(&(i % 7));
            if i % 11 == 0 {
                cache.remove(&(i % 13));
            }
            cache
                .check_invariants()
                .unwrap_or_else(|e| panic!("{name}: invariant violated at step {i}: {e}"));
        }
    }
}

#[test]
fn zero_limit_disables_every_policy() {
    for (name, cache) in all_caches(0) {
        assert!(!cache.put(1, "one".to_string()), "{name}: put must be rejected");
        assert!(cache.get(&1).is_none(), "{name}: nothing must be stored");
        assert!(cache.is_empty(), "{name}: cache must stay empty");
        assert_eq!(
            cache.stats().total_writes,
            0,
            "{name}: rejected puts must not count as writes"
        );
    }
}

#[test]
fn access_order_evicts_least_recently_used() {
    let cache = lru_cache(2);
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    cache.put(3, "three".to_string());

    assert!(!cache.contains(&1), "key 1 was LRU and must be evicted");
    assert!(cache.contains(&2), "key 2 must survive");
    assert!(cache.contains(&3), "key 3 must survive");
}

#[test]
fn access_order_get_protects_from_eviction() {
    let cache = lru_cache(3);
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    cache.put(3, "three".to_string());
    cache.get(&1);

    cache.put(4, "four".to_string());
    assert!(cache.contains(&1), "reading key 1 must refresh its recency");
    assert!(!cache.contains(&2), "key 2 became LRU and must be evicted");
}

#[test]
fn time_threshold_evicts_oldest_access() {
    let cache = time_cache(3);
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());
    cache.put(3, "three".to_string());
    cache.get(&1);

    // Ticks now: 2 oldest, then 3, then 1.
    cache.put(4, "four".to_string());
    assert!(!cache.contains(&2), "key 2 holds the oldest tick");
    assert!(cache.contains(&1) && cache.contains(&3) && cache.contains(&4));

    cache.put(5, "five".to_string());
    assert!(!cache.contains(&3), "key 3 is next oldest");
}

#[test]
fn policies_agree_on_pure_insert_order() {
    // With no reads or overwrites, recency order and tick order coincide,
    // so both policies must evict the same victims.
    for (name, cache) in all_caches(3) {
        for i in 1..=6 {
            cache.put(i, format!("v{i}"));
        }
        let survivors: Vec<u64> = (1..=6).filter(|k| cache.contains(k)).collect();
        assert_eq!(survivors, vec![4, 5, 6], "{name}: oldest inserts evict first");
    }
}

#[test]
fn counters_survive_eviction_and_clear() {
    for (name, cache) in all_caches(2) {
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(3, "three".to_string()); // evicts one entry
        cache.get(&3);
        cache.get(&99);
        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.len, 0, "{name}: clear must empty the store");
        assert_eq!(stats.total_writes, 3, "{name}: writes are lifetime counters");
        assert_eq!(stats.total_reads, 2, "{name}: reads are lifetime counters");
        assert_eq!(stats.successful_reads, 1, "{name}: only key 3 was a hit");
    }
}

#[test]
fn entry_stats_reset_on_reinsert_after_eviction() {
    let cache = lru_cache(1);
    cache.put(1, "one".to_string());
    cache.get(&1);
    cache.put(2, "two".to_string()); // evicts 1
    cache.put(1, "one again".to_string()); // fresh entry, fresh stats

    let stats = cache.entry_stats(&1).expect("key 1 was just inserted");
    assert_eq!(stats.reads, 0, "re-inserted entry must not inherit old reads");
    assert_eq!(stats.writes, 1);
}

/// Policy that never produces a victim, modeling bookkeeping that lost
/// track of the store.
struct StalledPolicy;

impl<K, V> EvictionPolicy<K, V> for StalledPolicy
where
    K: Copy + Eq + std::hash::Hash,
{
    fn evict(&mut self, _entries: &EntryStore<K, V>) -> Option<K> {
        None
    }

    fn insert(&mut self, _key: K) {}

    fn update(&mut self, _key: &K) {}

    fn name(&self) -> &'static str {
        "stalled"
    }
}

#[test]
fn eviction_miss_overflows_by_one_and_drains_later() {
    let cache: BoundedCache<u64, String> =
        BoundedCache::with_policy(2, Box::new(StalledPolicy));
    cache.put(1, "one".to_string());
    cache.put(2, "two".to_string());

    // No victim is available, so the put lands anyway.
    assert!(
        !cache.put(3, "three".to_string()),
        "put must proceed on an eviction miss"
    );
    assert_eq!(cache.len(), 3, "store exceeds the limit by exactly one entry");
    for k in 1..=3u64 {
        assert!(cache.contains(&k), "key {k} must still be resident");
    }
    assert!(
        cache.check_invariants().is_err(),
        "overflow must be visible to the debug surface"
    );

    // Once a victim-producing policy is installed, the next insert drains
    // the overflow and restores the size bound.
    cache.set_policy(Box::new(AccessOrderPolicy::new()));
    cache.put(4, "four".to_string());
    assert!(
        cache.len() <= 2,
        "store holds {} entries with limit 2",
        cache.len()
    );
    assert!(cache.contains(&4), "the draining insert must itself land");
    cache
        .check_invariants()
        .expect("size bound restored after drain");
}

#[test]
fn policy_swap_preserves_contents_and_invariants() {
    let cache = lru_cache(4);
    for i in 1..=4 {
        cache.put(i, format!("v{i}"));
    }

    cache.set_policy(Box::new(TimeThresholdPolicy::new()));
    for i in 1..=4u64 {
        assert!(cache.contains(&i), "swap must not drop entries");
    }
    cache
        .check_invariants()
        .expect("invariants must hold right after a swap");

    // The swapped-in policy governs the next eviction.
    cache.get(&1);
    cache.put(5, "v5".to_string());
    assert!(cache.contains(&1), "refreshed key must survive under new policy");
    assert_eq!(cache.len(), 4);
}

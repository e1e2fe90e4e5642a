//! # recache
//!
//! Bounded in-process cache with swappable eviction policies.
//!
//! The cache stores values as `Arc<V>` behind a single exclusive lock and
//! delegates victim selection to a pluggable [`EvictionPolicy`]. Two
//! strategies ship with the crate:
//!
//! | Strategy | Type | Eviction basis |
//! |----------|------|----------------|
//! | Access order (LRU) | [`policy::AccessOrderPolicy`] | Tail of an O(1) recency list |
//! | Time threshold | [`policy::TimeThresholdPolicy`] | Oldest `last_accessed` tick, O(n) scan |
//!
//! ## Quick Start
//!
//! ```
//! use recache::prelude::*;
//!
//! let cache: BoundedCache<u64, String> = CacheBuilder::new(2)
//!     .policy(PolicyKind::AccessOrder)
//!     .build();
//!
//! cache.put(1, "one".to_string());
//! cache.put(2, "two".to_string());
//! cache.get(&1); // key 2 is now least recently used
//! cache.put(3, "three".to_string());
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! ```
//!
//! ## Module Map
//!
//! - [`cache`]: the orchestrator, [`CacheCore`] and the locked [`BoundedCache`]
//! - [`policy`]: the [`EvictionPolicy`] trait and both strategies
//! - [`ds`]: the arena-backed recency list underlying the LRU strategy
//! - [`store`]: entry storage with per-entry read/write statistics
//! - [`builder`]: fluent construction, policy chosen by [`PolicyKind`]
//! - [`error`]: [`error::InvariantError`] for the debugging surface
//!
//! A limit of 0 builds a permanently disabled cache: every put is rejected
//! and every get misses. Eviction statistics and counters are observable
//! through [`BoundedCache::stats`] and [`BoundedCache::entry_stats`].

pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;

pub mod prelude;

pub use builder::{CacheBuilder, PolicyKind};
pub use cache::{BoundedCache, CacheCore, CacheStats};
pub use policy::EvictionPolicy;

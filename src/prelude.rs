//! Convenience re-exports of the most commonly used types.
//!
//! ```
//! use recache::prelude::*;
//!
//! let cache: BoundedCache<u64, String> = CacheBuilder::new(64)
//!     .policy(PolicyKind::AccessOrder)
//!     .build();
//! cache.put(1, "one".to_string());
//! assert!(cache.contains(&1));
//! ```

pub use crate::builder::{CacheBuilder, PolicyKind};
pub use crate::cache::{BoundedCache, CacheCore, CacheStats};
pub use crate::ds::RecencyList;
pub use crate::error::InvariantError;
pub use crate::policy::{AccessOrderPolicy, EvictionPolicy, TimeThresholdPolicy};
pub use crate::store::{CacheEntry, EntryStats, EntryStore};

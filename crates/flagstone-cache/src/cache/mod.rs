//! Record stores for Flagstone.
//!
//! This module provides the key→record stores backing both cache services,
//! built on Moka, with pattern-based invalidation and metrics.

pub mod invalidation;
pub mod store;

// Re-exports
pub use invalidation::InvalidationResult;
pub use store::{CacheConfig, FeatureCacheStore, FlagCacheStore, RecordStore};

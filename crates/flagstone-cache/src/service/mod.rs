//! Cache-aside services.
//!
//! Each service owns one record store and one remote client. A remote outage
//! degrades to an empty mapping; a rejected signature reaches the caller.

mod features;
mod flags;
mod outcome;

pub use features::TenantFeatureCacheService;
pub use flags::FeatureFlagCacheService;

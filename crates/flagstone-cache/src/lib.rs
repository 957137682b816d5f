//! # Flagstone Cache
//!
//! Cache-aside services in front of a remote feature evaluator.
//!
//! [`FeatureFlagCacheService`] keeps the flags of each user and
//! [`TenantFeatureCacheService`] the business features of each tenant. Both
//! serve from an in-memory store, call the remote on a miss, and degrade to an
//! empty mapping while the remote is down. Responses whose signature does not
//! verify are never stored.
//!
//! ## Example
//!
//! ```ignore
//! use flagstone_cache::{FlagstoneState, Settings};
//! use flagstone_core::UserContext;
//!
//! let settings = Settings::load()?;
//! let state = FlagstoneState::from_settings(&settings)?;
//!
//! let user = UserContext::new("jane@example.com").with_tenant("t-9");
//! let record = state.flags().get_flags("user-42", &user).await?;
//! if record.is_enabled("darkMode") {
//!     // ...
//! }
//! ```

pub mod cache;
pub mod metrics;
pub mod service;
pub mod settings;
pub mod state;

pub use cache::{CacheConfig, FeatureCacheStore, FlagCacheStore, InvalidationResult, RecordStore};
pub use service::{FeatureFlagCacheService, TenantFeatureCacheService};
pub use settings::{DeploymentSettings, Settings, StalenessSettings};
pub use state::{FlagstoneState, TENANT_FEATURES_STORE, USER_FLAGS_STORE};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

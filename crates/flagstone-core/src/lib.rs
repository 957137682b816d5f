//! Flagstone Core - Domain types and policies
//!
//! This crate provides the records kept by the flag and feature caches, the
//! error taxonomy used to classify remote failures, the identity traits sent to
//! the remote evaluator and the staleness policy.

pub mod error;
pub mod identity;
pub mod record;
pub mod staleness;
pub mod types;

pub use error::{FlagError, Result};
pub use identity::{
    DeploymentContext, IdentityTraits, UserContext, default_traits, email_domain, hash_identifier,
};
pub use record::{CachedFeatureRecord, CachedFlagRecord, CachedRecord, FlagMap, backdate_offset};
pub use staleness::StalenessPolicy;
pub use types::{FeaturesRequest, FeaturesResponse, IdentityFlags, ResponseEnvelope};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Remote evaluator trait definitions.

use async_trait::async_trait;
use flagstone_core::{FeaturesRequest, FeaturesResponse, IdentityFlags, IdentityTraits, Result};

/// Evaluates per-user feature flags.
///
/// The call is identity-batched: the response maps every subject id in the
/// request to its own flags. A response without data is an empty mapping.
///
/// # Errors
///
/// - `FlagError::RemoteUnavailable` if the evaluator cannot be reached or fails
/// - `FlagError::InvalidSignature` if a successful response fails verification
#[async_trait]
pub trait RemoteFlagClient: Send + Sync {
    async fn evaluate_flags(&self, traits: &IdentityTraits) -> Result<IdentityFlags>;

    /// Name used in logs and metrics.
    fn name(&self) -> &str {
        "remote-flags"
    }
}

/// Evaluates tenant-level business features.
///
/// A response without data is `FeaturesResponse::default()`.
#[async_trait]
pub trait RemoteFeatureClient: Send + Sync {
    async fn evaluate_features(&self, request: &FeaturesRequest) -> Result<FeaturesResponse>;

    /// Name used in logs and metrics.
    fn name(&self) -> &str {
        "remote-features"
    }
}

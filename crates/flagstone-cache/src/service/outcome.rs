//! Interpretation of remote outcomes at the cache-service boundary.
//!
//! This is the only place where a remote failure turns into a default value.

use flagstone_core::{FeaturesResponse, FlagError, Result};
use tracing::{debug, error, warn};

use crate::metrics::{RefreshOutcome, record_refresh};

/// Passes successes and signature failures through, and replaces an
/// unreachable remote with `T::default()`.
pub(crate) fn suppress_unavailable<T: Default>(
    subject: &'static str,
    key: &str,
    outcome: Result<T>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            record_refresh(subject, RefreshOutcome::Success);
            Ok(value)
        },
        Err(e) if e.is_suppressible() => {
            debug!(
                subject,
                key = %key,
                error = %e,
                "Received error from remote evaluator, serving empty mapping"
            );
            record_refresh(subject, RefreshOutcome::Degraded);
            Ok(T::default())
        },
        Err(e) => {
            warn!(subject, key = %key, error = %e, "Remote response rejected");
            record_refresh(subject, RefreshOutcome::Rejected);
            Err(e)
        },
    }
}

/// Ungated reads never fail: every error becomes the empty response.
pub(crate) fn or_empty_response(
    tenant_id: &str,
    outcome: Result<FeaturesResponse>,
) -> FeaturesResponse {
    match outcome {
        Ok(response) => response,
        Err(e) => {
            let rejected = matches!(e, FlagError::InvalidSignature { .. });
            error!(
                tenant_id = %tenant_id,
                error = %e,
                signature_rejected = rejected,
                "Received error from remote evaluator while fetching features"
            );
            FeaturesResponse::default()
        },
    }
}

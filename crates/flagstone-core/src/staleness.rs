//! Freshness decisions for cached records.

use chrono::{DateTime, Duration, Utc};

use crate::record::{CachedRecord, backdate_offset};

/// Decides whether a cached record can be served without a refresh.
///
/// The default window equals the backdating offset, so a record written after
/// a failed evaluation is stale on its next check while a successful one stays
/// fresh for a day. A record with an empty mapping is always stale.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use flagstone_core::{CachedFlagRecord, FlagMap, StalenessPolicy};
///
/// let now = Utc::now();
/// let failed = CachedFlagRecord::from_evaluation("u1", FlagMap::new(), now);
///
/// assert!(StalenessPolicy::default().is_stale(&failed, now));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    window: Duration,
}

impl StalenessPolicy {
    /// Creates a policy with the given freshness window.
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    /// Creates a policy from a window expressed in seconds.
    pub fn from_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX);
        Self::new(Duration::try_seconds(secs).unwrap_or(Duration::MAX))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// True when `record` must be refreshed before it is trusted at `now`.
    pub fn is_stale<R: CachedRecord>(&self, record: &R, now: DateTime<Utc>) -> bool {
        if record.is_empty() {
            return true;
        }
        now.signed_duration_since(record.refreshed_at()) > self.window
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(backdate_offset())
    }
}

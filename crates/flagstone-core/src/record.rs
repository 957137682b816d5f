//! Cached records for user flags and tenant features.
//!
//! Records are immutable values. A store replaces a record as a whole, it
//! never patches a field in place.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Mapping of flag or feature name to its evaluated value.
pub type FlagMap = HashMap<String, bool>;

/// How far a record is pushed into the past when its mapping came back empty.
pub fn backdate_offset() -> Duration {
    Duration::days(1)
}

/// Timestamp a freshly evaluated mapping should carry.
///
/// An empty mapping means the remote had nothing to say (usually because it was
/// down), so the timestamp is backdated and the next staleness check retries.
fn stamp(mapping: &FlagMap, now: DateTime<Utc>) -> DateTime<Utc> {
    if mapping.is_empty() {
        now - backdate_offset()
    } else {
        now
    }
}

/// Behaviour shared by every record a store can hold.
pub trait CachedRecord: Clone + Send + Sync + 'static {
    /// Opaque identity the record belongs to.
    fn key(&self) -> &str;

    /// When the mapping was last evaluated (possibly backdated).
    fn refreshed_at(&self) -> DateTime<Utc>;

    /// True when the mapping carries no entries.
    fn is_empty(&self) -> bool;
}

/// Feature flags evaluated for a single user.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use flagstone_core::{CachedFlagRecord, FlagMap};
///
/// let now = Utc::now();
/// let mut flags = FlagMap::new();
/// flags.insert("darkMode".to_string(), true);
///
/// let record = CachedFlagRecord::from_evaluation("u1", flags, now);
/// assert_eq!(record.refreshed_at(), now);
/// assert!(record.is_enabled("darkMode"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedFlagRecord {
    key: String,
    #[serde(default)]
    flags: FlagMap,
    refreshed_at: DateTime<Utc>,
}

impl CachedFlagRecord {
    /// Creates a record with an explicit timestamp.
    pub fn new(key: impl Into<String>, flags: FlagMap, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            flags,
            refreshed_at,
        }
    }

    /// Wraps the result of a remote evaluation, backdating empty mappings.
    pub fn from_evaluation(key: impl Into<String>, flags: FlagMap, now: DateTime<Utc>) -> Self {
        let refreshed_at = stamp(&flags, now);
        Self::new(key, flags, refreshed_at)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn flags(&self) -> &FlagMap {
        &self.flags
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// Unknown flags evaluate to off.
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    pub fn into_flags(self) -> FlagMap {
        self.flags
    }
}

impl CachedRecord for CachedFlagRecord {
    fn key(&self) -> &str {
        &self.key
    }

    fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// Business features evaluated for a single tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedFeatureRecord {
    key: String,
    #[serde(default)]
    features: FlagMap,
    refreshed_at: DateTime<Utc>,
}

impl CachedFeatureRecord {
    /// Creates a record with an explicit timestamp.
    pub fn new(key: impl Into<String>, features: FlagMap, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            features,
            refreshed_at,
        }
    }

    /// Wraps the result of a remote evaluation, backdating empty mappings.
    ///
    /// A `None` mapping is treated like an empty one.
    pub fn from_evaluation(
        key: impl Into<String>,
        features: Option<FlagMap>,
        now: DateTime<Utc>,
    ) -> Self {
        let features = features.unwrap_or_default();
        let refreshed_at = stamp(&features, now);
        Self::new(key, features, refreshed_at)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn features(&self) -> &FlagMap {
        &self.features
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    /// Unknown features evaluate to off.
    pub fn is_enabled(&self, feature: &str) -> bool {
        self.features.get(feature).copied().unwrap_or(false)
    }

    pub fn into_features(self) -> FlagMap {
        self.features
    }
}

impl CachedRecord for CachedFeatureRecord {
    fn key(&self) -> &str {
        &self.key
    }

    fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

//! Cache-aside service for per-user feature flags.

use std::sync::Arc;

use chrono::Utc;
use flagstone_core::{
    CachedFlagRecord, DeploymentContext, FlagMap, IdentityTraits, Result, StalenessPolicy,
    UserContext,
};
use flagstone_remote::RemoteFlagClient;
use tracing::{debug, info};

use super::outcome::suppress_unavailable;
use crate::cache::{FlagCacheStore, InvalidationResult};

const SUBJECT: &str = "user_flags";

/// Serves user feature flags from the store, falling back to the remote
/// evaluator on a miss.
///
/// A remote outage never fails a call: the user gets an empty mapping ("all
/// flags off") stored with a backdated timestamp so the next policy check
/// retries. A response with a bad signature always fails the call and is
/// never stored.
///
/// Concurrent misses on the same key may both reach the remote; the last
/// write wins.
#[derive(Clone)]
pub struct FeatureFlagCacheService {
    store: FlagCacheStore,
    client: Arc<dyn RemoteFlagClient>,
    deployment: Arc<DeploymentContext>,
    policy: StalenessPolicy,
}

impl FeatureFlagCacheService {
    pub fn new(
        store: FlagCacheStore,
        client: Arc<dyn RemoteFlagClient>,
        deployment: Arc<DeploymentContext>,
        policy: StalenessPolicy,
    ) -> Self {
        Self {
            store,
            client,
            deployment,
            policy,
        }
    }

    pub fn store(&self) -> &FlagCacheStore {
        &self.store
    }

    pub fn policy(&self) -> StalenessPolicy {
        self.policy
    }

    /// Returns the cached record for `key`, populating the store on a miss.
    ///
    /// A hit is returned unchanged, however old it is.
    pub async fn fetch_cached(
        &self,
        key: &str,
        user: &UserContext,
    ) -> Result<Arc<CachedFlagRecord>> {
        if let Some(record) = self.store.get(key).await {
            debug!(key = %key, "Feature flags served from cache");
            return Ok(record);
        }

        self.populate(key, user).await
    }

    /// Evaluates every flag for `key` remotely, bypassing the store.
    ///
    /// # Errors
    ///
    /// Only `FlagError::InvalidSignature`; an unreachable remote yields an
    /// empty mapping.
    pub async fn force_refresh(&self, key: &str, user: &UserContext) -> Result<FlagMap> {
        let traits = IdentityTraits::for_subject(key, user, &self.deployment, Utc::now());

        let outcome = self
            .client
            .evaluate_flags(&traits)
            .await
            .map(|mut by_identity| by_identity.remove(key).unwrap_or_default());

        suppress_unavailable(SUBJECT, key, outcome)
    }

    /// Stores `record` for `key` unconditionally and returns it.
    pub async fn replace_cached(
        &self,
        key: &str,
        record: CachedFlagRecord,
    ) -> Arc<CachedFlagRecord> {
        self.store.put(key, record).await
    }

    /// Removes any cached record for `key`.
    pub async fn evict(&self, key: &str) {
        self.store.evict(key).await;
        info!(key = %key, "Feature flags evicted");
    }

    /// Removes every cached record whose key matches a glob pattern.
    pub async fn evict_matching(&self, pattern: &str) -> InvalidationResult {
        self.store.evict_matching(pattern).await
    }

    /// Removes every cached record.
    pub async fn evict_all(&self) {
        self.store.evict_all().await;
        info!("All feature flags evicted");
    }

    /// Returns flags for `key`, refreshing them first when the staleness
    /// policy says so.
    ///
    /// A refresh that comes back empty keeps the previous record, so an outage
    /// never erases flags that were already known.
    pub async fn get_flags(&self, key: &str, user: &UserContext) -> Result<Arc<CachedFlagRecord>> {
        let Some(cached) = self.store.get(key).await else {
            return self.populate(key, user).await;
        };

        if !self.policy.is_stale(cached.as_ref(), Utc::now()) {
            return Ok(cached);
        }

        let flags = self.force_refresh(key, user).await?;
        if flags.is_empty() {
            debug!(key = %key, "Refresh returned no flags, keeping cached record");
            return Ok(cached);
        }

        let record = CachedFlagRecord::from_evaluation(key, flags, Utc::now());
        Ok(self.store.put(key, record).await)
    }

    async fn populate(&self, key: &str, user: &UserContext) -> Result<Arc<CachedFlagRecord>> {
        let flags = self.force_refresh(key, user).await?;
        let record = CachedFlagRecord::from_evaluation(key, flags, Utc::now());
        debug!(
            key = %key,
            flags = record.flags().len(),
            refreshed_at = %record.refreshed_at(),
            "Feature flags cached"
        );
        Ok(self.store.put(key, record).await)
    }
}

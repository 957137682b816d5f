//! Cache-aside service for per-tenant business features.

use std::sync::Arc;

use chrono::Utc;
use flagstone_core::{
    CachedFeatureRecord, DeploymentContext, FeaturesRequest, FeaturesResponse, FlagMap, Result,
    StalenessPolicy,
};
use flagstone_remote::RemoteFeatureClient;
use tracing::{debug, info};

use super::outcome::{or_empty_response, suppress_unavailable};
use crate::cache::FeatureCacheStore;

const SUBJECT: &str = "tenant_features";

/// Serves tenant business features from the store, falling back to the
/// remote evaluator on a miss.
///
/// Same degradation rules as the user flag service: an unreachable remote
/// yields an empty, backdated record and a bad signature fails the call.
#[derive(Clone)]
pub struct TenantFeatureCacheService {
    store: FeatureCacheStore,
    client: Arc<dyn RemoteFeatureClient>,
    deployment: Arc<DeploymentContext>,
    policy: StalenessPolicy,
}

impl TenantFeatureCacheService {
    pub fn new(
        store: FeatureCacheStore,
        client: Arc<dyn RemoteFeatureClient>,
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

    pub fn store(&self) -> &FeatureCacheStore {
        &self.store
    }

    /// Returns the cached record for `tenant_id`, populating the store on a miss.
    pub async fn fetch_cached(&self, tenant_id: &str) -> Result<Arc<CachedFeatureRecord>> {
        if let Some(record) = self.store.get(tenant_id).await {
            debug!(tenant_id = %tenant_id, "Tenant features served from cache");
            return Ok(record);
        }

        self.populate(tenant_id).await
    }

    /// Evaluates every business feature of `tenant_id` remotely, bypassing
    /// the store.
    pub async fn force_refresh(&self, tenant_id: &str) -> Result<FlagMap> {
        let request = self.request_for(tenant_id);

        let outcome = self
            .client
            .evaluate_features(&request)
            .await
            .map(|response| response.features.unwrap_or_default());

        suppress_unavailable(SUBJECT, tenant_id, outcome)
    }

    /// Stores `record` for `tenant_id` unconditionally and returns it.
    pub async fn replace_cached(
        &self,
        tenant_id: &str,
        record: CachedFeatureRecord,
    ) -> Arc<CachedFeatureRecord> {
        self.store.put(tenant_id, record).await
    }

    /// Removes any cached record for `tenant_id`.
    pub async fn evict(&self, tenant_id: &str) {
        self.store.evict(tenant_id).await;
        info!(tenant_id = %tenant_id, "Tenant features evicted");
    }

    /// Removes every cached record.
    pub async fn evict_all(&self) {
        self.store.evict_all().await;
        info!("All tenant features evicted");
    }

    /// Returns features for `tenant_id`, refreshing them first when the
    /// staleness policy says so. An empty refresh keeps the previous record.
    pub async fn get_features(&self, tenant_id: &str) -> Result<Arc<CachedFeatureRecord>> {
        let Some(cached) = self.store.get(tenant_id).await else {
            return self.populate(tenant_id).await;
        };

        if !self.policy.is_stale(cached.as_ref(), Utc::now()) {
            return Ok(cached);
        }

        let features = self.force_refresh(tenant_id).await?;
        if features.is_empty() {
            debug!(tenant_id = %tenant_id, "Refresh returned no features, keeping cached record");
            return Ok(cached);
        }

        let record = CachedFeatureRecord::from_evaluation(tenant_id, Some(features), Utc::now());
        Ok(self.store.put(tenant_id, record).await)
    }

    /// Queries the remote directly, bypassing the store.
    ///
    /// Never fails: any error, a rejected signature included, yields
    /// `FeaturesResponse::default()`.
    pub async fn get_remote_features(&self, request: &FeaturesRequest) -> FeaturesResponse {
        let outcome = self.client.evaluate_features(request).await;
        or_empty_response(&request.tenant_id, outcome)
    }

    fn request_for(&self, tenant_id: &str) -> FeaturesRequest {
        let request = FeaturesRequest::new(&self.deployment.instance_id, tenant_id)
            .with_product_version(&self.deployment.product_version);

        match &self.deployment.license_key {
            Some(license_key) => request.with_license_key(license_key),
            None => request,
        }
    }

    async fn populate(&self, tenant_id: &str) -> Result<Arc<CachedFeatureRecord>> {
        let features = self.force_refresh(tenant_id).await?;
        let record = CachedFeatureRecord::from_evaluation(tenant_id, Some(features), Utc::now());
        debug!(
            tenant_id = %tenant_id,
            features = record.features().len(),
            refreshed_at = %record.refreshed_at(),
            "Tenant features cached"
        );
        Ok(self.store.put(tenant_id, record).await)
    }
}

//! Service wiring.

use std::sync::Arc;

use flagstone_core::Result;
use flagstone_remote::{CloudServicesClient, RemoteFeatureClient, RemoteFlagClient};
use tracing::info;

use crate::cache::{FeatureCacheStore, FlagCacheStore};
use crate::metrics::register_metrics;
use crate::service::{FeatureFlagCacheService, TenantFeatureCacheService};
use crate::settings::Settings;

/// Store name of the per-user flag cache.
pub const USER_FLAGS_STORE: &str = "user_flags";

/// Store name of the per-tenant feature cache.
pub const TENANT_FEATURES_STORE: &str = "tenant_features";

/// Both cache services, built from one set of settings.
#[derive(Clone)]
pub struct FlagstoneState {
    flags: FeatureFlagCacheService,
    features: TenantFeatureCacheService,
}

impl FlagstoneState {
    /// Builds the services on top of a signature-verifying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `FlagError::Configuration` if the settings are invalid.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        let client = Arc::new(CloudServicesClient::new(settings.remote.clone())?);
        info!(
            base_url = %settings.remote.base_url(),
            instance_id = %settings.deployment.instance_id,
            "Remote evaluator client initialized"
        );

        Ok(Self::with_clients(settings, client.clone(), client))
    }

    /// Builds the services on top of the given clients.
    pub fn with_clients(
        settings: &Settings,
        flag_client: Arc<dyn RemoteFlagClient>,
        feature_client: Arc<dyn RemoteFeatureClient>,
    ) -> Self {
        register_metrics();

        let deployment = Arc::new(settings.deployment.to_context());
        let policy = settings.staleness.policy();

        let flags = FeatureFlagCacheService::new(
            FlagCacheStore::new(USER_FLAGS_STORE, settings.cache.clone()),
            flag_client,
            Arc::clone(&deployment),
            policy,
        );
        let features = TenantFeatureCacheService::new(
            FeatureCacheStore::new(TENANT_FEATURES_STORE, settings.cache.clone()),
            feature_client,
            deployment,
            policy,
        );

        Self { flags, features }
    }

    pub fn flags(&self) -> &FeatureFlagCacheService {
        &self.flags
    }

    pub fn features(&self) -> &TenantFeatureCacheService {
        &self.features
    }
}

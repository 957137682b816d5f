//! Test helpers para flagstone-cache.

#![allow(dead_code, unused_imports)]

pub mod mocks;

pub use mocks::{MockFeatureClient, MockFlagClient, Reply};

use std::sync::Arc;

use flagstone_cache::{
    CacheConfig, FeatureCacheStore, FeatureFlagCacheService, FlagCacheStore,
    TenantFeatureCacheService,
};
use flagstone_core::{DeploymentContext, FlagMap, StalenessPolicy, UserContext};
use tracing_subscriber::EnvFilter;

/// Instala un subscriber controlado por `RUST_LOG`. Se puede llamar varias veces.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Construye un FlagMap a partir de pares `(nombre, valor)`.
pub fn flags(pairs: &[(&str, bool)]) -> FlagMap {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

pub fn deployment() -> Arc<DeploymentContext> {
    Arc::new(DeploymentContext {
        instance_id: "inst-42".to_string(),
        default_tenant_id: "tenant-default".to_string(),
        product_version: "v1.9.2".to_string(),
        cloud_hosting: false,
        telemetry_disabled: false,
        license_key: Some("lic-123".to_string()),
    })
}

pub fn user() -> UserContext {
    UserContext::new("jane@example.com").with_tenant("t-9")
}

pub fn flag_service(client: Arc<MockFlagClient>) -> FeatureFlagCacheService {
    FeatureFlagCacheService::new(
        FlagCacheStore::new("user_flags", CacheConfig::default()),
        client,
        deployment(),
        StalenessPolicy::default(),
    )
}

pub fn feature_service(client: Arc<MockFeatureClient>) -> TenantFeatureCacheService {
    TenantFeatureCacheService::new(
        FeatureCacheStore::new("tenant_features", CacheConfig::default()),
        client,
        deployment(),
        StalenessPolicy::default(),
    )
}

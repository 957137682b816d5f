#![allow(dead_code)]
use flagstone_core::{DeploymentContext, FlagMap};

/// Builds a FlagMap from `(name, value)` pairs.
pub fn flags(pairs: &[(&str, bool)]) -> FlagMap {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Returns a self-hosted deployment fixture.
pub fn self_hosted() -> DeploymentContext {
    DeploymentContext {
        instance_id: "inst-42".to_string(),
        default_tenant_id: "tenant-default".to_string(),
        product_version: "v1.9.2".to_string(),
        cloud_hosting: false,
        telemetry_disabled: true,
        license_key: None,
    }
}

//! Settings loading.
//!
//! Layers, lowest precedence first: serde defaults, an optional
//! `flagstone.toml`, then `FLAGSTONE_`-prefixed environment variables with
//! `__` separating sections (`FLAGSTONE_REMOTE__BASE_URL`).

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use flagstone_core::{DeploymentContext, FlagError, Result, StalenessPolicy};
use flagstone_remote::RemoteConfig;
use serde::Deserialize;

use crate::cache::CacheConfig;

const DEFAULT_FILE: &str = "flagstone";
const ENV_PREFIX: &str = "FLAGSTONE";

/// Everything needed to assemble the cache services.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub deployment: DeploymentSettings,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub staleness: StalenessSettings,
}

/// Deployment facts as they appear in settings sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DeploymentSettings {
    pub instance_id: String,
    pub default_tenant_id: String,
    pub product_version: String,
    pub cloud_hosting: bool,
    pub telemetry_disabled: bool,
    pub license_key: Option<String>,
}

impl DeploymentSettings {
    pub fn to_context(&self) -> DeploymentContext {
        DeploymentContext {
            instance_id: self.instance_id.clone(),
            default_tenant_id: self.default_tenant_id.clone(),
            product_version: self.product_version.clone(),
            cloud_hosting: self.cloud_hosting,
            telemetry_disabled: self.telemetry_disabled,
            license_key: self.license_key.clone().filter(|key| !key.is_empty()),
        }
    }
}

/// Freshness window applied by `get_flags` and `get_features`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StalenessSettings {
    /// Seconds a record stays fresh (default: one day)
    #[serde(default = "default_freshness_window_secs")]
    pub freshness_window_secs: u64,
}

fn default_freshness_window_secs() -> u64 {
    86_400
}

impl Default for StalenessSettings {
    fn default() -> Self {
        Self {
            freshness_window_secs: default_freshness_window_secs(),
        }
    }
}

impl StalenessSettings {
    pub fn policy(&self) -> StalenessPolicy {
        StalenessPolicy::from_secs(self.freshness_window_secs)
    }
}

impl Settings {
    /// Loads settings from `flagstone.toml` (if present) and the environment.
    ///
    /// # Errors
    ///
    /// Returns `FlagError::Configuration` if a source cannot be read or the
    /// merged result is invalid.
    pub fn load() -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(DEFAULT_FILE).required(false))
            .add_source(environment());

        Self::from_builder(builder)
    }

    /// Loads settings from an explicit file, which must exist, plus the
    /// environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()).required(true))
            .add_source(environment());

        Self::from_builder(builder)
    }

    /// Checks cross-field invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.remote.validate()?;

        if self.deployment.instance_id.trim().is_empty() {
            return Err(FlagError::configuration("deployment.instance_id is required"));
        }
        if self.cache.max_capacity == 0 {
            return Err(FlagError::configuration(
                "cache.max_capacity must be greater than zero",
            ));
        }
        Ok(())
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .build()
            .and_then(|config| config.try_deserialize::<Settings>())
            .map_err(config_error)?;

        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn config_error(e: ConfigError) -> FlagError {
    FlagError::configuration(e.to_string())
}

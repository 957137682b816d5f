//! Remote evaluator configuration.

use std::time::Duration;

use flagstone_core::FlagError;
use serde::{Deserialize, Serialize};

/// Configuration for the cloud services client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RemoteConfig {
    /// Base URL of the remote evaluator, without a trailing slash.
    base_url: String,

    /// Path of the identity-batched flag endpoint.
    #[serde(default = "default_flags_path")]
    flags_path: String,

    /// Path of the business-feature endpoint.
    #[serde(default = "default_features_path")]
    features_path: String,

    /// Response header carrying the signature.
    #[serde(default = "default_signature_header")]
    signature_header: String,

    /// Shared secret used to verify response signatures.
    #[serde(default)]
    signing_secret: String,

    /// Transport timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_flags_path() -> String {
    "/api/v1/feature-flags".to_string()
}

fn default_features_path() -> String {
    "/api/v1/business-features".to_string()
}

fn default_signature_header() -> String {
    "x-cs-signature".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl RemoteConfig {
    /// Creates a new builder for RemoteConfig.
    pub fn builder() -> RemoteConfigBuilder {
        RemoteConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn flags_path(&self) -> &str {
        &self.flags_path
    }

    pub fn features_path(&self) -> &str {
        &self.features_path
    }

    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    pub fn signing_secret(&self) -> &str {
        &self.signing_secret
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL for an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Checks the invariants a deserialized config may have skipped.
    pub fn validate(&self) -> Result<(), FlagError> {
        if self.base_url.trim().is_empty() {
            return Err(FlagError::configuration("remote.base_url is required"));
        }
        if self.signing_secret.is_empty() {
            return Err(FlagError::configuration("remote.signing_secret is required"));
        }
        if self.timeout_secs == 0 {
            return Err(FlagError::configuration(
                "remote.timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Builder for RemoteConfig.
#[derive(Debug, Default)]
pub struct RemoteConfigBuilder {
    base_url: Option<String>,
    flags_path: Option<String>,
    features_path: Option<String>,
    signature_header: Option<String>,
    signing_secret: Option<String>,
    timeout: Option<Duration>,
}

impl RemoteConfigBuilder {
    /// Sets the base URL of the remote evaluator.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn flags_path(mut self, path: impl Into<String>) -> Self {
        self.flags_path = Some(path.into());
        self
    }

    pub fn features_path(mut self, path: impl Into<String>) -> Self {
        self.features_path = Some(path.into());
        self
    }

    /// Sets the response header that carries the signature.
    pub fn signature_header(mut self, header: impl Into<String>) -> Self {
        self.signature_header = Some(header.into());
        self
    }

    /// Sets the shared verification secret.
    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }

    /// Sets the transport timeout (whole seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<RemoteConfig, FlagError> {
        let base_url = self
            .base_url
            .ok_or_else(|| FlagError::configuration("base_url is required"))?;
        let signing_secret = self
            .signing_secret
            .ok_or_else(|| FlagError::configuration("signing_secret is required"))?;

        let config = RemoteConfig {
            base_url,
            flags_path: self.flags_path.unwrap_or_else(default_flags_path),
            features_path: self.features_path.unwrap_or_else(default_features_path),
            signature_header: self.signature_header.unwrap_or_else(default_signature_header),
            signing_secret,
            timeout_secs: self
                .timeout
                .map(|t| t.as_secs())
                .unwrap_or_else(default_timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }
}

//! HTTP client for the cloud services evaluator.

use std::sync::Arc;

use async_trait::async_trait;
use flagstone_core::{
    FeaturesRequest, FeaturesResponse, FlagError, IdentityFlags, IdentityTraits, ResponseEnvelope,
    Result,
};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::classify::classify_transport_error;
use super::traits::{RemoteFeatureClient, RemoteFlagClient};
use crate::config::RemoteConfig;
use crate::signature::{HmacSignatureVerifier, SignatureVerifier};

/// Client for the remote flag and feature evaluator.
///
/// Every 2xx response must pass signature verification before its body is
/// decoded. The transport timeout comes from [`RemoteConfig::timeout`].
#[derive(Clone)]
pub struct CloudServicesClient {
    http: Client,
    config: RemoteConfig,
    verifier: Arc<dyn SignatureVerifier>,
}

impl CloudServicesClient {
    /// Creates a client verifying responses with the configured HMAC secret.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let verifier =
            HmacSignatureVerifier::new(config.signature_header(), config.signing_secret())?;
        Self::with_verifier(config, Arc::new(verifier))
    }

    /// Creates a client with a custom signature verifier.
    pub fn with_verifier(config: RemoteConfig, verifier: Arc<dyn SignatureVerifier>) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| FlagError::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            verifier,
        })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// POSTs `body` to `path` and returns the verified envelope payload.
    async fn post<Req, Res>(&self, path: &str, body: &Req) -> Result<Option<Res>>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned + Send,
    {
        let url = self.config.endpoint(path);
        debug!(url = %url, "Calling remote evaluator");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlagError::remote_status(
                status.as_u16(),
                format!("{} answered with status {}", path, status),
            ));
        }

        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(classify_transport_error)?;

        if !self.verifier.is_valid(&headers, &bytes) {
            warn!(endpoint = %path, "Rejected remote response with invalid signature");
            return Err(FlagError::invalid_signature(path));
        }

        let envelope: ResponseEnvelope<Res> = serde_json::from_slice(&bytes).map_err(|e| {
            FlagError::remote_unavailable(format!("undecodable response from {}: {}", path, e))
        })?;

        Ok(envelope.into_data())
    }
}

#[async_trait]
impl RemoteFlagClient for CloudServicesClient {
    async fn evaluate_flags(&self, traits: &IdentityTraits) -> Result<IdentityFlags> {
        let data = self.post(self.config.flags_path(), traits).await?;
        Ok(data.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "cloud-services"
    }
}

#[async_trait]
impl RemoteFeatureClient for CloudServicesClient {
    async fn evaluate_features(&self, request: &FeaturesRequest) -> Result<FeaturesResponse> {
        let data = self.post(self.config.features_path(), request).await?;
        Ok(data.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "cloud-services"
    }
}

impl std::fmt::Debug for CloudServicesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudServicesClient")
            .field("base_url", &self.config.base_url())
            .finish()
    }
}

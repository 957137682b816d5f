//! Wire types exchanged with the remote evaluator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::FlagMap;

/// Flags keyed by the identity they were evaluated for.
pub type IdentityFlags = HashMap<String, FlagMap>;

/// Success envelope returned by every remote endpoint.
///
/// # Example
///
/// ```
/// use flagstone_core::{IdentityFlags, ResponseEnvelope};
///
/// let body = r#"{"data": {"u1": {"darkMode": true}}}"#;
/// let envelope: ResponseEnvelope<IdentityFlags> = serde_json::from_str(body).unwrap();
/// assert_eq!(envelope.into_data().unwrap()["u1"]["darkMode"], true);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data: Some(data) }
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Request body of a business-feature evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesRequest {
    pub instance_id: String,
    pub tenant_id: String,
    #[serde(default)]
    pub product_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_key: Option<String>,
}

impl FeaturesRequest {
    pub fn new(instance_id: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            tenant_id: tenant_id.into(),
            ..Self::default()
        }
    }

    pub fn with_product_version(mut self, version: impl Into<String>) -> Self {
        self.product_version = version.into();
        self
    }

    pub fn with_license_key(mut self, license_key: impl Into<String>) -> Self {
        self.license_key = Some(license_key.into());
        self
    }
}

/// Business features evaluated for a tenant.
///
/// `FeaturesResponse::default()` is the structurally-empty response handed
/// out when the remote cannot be consulted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesResponse {
    #[serde(default)]
    pub features: Option<FlagMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<Value>,
}

impl FeaturesResponse {
    pub fn new(features: FlagMap) -> Self {
        Self {
            features: Some(features),
            license: None,
        }
    }

    /// True when the response carries neither features nor license data.
    pub fn is_empty(&self) -> bool {
        self.features.as_ref().is_none_or(|f| f.is_empty()) && self.license.is_none()
    }
}

//! Identity traits sent to the remote flag evaluator.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

/// The user a flag evaluation is performed for.
///
/// Resolving who the user is belongs to the caller; this is only what the
/// evaluator needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    /// Email address, in clear text.
    pub email: String,
    /// Tenant the user belongs to.
    pub tenant_id: Option<String>,
    /// Account creation time. Anonymous users have none.
    pub created_at: Option<DateTime<Utc>>,
}

impl UserContext {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            tenant_id: None,
            created_at: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Facts about the running deployment that go into every evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeploymentContext {
    /// Unique id of this installation.
    pub instance_id: String,
    /// Tenant flags are evaluated against.
    pub default_tenant_id: String,
    /// Running product version.
    pub product_version: String,
    /// Cloud-hosted deployments send emails in clear text.
    pub cloud_hosting: bool,
    pub telemetry_disabled: bool,
    /// Sent along with business-feature requests when present.
    pub license_key: Option<String>,
}

/// Request body of a flag evaluation.
///
/// The remote call is identity-batched: `subject_ids` may name several
/// identities and the response is keyed by each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityTraits {
    pub instance_id: String,
    pub tenant_id: String,
    pub subject_ids: BTreeSet<String>,
    pub default_traits: HashMap<String, Value>,
    pub product_version: String,
}

impl IdentityTraits {
    /// Builds the traits for a single subject.
    pub fn for_subject(
        subject_id: impl Into<String>,
        user: &UserContext,
        deployment: &DeploymentContext,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            instance_id: deployment.instance_id.clone(),
            tenant_id: deployment.default_tenant_id.clone(),
            subject_ids: BTreeSet::from([subject_id.into()]),
            default_traits: default_traits(user, deployment, now),
            product_version: deployment.product_version.clone(),
        }
    }
}

/// Default traits describing a user.
///
/// Emails and email domains are hashed unless the deployment is cloud-hosted.
pub fn default_traits(
    user: &UserContext,
    deployment: &DeploymentContext,
    now: DateTime<Utc>,
) -> HashMap<String, Value> {
    let domain = email_domain(&user.email);
    let (email, domain) = if deployment.cloud_hosting {
        (user.email.clone(), domain.map(str::to_string))
    } else {
        (hash_identifier(&user.email), domain.map(hash_identifier))
    };

    let mut traits = HashMap::new();
    traits.insert("email".to_string(), Value::from(email));
    traits.insert("emailDomain".to_string(), Value::from(domain));
    traits.insert(
        "instanceId".to_string(),
        Value::from(deployment.instance_id.clone()),
    );
    traits.insert("tenantId".to_string(), Value::from(user.tenant_id.clone()));
    traits.insert(
        "isTelemetryOn".to_string(),
        Value::from(!deployment.telemetry_disabled),
    );
    if let Some(created_at) = user.created_at {
        traits.insert("createdAt".to_string(), Value::from(created_at.timestamp()));
    }
    traits.insert(
        "defaultTraitsUpdatedAt".to_string(),
        Value::from(now.timestamp()),
    );
    traits.insert("type".to_string(), Value::from("user"));
    traits
}

/// Hex-encoded SHA-256 of an identifier.
pub fn hash_identifier(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Domain part of an email address, if it has one.
pub fn email_domain(email: &str) -> Option<&str> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}

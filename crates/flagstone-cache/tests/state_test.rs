mod helpers;

use std::time::Duration;

use chrono::Utc;
use flagstone_cache::{
    CacheConfig, DeploymentSettings, FlagstoneState, Settings, StalenessSettings,
};
use flagstone_core::{FlagError, UserContext, backdate_offset};
use flagstone_remote::{HmacSignatureVerifier, RemoteConfig};
use helpers::init_tracing;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "state-secret";
const HEADER: &str = "x-cs-signature";

fn settings_for(base_url: &str) -> Settings {
    Settings {
        remote: RemoteConfig::builder()
            .base_url(base_url)
            .signing_secret(SECRET)
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap(),
        deployment: DeploymentSettings {
            instance_id: "inst-42".to_string(),
            default_tenant_id: "tenant-default".to_string(),
            product_version: "v1.9.2".to_string(),
            ..Default::default()
        },
        cache: CacheConfig::default(),
        staleness: StalenessSettings::default(),
    }
}

fn signed(body: &str) -> ResponseTemplate {
    let signature = HmacSignatureVerifier::new(HEADER, SECRET)
        .unwrap()
        .sign(body.as_bytes());
    ResponseTemplate::new(200)
        .set_body_raw(body.to_string(), "application/json")
        .insert_header(HEADER, signature.as_str())
}

#[tokio::test]
async fn signed_flags_are_cached_end_to_end() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/feature-flags"))
        .and(body_partial_json(serde_json::json!({ "subjectIds": ["u1"] })))
        .respond_with(signed(r#"{"data":{"u1":{"darkMode":true}}}"#))
        .expect(1)
        .mount(&server)
        .await;

    let state = FlagstoneState::from_settings(&settings_for(&server.uri())).unwrap();
    let user = UserContext::new("jane@example.com");

    let first = state.flags().fetch_cached("u1", &user).await.unwrap();
    let second = state.flags().get_flags("u1", &user).await.unwrap();

    assert!(first.is_enabled("darkMode"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn tampered_flags_are_rejected_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/feature-flags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"data":{"u1":{"darkMode":true}}}"#, "application/json")
                .insert_header(HEADER, "00ff"),
        )
        .mount(&server)
        .await;

    let state = FlagstoneState::from_settings(&settings_for(&server.uri())).unwrap();
    let user = UserContext::new("jane@example.com");

    let err = state.flags().fetch_cached("u1", &user).await.unwrap_err();

    assert!(matches!(err, FlagError::InvalidSignature { .. }));
    assert!(state.flags().store().get("u1").await.is_none());
}

#[tokio::test]
async fn empty_tenant_features_are_backdated_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/business-features"))
        .and(body_partial_json(serde_json::json!({ "tenantId": "t1" })))
        .respond_with(signed(r#"{"data":{"features":{}}}"#))
        .mount(&server)
        .await;

    let state = FlagstoneState::from_settings(&settings_for(&server.uri())).unwrap();

    let record = state.features().fetch_cached("t1").await.unwrap();

    assert!(record.features().is_empty());
    assert!(Utc::now() - record.refreshed_at() >= backdate_offset());
}

#[tokio::test]
async fn server_errors_degrade_to_empty_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let state = FlagstoneState::from_settings(&settings_for(&server.uri())).unwrap();
    let user = UserContext::new("jane@example.com");

    let record = state.flags().fetch_cached("u1", &user).await.unwrap();

    assert!(record.flags().is_empty());
}

#[test]
fn invalid_settings_are_rejected() {
    let mut settings = settings_for("http://localhost:1");
    settings.deployment.instance_id.clear();

    let result = FlagstoneState::from_settings(&settings);

    assert!(matches!(result, Err(FlagError::Configuration { .. })));
}

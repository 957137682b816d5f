//! # Flagstone Remote
//!
//! Clients for the remote flag/feature evaluator.
//!
//! This crate defines the collaborator traits the cache services depend on
//! and ships an HTTP implementation that verifies every response signature
//! before trusting its body.
//!
//! ## Example
//!
//! ```ignore
//! use flagstone_remote::{CloudServicesClient, RemoteConfig, RemoteFlagClient};
//!
//! let config = RemoteConfig::builder()
//!     .base_url("https://cs.example.com")
//!     .signing_secret("s3cret")
//!     .build()?;
//!
//! let client = CloudServicesClient::new(config)?;
//! let flags = client.evaluate_flags(&traits).await?;
//! ```

pub mod client;
pub mod config;
pub mod signature;

// Re-exports
pub use client::{
    CloudServicesClient, RemoteFeatureClient, RemoteFlagClient, classify_transport_error,
};
pub use config::{RemoteConfig, RemoteConfigBuilder};
pub use signature::{HmacSignatureVerifier, SignatureVerifier};

// Re-export flagstone_core for consumers
pub use flagstone_core;

//! Remote evaluator clients.
//!
//! The traits are the seam the cache services depend on; `CloudServicesClient`
//! is the HTTP implementation of both.

mod classify;
mod cloud;
mod traits;

pub use classify::classify_transport_error;
pub use cloud::CloudServicesClient;
pub use traits::{RemoteFeatureClient, RemoteFlagClient};

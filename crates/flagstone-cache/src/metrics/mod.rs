//! Metrics module for Flagstone.

pub mod cache;
pub mod remote;

pub use cache::CacheMetrics;
pub use remote::{RefreshOutcome, record_refresh};

/// Registra las descripciones de todas las metricas.
/// Llamar una vez al inicio; sin recorder instalado es un no-op.
pub fn register_metrics() {
    cache::register_cache_metrics();
    remote::register_remote_metrics();
}

//! Store metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de los stores.
pub fn register_cache_metrics() {
    metrics::describe_counter!("flagstone_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!("flagstone_cache_misses_total", "Total number of cache misses");
    metrics::describe_counter!(
        "flagstone_cache_evictions_total",
        "Total number of cache evictions"
    );
    metrics::describe_gauge!("flagstone_cache_entries", "Current number of entries in cache");
    metrics::describe_histogram!(
        "flagstone_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de un store.
/// Usa atomic counters internos para leer hit rate sin exporter.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    cache: &'static str,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    entries: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new(cache: &'static str) -> Self {
        Self {
            cache,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            entries: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registra un cache hit
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("flagstone_cache_hits_total", "cache" => self.cache).increment(1);
    }

    /// Registra un cache miss
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("flagstone_cache_misses_total", "cache" => self.cache).increment(1);
    }

    /// Registra una eviction
    pub fn record_eviction(&self, reason: &'static str) {
        counter!(
            "flagstone_cache_evictions_total",
            "cache" => self.cache,
            "reason" => reason
        )
        .increment(1);
    }

    /// Actualiza el gauge de entries
    pub fn update_entry_count(&self, count: u64) {
        self.entries.store(count, Ordering::Relaxed);
        gauge!("flagstone_cache_entries", "cache" => self.cache).set(count as f64);
    }

    /// Registra la duracion de una operacion
    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!(
            "flagstone_cache_operation_seconds",
            "cache" => self.cache,
            "operation" => operation
        )
        .record(duration.as_secs_f64());
    }

    /// Calcula hit rate (para logging/debugging)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        let total = hits + misses;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    /// Retorna el numero de hits
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Ultimo valor publicado en el gauge de entries
    pub fn entries(&self) -> u64 {
        self.entries.load(Ordering::Relaxed)
    }

    /// Retorna el numero de misses
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

//! Record store using Moka.

use std::sync::Arc;
use std::time::Instant;

use flagstone_core::{CachedFeatureRecord, CachedFlagRecord, CachedRecord};
use moka::future::Cache;
use serde::Deserialize;

use crate::metrics::CacheMetrics;

/// Configuracion de un store.
///
/// No hay TTL: la frescura se decide al leer, a partir de `refreshed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Maximo numero de entries (default: 10000)
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

fn default_max_capacity() -> u64 {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

/// Store key→record, thread-safe y async-friendly.
///
/// Cada write reemplaza el record completo; un lector ve el record anterior o
/// el nuevo, nunca una mezcla. No deduplica refreshes concurrentes: eso lo
/// decide quien llama.
///
/// # Examples
///
/// ```no_run
/// use flagstone_cache::cache::{CacheConfig, FlagCacheStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = FlagCacheStore::new("user_flags", CacheConfig::default());
///
/// if let Some(record) = store.get("u1").await {
///     println!("Cache hit, refreshed at {}", record.refreshed_at());
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct RecordStore<R: CachedRecord> {
    name: &'static str,
    inner: Cache<String, Arc<R>>,
    metrics: CacheMetrics,
}

/// Store de flags por usuario.
pub type FlagCacheStore = RecordStore<CachedFlagRecord>;

/// Store de features por tenant.
pub type FeatureCacheStore = RecordStore<CachedFeatureRecord>;

impl<R: CachedRecord> RecordStore<R> {
    /// Crea un nuevo store con la configuracion dada.
    pub fn new(name: &'static str, config: CacheConfig) -> Self {
        let metrics = CacheMetrics::new(name);

        // Configurar listener para evictions
        let eviction_metrics = metrics.clone();
        let inner = Cache::builder()
            .max_capacity(config.max_capacity)
            .eviction_listener(move |_key, _value, cause| {
                let reason = match cause {
                    moka::notification::RemovalCause::Expired => "expired",
                    moka::notification::RemovalCause::Size => "capacity",
                    moka::notification::RemovalCause::Explicit => "manual",
                    moka::notification::RemovalCause::Replaced => "replaced",
                };
                eviction_metrics.record_eviction(reason);
            })
            .build();

        Self {
            name,
            inner,
            metrics,
        }
    }

    /// Nombre del store, usado como label de metricas.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Obtiene un record del store si existe.
    pub async fn get(&self, key: &str) -> Option<Arc<R>> {
        let start = Instant::now();
        let result = self.inner.get(key).await;

        if result.is_some() {
            self.metrics.record_hit();
        } else {
            self.metrics.record_miss();
        }

        self.metrics.record_operation_duration("get", start.elapsed());

        result
    }

    /// Inserta o reemplaza el record de `key` y retorna el valor almacenado.
    pub async fn put(&self, key: impl Into<String>, record: R) -> Arc<R> {
        let start = Instant::now();
        let record = Arc::new(record);
        self.inner.insert(key.into(), Arc::clone(&record)).await;

        self.metrics.record_operation_duration("put", start.elapsed());
        self.update_entry_gauge();

        record
    }

    /// Invalida una entrada especifica. No falla si la key no existe.
    pub async fn evict(&self, key: &str) {
        self.inner.invalidate(key).await;
        self.update_entry_gauge();
    }

    /// Invalida todas las entradas y actualiza el gauge de entries.
    pub async fn evict_all(&self) {
        self.inner.invalidate_all();
        self.sync().await;
    }

    /// Retorna el numero aproximado de entries en el store.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Itera sobre todas las entries del store.
    /// Nota: Esta es una snapshot, entries pueden cambiar durante iteracion.
    pub fn iter(&self) -> impl Iterator<Item = (Arc<String>, Arc<R>)> + '_ {
        self.inner.iter()
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Aplica las tareas pendientes de Moka (conteos, evictions).
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
        self.update_entry_gauge();
    }

    fn update_entry_gauge(&self) {
        self.metrics.update_entry_count(self.inner.entry_count());
    }
}

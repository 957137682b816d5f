//! Store invalidation with pattern matching support.

use flagstone_core::CachedRecord;
use glob::Pattern;
use tracing::{debug, info};

use crate::cache::RecordStore;

/// Resultado de una operación de invalidación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationResult {
    /// Número de entries invalidadas.
    pub count: usize,
    /// Patrón aplicado.
    pub pattern: String,
}

impl<R: CachedRecord> RecordStore<R> {
    /// Invalida las entradas cuya key coincida con un patrón glob.
    ///
    /// - `*`: coincide con cualquier secuencia de caracteres
    /// - `?`: coincide con un carácter
    ///
    /// Un patrón inválido no invalida nada.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use flagstone_cache::cache::{CacheConfig, FlagCacheStore};
    /// # #[tokio::main]
    /// # async fn main() {
    /// # let store = FlagCacheStore::new("user_flags", CacheConfig::default());
    /// // Invalida los flags de todos los usuarios de una instancia
    /// let result = store.evict_matching("inst-42:*").await;
    /// println!("Invalidated {} entries", result.count);
    /// # }
    /// ```
    pub async fn evict_matching(&self, pattern_str: &str) -> InvalidationResult {
        let pattern = match Pattern::new(pattern_str) {
            Ok(p) => p,
            Err(e) => {
                debug!(pattern = %pattern_str, error = %e, "Invalid glob pattern");
                return InvalidationResult {
                    count: 0,
                    pattern: pattern_str.to_string(),
                };
            },
        };

        // Recolectar primero: no invalidar mientras se itera
        let matching: Vec<String> = self
            .iter()
            .filter(|(key, _)| pattern.matches(key))
            .map(|(key, _)| (*key).clone())
            .collect();

        let count = matching.len();
        for key in matching {
            self.evict(&key).await;
        }

        info!(
            store = self.name(),
            pattern = %pattern_str,
            count = count,
            "Store entries invalidated by pattern"
        );

        InvalidationResult {
            count,
            pattern: pattern_str.to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::GeocodeResult;

/// In-memory cache of resolved addresses
///
/// Only successful lookups are stored; "not found" answers are always
/// re-queried so a corrected provider index is picked up.
#[derive(Clone)]
pub struct GeocodeCache {
    entries: moka::future::Cache<String, GeocodeResult>,
    ttl_secs: u64,
}

impl GeocodeCache {
    /// Create a new cache holding at most `capacity` addresses
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries, ttl_secs }
    }

    pub async fn get(&self, query: &str) -> Option<GeocodeResult> {
        let key = CacheKey::geocode(query);
        let hit = self.entries.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Geocode cache hit: {}", key);
        }
        hit
    }

    pub async fn insert(&self, query: &str, result: GeocodeResult) {
        let key = CacheKey::geocode(query);
        self.entries.insert(key.clone(), result).await;
        tracing::trace!("Geocode cache set: {}", key);
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.entry_count(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a geocode query; case and surrounding whitespace are ignored
    pub fn geocode(query: &str) -> String {
        format!("geocode:{}", query.trim().to_lowercase())
    }
}

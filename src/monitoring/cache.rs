//! Time-bounded cache of per-service health results
//!
//! Serves recent probe results from memory so overlapping health requests
//! do not hammer the external engines. Operates purely on local memory and
//! never fails from external-service errors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::probes::HealthCheckResult;

/// Cached result with its expiry instant. Never leaves this module.
#[derive(Debug)]
struct CacheEntry {
    result: HealthCheckResult,
    expires_at: Instant,
}

/// Hit/miss counters and current occupancy
#[derive(Debug, Clone, serde::Serialize)]
pub struct CacheStatistics {
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses), 0 before any lookup
    pub hit_ratio: f64,
    pub entry_count: usize,
}

/// In-memory health result cache
#[derive(Debug, Default)]
pub struct HealthCheckCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HealthCheckCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fresh result for a service. Expired entries are treated as
    /// absent and removed; the expiry check happens under the lock, so a
    /// stale result is never returned to a racing reader.
    pub fn get(&self, service_name: &str) -> Option<HealthCheckResult> {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(service_name) {
                Some(entry) if entry.expires_at > now => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.result.clone());
                }
                Some(_) => {} // expired, fall through to remove
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        let mut entries = self.entries.write();
        // Re-check under the write lock: a writer may have refreshed the
        // entry between the two lock acquisitions.
        if let Some(entry) = entries.get(service_name) {
            if entry.expires_at > Instant::now() {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.result.clone());
            }
            entries.remove(service_name);
            debug!("Evicted expired cache entry for {}", service_name);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a result, overwriting any prior entry. No TTL ceiling is
    /// enforced here; that is the caller's call.
    pub fn set(&self, service_name: &str, result: HealthCheckResult, ttl: Duration) {
        let entry = CacheEntry {
            result,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(service_name.to_string(), entry);
    }

    /// Remove a service's entry. No-op when unset.
    pub fn invalidate(&self, service_name: &str) {
        self.entries.write().remove(service_name);
    }

    /// Empty the cache
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Current hit/miss statistics
    pub fn statistics(&self) -> CacheStatistics {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_ratio = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        CacheStatistics {
            hits,
            misses,
            hit_ratio,
            entry_count: self.entries.read().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_for(service: &str) -> HealthCheckResult {
        HealthCheckResult::healthy(service, Duration::from_millis(10), HashMap::new())
    }

    #[test]
    fn test_round_trip() {
        let cache = HealthCheckCache::new();
        cache.set("qdrant", result_for("qdrant"), Duration::from_secs(30));

        let cached = cache.get("qdrant").unwrap();
        assert_eq!(cached.service_name, "qdrant");
        assert!(cached.healthy);
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let cache = HealthCheckCache::new();
        cache.set("qdrant", result_for("qdrant"), Duration::from_millis(10));

        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.get("qdrant").is_none());

        // The expired entry is also evicted
        assert_eq!(cache.statistics().entry_count, 0);
    }

    #[test]
    fn test_set_overwrites() {
        let cache = HealthCheckCache::new();
        cache.set("neo4j", result_for("neo4j"), Duration::from_secs(30));

        let newer =
            HealthCheckResult::unhealthy("neo4j", Duration::from_millis(5), "connection reset");
        cache.set("neo4j", newer, Duration::from_secs(30));

        let cached = cache.get("neo4j").unwrap();
        assert!(!cached.healthy);
    }

    #[test]
    fn test_invalidate_unset_is_noop() {
        let cache = HealthCheckCache::new();
        cache.invalidate("nothing-here");
        assert_eq!(cache.statistics().entry_count, 0);
    }

    #[test]
    fn test_invalidate_removes() {
        let cache = HealthCheckCache::new();
        cache.set("ollama", result_for("ollama"), Duration::from_secs(30));
        cache.invalidate("ollama");
        assert!(cache.get("ollama").is_none());
    }

    #[test]
    fn test_clear() {
        let cache = HealthCheckCache::new();
        cache.set("qdrant", result_for("qdrant"), Duration::from_secs(30));
        cache.set("neo4j", result_for("neo4j"), Duration::from_secs(30));

        cache.clear();
        assert_eq!(cache.statistics().entry_count, 0);
    }

    #[test]
    fn test_statistics_ratio() {
        let cache = HealthCheckCache::new();

        // Nothing looked up yet
        let stats = cache.statistics();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.hit_ratio, 0.0);

        cache.set("qdrant", result_for("qdrant"), Duration::from_secs(30));
        assert!(cache.get("qdrant").is_some()); // hit
        assert!(cache.get("missing").is_none()); // miss

        let stats = cache.statistics();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(stats.entry_count, 1);
    }

    #[test]
    fn test_concurrent_access() {
        use std::sync::Arc;

        let cache = Arc::new(HealthCheckCache::new());
        let mut handles = Vec::new();

        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                for _ in 0..200 {
                    if i % 2 == 0 {
                        cache.set("qdrant", result_for("qdrant"), Duration::from_millis(1));
                    } else if let Some(result) = cache.get("qdrant") {
                        // A returned result is never stale by more than the TTL
                        assert_eq!(result.service_name, "qdrant");
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}

//! Diagnostics aggregator
//!
//! Composes the cache, the scoring service and the dependency probes into
//! system-wide diagnostic views. Probes fan out concurrently; a failing or
//! slow probe becomes an unhealthy result, never an error that aborts the
//! others.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64};
use std::time::Instant;

use futures::future::join_all;
use tracing::debug;

use crate::config::{DependenciesConfig, MonitoringConfig};
use crate::probes::{DependencyProbe, HealthCheckResult};
use crate::utils::error::Result;

use super::cache::{CacheStatistics, HealthCheckCache};
use super::scoring::HealthScoring;
use super::system::{self, ResourceUsage};
use super::types::{HealthAlert, HealthTrendData, SystemHealthScore};

/// Combined outcome of probing all dependencies
#[derive(Debug, Clone, serde::Serialize)]
pub struct AggregateHealth {
    /// AND of all dependency health flags
    pub healthy: bool,
    /// Per-service probe results
    pub dependencies: HashMap<String, HealthCheckResult>,
}

/// Per-service connectivity summary
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceConnectivity {
    pub reachable: bool,
    pub response_time_ms: u64,
    pub details: HashMap<String, serde_json::Value>,
}

/// Connectivity across all dependencies
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConnectivitySummary {
    pub all_reachable: bool,
    pub services: HashMap<String, ServiceConnectivity>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Process-level stats plus the current system score
#[derive(Debug, Clone, serde::Serialize)]
pub struct SystemDiagnostics {
    pub uptime_seconds: u64,
    pub resources: ResourceUsage,
    pub score: SystemHealthScore,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// The single richest diagnostic payload
#[derive(Debug, Clone, serde::Serialize)]
pub struct ComprehensiveHealth {
    pub connectivity: ConnectivitySummary,
    pub score: SystemHealthScore,
    pub trends: HashMap<String, HealthTrendData>,
    pub alerts: Vec<HealthAlert>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Canned remediation derived from alerts and connectivity failures
#[derive(Debug, Clone, serde::Serialize)]
pub struct TroubleshootingRecommendation {
    pub service_name: String,
    pub issue: String,
    pub recommendation: String,
}

/// Downloadable report: comprehensive health plus a configuration snapshot
#[derive(Debug, Clone, serde::Serialize)]
pub struct DiagnosticReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub health: ComprehensiveHealth,
    pub configuration: ConfigSnapshot,
}

/// Redacted configuration snapshot embedded in reports
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConfigSnapshot {
    pub dependencies: DependenciesConfig,
    pub monitoring: MonitoringConfig,
}

/// Aggregates cache, scoring and probes into system-wide views
pub struct DiagnosticsAggregator {
    monitoring: MonitoringConfig,
    dependencies: DependenciesConfig,
    probes: Vec<Arc<dyn DependencyProbe>>,
    cache: Arc<HealthCheckCache>,
    scoring: Arc<HealthScoring>,
    start_time: Instant,
    /// Background monitor flag - lock-free access from the spawned loop
    pub(super) active: AtomicBool,
    /// Bumped on every monitor start; a loop whose epoch no longer matches
    /// has been superseded and must exit
    pub(super) generation: AtomicU64,
}

impl DiagnosticsAggregator {
    /// Create a new aggregator over the given probes
    pub fn new(
        monitoring: MonitoringConfig,
        dependencies: DependenciesConfig,
        probes: Vec<Arc<dyn DependencyProbe>>,
        cache: Arc<HealthCheckCache>,
        scoring: Arc<HealthScoring>,
    ) -> Self {
        Self {
            monitoring,
            dependencies,
            probes,
            cache,
            scoring,
            start_time: Instant::now(),
            active: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Seconds since the aggregator came up
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Cache statistics passthrough
    pub fn cache_statistics(&self) -> CacheStatistics {
        self.cache.statistics()
    }

    /// Probe one dependency through the cache: a fresh cached result is
    /// reused, a miss triggers a real probe whose result is cached and
    /// recorded for trend analysis.
    async fn probe_via_cache(&self, probe: &Arc<dyn DependencyProbe>) -> HealthCheckResult {
        if let Some(cached) = self.cache.get(probe.name()) {
            debug!("Cache hit for {}", probe.name());
            return cached;
        }
        self.probe_fresh(probe).await
    }

    /// Probe one dependency directly, bounded by its timeout. A timeout or
    /// failure yields an unhealthy result; it never propagates.
    async fn probe_fresh(&self, probe: &Arc<dyn DependencyProbe>) -> HealthCheckResult {
        let timeout = probe.timeout();
        let result = match tokio::time::timeout(timeout, probe.check()).await {
            Ok(result) => result,
            Err(_) => HealthCheckResult::timed_out(probe.name(), timeout),
        };

        self.cache
            .set(probe.name(), result.clone(), self.monitoring.cache.ttl());
        self.scoring.record(&result);
        result
    }

    /// Fan out to every dependency concurrently (through the cache) and
    /// join. Overall health is the AND of the per-service flags.
    pub async fn check_all(&self) -> Result<AggregateHealth> {
        let results = join_all(self.probes.iter().map(|probe| self.probe_via_cache(probe))).await;

        let healthy = results.iter().all(|result| result.healthy);
        let dependencies = results
            .into_iter()
            .map(|result| (result.service_name.clone(), result))
            .collect();

        Ok(AggregateHealth {
            healthy,
            dependencies,
        })
    }

    /// Fan out to every dependency, bypassing the cache. Used by the
    /// background monitor so samples accrue without request traffic.
    pub async fn refresh_all(&self) -> Result<AggregateHealth> {
        let results = join_all(self.probes.iter().map(|probe| self.probe_fresh(probe))).await;

        let healthy = results.iter().all(|result| result.healthy);
        let dependencies = results
            .into_iter()
            .map(|result| (result.service_name.clone(), result))
            .collect();

        Ok(AggregateHealth {
            healthy,
            dependencies,
        })
    }

    /// Process-level stats plus the current system score
    pub async fn system_diagnostics(&self) -> Result<SystemDiagnostics> {
        Ok(SystemDiagnostics {
            uptime_seconds: self.uptime_seconds(),
            resources: system::resource_usage(),
            score: self.scoring.system_score(),
            generated_at: chrono::Utc::now(),
        })
    }

    /// Per-service connectivity summary (through the cache)
    pub async fn connectivity(&self) -> Result<ConnectivitySummary> {
        let aggregate = self.check_all().await?;

        let services = aggregate
            .dependencies
            .into_iter()
            .map(|(name, result)| {
                (
                    name,
                    ServiceConnectivity {
                        reachable: result.healthy,
                        response_time_ms: result.response_time_ms,
                        details: result.details,
                    },
                )
            })
            .collect();

        Ok(ConnectivitySummary {
            all_reachable: aggregate.healthy,
            services,
            checked_at: chrono::Utc::now(),
        })
    }

    /// Connectivity + score + per-service trends + alerts
    pub async fn comprehensive(&self) -> Result<ComprehensiveHealth> {
        let connectivity = self.connectivity().await?;
        let retention = self.monitoring.scoring.retention();

        let trends = self
            .probes
            .iter()
            .map(|probe| {
                (
                    probe.name().to_string(),
                    self.scoring.trend(probe.name(), retention),
                )
            })
            .collect();

        Ok(ComprehensiveHealth {
            connectivity,
            score: self.scoring.system_score(),
            trends,
            alerts: self.scoring.alerts(),
            generated_at: chrono::Utc::now(),
        })
    }

    /// Map alerts and connectivity failures to canned remediation text.
    /// Pure derived data, no side effects beyond the underlying probing.
    pub async fn recommendations(&self) -> Result<Vec<TroubleshootingRecommendation>> {
        let connectivity = self.connectivity().await?;
        let mut recommendations = Vec::new();

        let mut names: Vec<&String> = connectivity.services.keys().collect();
        names.sort();

        for name in names {
            let service = &connectivity.services[name];
            if !service.reachable {
                recommendations.push(TroubleshootingRecommendation {
                    service_name: name.clone(),
                    issue: format!("{} is unreachable", name),
                    recommendation: unreachable_remedy(name),
                });
            }
        }

        for alert in self.scoring.alerts() {
            recommendations.push(TroubleshootingRecommendation {
                service_name: alert.service_name.clone(),
                issue: alert.message.clone(),
                recommendation: degraded_remedy(&alert.service_name),
            });
        }

        Ok(recommendations)
    }

    /// Serialize the comprehensive payload plus a redacted configuration
    /// snapshot into one downloadable artifact
    pub async fn report(&self) -> Result<DiagnosticReport> {
        let health = self.comprehensive().await?;

        Ok(DiagnosticReport {
            generated_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.uptime_seconds(),
            health,
            configuration: ConfigSnapshot {
                dependencies: self.dependencies.redacted(),
                monitoring: self.monitoring.clone(),
            },
        })
    }
}

fn unreachable_remedy(service: &str) -> String {
    match service {
        "qdrant" => {
            "Verify the Qdrant container is running and the configured URL is reachable \
             (default http://localhost:6333). Check `docker ps` and network connectivity."
                .to_string()
        }
        "neo4j" => {
            "Verify the Neo4j container is running, the HTTP connector is enabled and the \
             configured credentials are valid (default http://localhost:7474)."
                .to_string()
        }
        "ollama" => {
            "Verify the Ollama daemon is running and listening on the configured URL \
             (default http://localhost:11434). Run `ollama list` on the host to confirm."
                .to_string()
        }
        other => format!(
            "Verify the {} service is running and its endpoint is reachable from the gateway.",
            other
        ),
    }
}

fn degraded_remedy(service: &str) -> String {
    format!(
        "{} is responding slowly or unreliably. Inspect its logs and resource usage; \
         consider raising its probe timeout if the host is under sustained load.",
        service
    )
}

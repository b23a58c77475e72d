//! Shared test infrastructure
//!
//! Fake dependency probes and helpers that wire them into a full
//! application state, so endpoint tests run without any real backends.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use docgraph_gateway::config::Config;
use docgraph_gateway::monitoring::{DiagnosticsAggregator, HealthCheckCache, HealthScoring};
use docgraph_gateway::probes::{DependencyProbe, HealthCheckResult};
use docgraph_gateway::server::state::AppState;

/// Probe with a fixed verdict and latency
pub struct FakeProbe {
    name: String,
    healthy: bool,
    latency: Duration,
    /// When set the probe never resolves, forcing the per-probe timeout
    hang: bool,
}

impl FakeProbe {
    pub fn healthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            healthy: true,
            latency: Duration::from_millis(5),
            hang: false,
        }
    }

    pub fn unhealthy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            healthy: false,
            latency: Duration::from_millis(5),
            hang: false,
        }
    }

    pub fn hanging(name: &str) -> Self {
        Self {
            name: name.to_string(),
            healthy: true,
            latency: Duration::ZERO,
            hang: true,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl DependencyProbe for FakeProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(100)
    }

    async fn check(&self) -> HealthCheckResult {
        if self.hang {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.healthy {
            HealthCheckResult::healthy(&self.name, self.latency, HashMap::new())
        } else {
            HealthCheckResult::unhealthy(&self.name, self.latency, "connection refused")
        }
    }
}

/// Wire a full application state around the given probes
pub fn build_state(probes: Vec<Arc<dyn DependencyProbe>>) -> AppState {
    build_state_with(Config::default(), probes)
}

/// Wire a full application state around the given probes and config
pub fn build_state_with(config: Config, probes: Vec<Arc<dyn DependencyProbe>>) -> AppState {
    let known_services = probes.iter().map(|p| p.name().to_string()).collect();

    let cache = Arc::new(HealthCheckCache::new());
    let scoring = Arc::new(HealthScoring::new(
        config.monitoring().scoring.clone(),
        config.monitoring().alerts.clone(),
        known_services,
    ));
    let diagnostics = Arc::new(DiagnosticsAggregator::new(
        config.monitoring().clone(),
        config.dependencies().clone(),
        probes,
        Arc::clone(&cache),
        Arc::clone(&scoring),
    ));

    AppState::new(Arc::new(config), diagnostics, scoring, cache)
}

/// State where every dependency reports healthy
pub fn healthy_state() -> AppState {
    build_state(vec![
        Arc::new(FakeProbe::healthy("qdrant")),
        Arc::new(FakeProbe::healthy("neo4j")),
        Arc::new(FakeProbe::healthy("ollama")),
    ])
}

/// State where one dependency is down
pub fn degraded_state() -> AppState {
    build_state(vec![
        Arc::new(FakeProbe::healthy("qdrant")),
        Arc::new(FakeProbe::unhealthy("neo4j")),
        Arc::new(FakeProbe::healthy("ollama")),
    ])
}

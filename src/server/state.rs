//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::monitoring::{DiagnosticsAggregator, HealthCheckCache, HealthScoring};

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for sharing across worker threads.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Diagnostics aggregator over the dependency probes
    pub diagnostics: Arc<DiagnosticsAggregator>,
    /// Scoring service (trend and alert queries)
    pub scoring: Arc<HealthScoring>,
    /// Health result cache
    pub cache: Arc<HealthCheckCache>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Arc<Config>,
        diagnostics: Arc<DiagnosticsAggregator>,
        scoring: Arc<HealthScoring>,
        cache: Arc<HealthCheckCache>,
    ) -> Self {
        Self {
            config,
            diagnostics,
            scoring,
            cache,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

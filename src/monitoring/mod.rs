//! Health monitoring and diagnostics
//!
//! This module provides the health result cache, score/trend tracking and
//! the aggregator that composes them with the dependency probes into
//! system-wide diagnostic views.

pub mod cache;
pub mod diagnostics;
pub mod scoring;

mod system;
mod tasks;
mod types;


// Re-export public types
pub use cache::{CacheStatistics, HealthCheckCache};
pub use diagnostics::DiagnosticsAggregator;
pub use scoring::HealthScoring;
pub use types::{
    AlertSeverity, HealthAlert, HealthScoreSample, HealthTrendData, ServiceScore,
    SystemHealthScore, TrendDirection,
};

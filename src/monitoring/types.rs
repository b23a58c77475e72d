//! Type definitions for health scoring, trends and alerts

use std::collections::HashMap;

/// One scored observation kept for trend analysis
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthScoreSample {
    /// Service identifier
    pub service_name: String,
    /// Score in 0..=100
    pub score: u8,
    /// Capture time (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Directional change of a service's score over a time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Degrading,
    Stable,
}

/// Derived view over a service's sample sequence for a time range
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthTrendData {
    /// Service identifier
    pub service_name: String,
    /// Mean score over the in-range samples
    pub average_score: f64,
    /// Lowest in-range score
    pub min_score: u8,
    /// Highest in-range score
    pub max_score: u8,
    /// Trend direction
    pub direction: TrendDirection,
    /// Number of samples that fell in range
    pub sample_count: usize,
}

impl HealthTrendData {
    /// The documented fallback when no samples fall in range
    pub fn empty(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            average_score: 0.0,
            min_score: 0,
            max_score: 0,
            direction: TrendDirection::Stable,
            sample_count: 0,
        }
    }
}

/// Per-service entry in the system score breakdown
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceScore {
    /// Latest score, absent when no samples were ever recorded
    pub score: Option<u8>,
    /// "ok" or "unknown"
    pub status: String,
    /// Timestamp of the latest sample
    pub last_recorded: Option<chrono::DateTime<chrono::Utc>>,
}

/// Aggregate of the latest score for every known service
#[derive(Debug, Clone, serde::Serialize)]
pub struct SystemHealthScore {
    /// Equal-weight mean over services with at least one sample; absent
    /// when no service has recorded anything yet
    pub overall_score: Option<f64>,
    /// Per-service breakdown; services without samples appear as "unknown"
    pub services: HashMap<String, ServiceScore>,
    /// Computation time (UTC)
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

/// Alert severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertSeverity::Info => write!(f, "INFO"),
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Alert synthesized from score thresholds and trend direction
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthAlert {
    /// Alert ID
    pub id: String,
    /// Service the alert concerns
    pub service_name: String,
    /// Alert severity
    pub severity: AlertSeverity,
    /// Human-readable message
    pub message: String,
    /// Generation time (UTC)
    pub triggered_at: chrono::DateTime<chrono::Utc>,
}

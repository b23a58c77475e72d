//! Probe result types

use std::collections::HashMap;
use std::time::Duration;

/// Outcome of a single dependency probe
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthCheckResult {
    /// Service identifier
    pub service_name: String,
    /// Whether the dependency responded and reported healthy
    pub healthy: bool,
    /// Measured latency of the probe call
    pub response_time_ms: u64,
    /// Capture time (UTC)
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Free-form stats and failure detail
    pub details: HashMap<String, serde_json::Value>,
}

impl HealthCheckResult {
    /// A healthy result with supplementary stats
    pub fn healthy(
        service_name: impl Into<String>,
        elapsed: Duration,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            healthy: true,
            response_time_ms: elapsed.as_millis() as u64,
            timestamp: chrono::Utc::now(),
            details,
        }
    }

    /// An unhealthy result carrying the failure reason
    pub fn unhealthy(
        service_name: impl Into<String>,
        elapsed: Duration,
        reason: impl Into<String>,
    ) -> Self {
        let mut details = HashMap::new();
        details.insert(
            "error".to_string(),
            serde_json::Value::String(reason.into()),
        );
        Self {
            service_name: service_name.into(),
            healthy: false,
            response_time_ms: elapsed.as_millis() as u64,
            timestamp: chrono::Utc::now(),
            details,
        }
    }

    /// An unhealthy result for a probe cut short by its timeout
    pub fn timed_out(service_name: impl Into<String>, timeout: Duration) -> Self {
        let mut details = HashMap::new();
        details.insert("timeout".to_string(), serde_json::Value::Bool(true));
        details.insert(
            "timeout_secs".to_string(),
            serde_json::Value::Number(timeout.as_secs().into()),
        );
        Self {
            service_name: service_name.into(),
            healthy: false,
            response_time_ms: timeout.as_millis() as u64,
            timestamp: chrono::Utc::now(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unhealthy_carries_reason() {
        let result =
            HealthCheckResult::unhealthy("qdrant", Duration::from_millis(12), "connection refused");

        assert!(!result.healthy);
        assert_eq!(result.service_name, "qdrant");
        assert_eq!(result.response_time_ms, 12);
        assert_eq!(
            result.details.get("error"),
            Some(&serde_json::Value::String("connection refused".to_string()))
        );
    }

    #[test]
    fn test_timed_out_marks_timeout_detail() {
        let result = HealthCheckResult::timed_out("ollama", Duration::from_secs(5));

        assert!(!result.healthy);
        assert_eq!(result.response_time_ms, 5000);
        assert_eq!(
            result.details.get("timeout"),
            Some(&serde_json::Value::Bool(true))
        );
    }
}

//! Monitoring configuration
//!
//! Tunables for the health cache, score decay curve, trend analysis and
//! alert thresholds. The decay thresholds are deliberately configuration
//! rather than constants.

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitoringConfig {
    /// Health result cache configuration
    #[serde(default)]
    pub cache: HealthCacheConfig,
    /// Scoring and trend configuration
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Alert thresholds
    #[serde(default)]
    pub alerts: AlertThresholds,
    /// Background monitor configuration
    #[serde(default)]
    pub background: BackgroundConfig,
}

impl MonitoringConfig {
    /// Merge monitoring configurations
    pub fn merge(mut self, other: Self) -> Self {
        self.cache = self.cache.merge(other.cache);
        self.scoring = self.scoring.merge(other.scoring);
        self.alerts = self.alerts.merge(other.alerts);
        self.background = self.background.merge(other.background);
        self
    }

    /// Validate monitoring configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.scoring.fast_threshold_ms >= self.scoring.slow_threshold_ms {
            return Err(format!(
                "fast_threshold_ms ({}) must be below slow_threshold_ms ({})",
                self.scoring.fast_threshold_ms, self.scoring.slow_threshold_ms
            ));
        }
        if self.scoring.healthy_floor > 100 {
            return Err("healthy_floor cannot exceed 100".to_string());
        }
        if self.scoring.retention_hours <= 0 {
            return Err("retention_hours must be positive".to_string());
        }
        if self.alerts.critical_threshold >= self.alerts.warning_threshold {
            return Err(format!(
                "critical_threshold ({}) must be below warning_threshold ({})",
                self.alerts.critical_threshold, self.alerts.warning_threshold
            ));
        }
        if self.background.enabled && self.background.interval_secs == 0 {
            return Err("background interval cannot be 0".to_string());
        }
        Ok(())
    }
}

/// Health result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCacheConfig {
    /// How long a probe result stays fresh, in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

impl Default for HealthCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl HealthCacheConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.ttl_secs != default_cache_ttl() {
            self.ttl_secs = other.ttl_secs;
        }
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Score decay and trend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Latency at or below which a healthy result scores 100 (ms)
    #[serde(default = "default_fast_threshold_ms")]
    pub fast_threshold_ms: u64,
    /// Latency at or above which a healthy result scores the floor (ms)
    #[serde(default = "default_slow_threshold_ms")]
    pub slow_threshold_ms: u64,
    /// Minimum score for a healthy result, however slow
    #[serde(default = "default_healthy_floor")]
    pub healthy_floor: u8,
    /// Sample retention window, in hours
    #[serde(default = "default_retention_hours")]
    pub retention_hours: i64,
    /// Half-mean difference below which a trend counts as stable
    #[serde(default = "default_trend_tolerance")]
    pub trend_tolerance: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fast_threshold_ms: default_fast_threshold_ms(),
            slow_threshold_ms: default_slow_threshold_ms(),
            healthy_floor: default_healthy_floor(),
            retention_hours: default_retention_hours(),
            trend_tolerance: default_trend_tolerance(),
        }
    }
}

impl ScoringConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if other.fast_threshold_ms != default_fast_threshold_ms() {
            self.fast_threshold_ms = other.fast_threshold_ms;
        }
        if other.slow_threshold_ms != default_slow_threshold_ms() {
            self.slow_threshold_ms = other.slow_threshold_ms;
        }
        if other.healthy_floor != default_healthy_floor() {
            self.healthy_floor = other.healthy_floor;
        }
        if other.retention_hours != default_retention_hours() {
            self.retention_hours = other.retention_hours;
        }
        if (other.trend_tolerance - default_trend_tolerance()).abs() > f64::EPSILON {
            self.trend_tolerance = other.trend_tolerance;
        }
        self
    }

    /// Retention window as a chrono duration
    pub fn retention(&self) -> chrono::Duration {
        chrono::Duration::hours(self.retention_hours)
    }
}

/// Alert thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Latest score below this emits a critical alert
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: u8,
    /// Latest score below this, with a degrading trend, emits a warning
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: u8,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            critical_threshold: default_critical_threshold(),
            warning_threshold: default_warning_threshold(),
        }
    }
}

impl AlertThresholds {
    pub fn merge(mut self, other: Self) -> Self {
        if other.critical_threshold != default_critical_threshold() {
            self.critical_threshold = other.critical_threshold;
        }
        if other.warning_threshold != default_warning_threshold() {
            self.warning_threshold = other.warning_threshold;
        }
        self
    }
}

/// Background monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Enable the periodic background probe loop
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Probe interval in seconds
    #[serde(default = "default_monitor_interval")]
    pub interval_secs: u64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_monitor_interval(),
        }
    }
}

impl BackgroundConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.interval_secs != default_monitor_interval() {
            self.interval_secs = other.interval_secs;
        }
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

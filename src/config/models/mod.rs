//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod dependencies;
pub mod gateway;
pub mod monitoring;
pub mod server;

// Re-export all configuration types
pub use dependencies::*;
pub use gateway::*;
pub use monitoring::*;
pub use server::*;

/// Default server host
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default probe timeout in seconds
pub fn default_probe_timeout() -> u64 {
    5
}

/// Default health cache TTL in seconds
pub fn default_cache_ttl() -> u64 {
    30
}

/// Default latency below which a healthy result scores full marks (ms)
pub fn default_fast_threshold_ms() -> u64 {
    100
}

/// Default latency at which a healthy result bottoms out at the floor (ms)
pub fn default_slow_threshold_ms() -> u64 {
    2000
}

/// Default score floor for a healthy result
pub fn default_healthy_floor() -> u8 {
    20
}

/// Default sample retention window in hours
pub fn default_retention_hours() -> i64 {
    24
}

/// Default tolerance (score points) below which a trend counts as stable
pub fn default_trend_tolerance() -> f64 {
    2.0
}

/// Default score threshold for critical alerts
pub fn default_critical_threshold() -> u8 {
    40
}

/// Default score threshold for warning alerts
pub fn default_warning_threshold() -> u8 {
    70
}

/// Default background probe interval in seconds
pub fn default_monitor_interval() -> u64 {
    30
}

pub fn default_true() -> bool {
    true
}

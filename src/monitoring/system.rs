//! Process/system resource metrics via the sysinfo crate
//!
//! Real values when the `metrics` feature is enabled, zeroed stubs otherwise.

#[cfg(feature = "metrics")]
use once_cell::sync::Lazy;
#[cfg(feature = "metrics")]
use sysinfo::System;

#[cfg(feature = "metrics")]
static SYSTEM: Lazy<parking_lot::Mutex<System>> =
    Lazy::new(|| parking_lot::Mutex::new(System::new_all()));

/// Process-level resource usage snapshot
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResourceUsage {
    /// Global CPU usage percentage
    pub cpu_usage_percent: f64,
    /// Used physical memory in bytes
    pub memory_used_bytes: u64,
    /// Total physical memory in bytes
    pub memory_total_bytes: u64,
}

#[cfg(feature = "metrics")]
pub(super) fn resource_usage() -> ResourceUsage {
    let mut sys = SYSTEM.lock();
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    ResourceUsage {
        cpu_usage_percent: sys.global_cpu_usage() as f64,
        memory_used_bytes: sys.used_memory(),
        memory_total_bytes: sys.total_memory(),
    }
}

#[cfg(not(feature = "metrics"))]
pub(super) fn resource_usage() -> ResourceUsage {
    ResourceUsage {
        cpu_usage_percent: 0.0,
        memory_used_bytes: 0,
        memory_total_bytes: 0,
    }
}

//! Health scoring and trend tracking
//!
//! Translates raw probe results into comparable 0-100 scores and keeps a
//! rolling per-service history for trend analysis. The history is the only
//! mutable state here and lives behind a single lock; callers never touch
//! the sample sequences directly.

use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;
use tracing::debug;

use crate::config::{AlertThresholds, ScoringConfig};
use crate::probes::HealthCheckResult;

use super::types::{
    AlertSeverity, HealthAlert, HealthScoreSample, HealthTrendData, ServiceScore,
    SystemHealthScore, TrendDirection,
};

/// Hard cap on retained samples per service, on top of the time window
const MAX_HISTORY_SAMPLES: usize = 10_000;

/// Consolidated sample storage - single lock for all histories
#[derive(Debug, Default)]
struct ScoreStorage {
    histories: HashMap<String, VecDeque<HealthScoreSample>>,
}

/// Scoring service with per-service rolling histories
#[derive(Debug)]
pub struct HealthScoring {
    scoring: ScoringConfig,
    thresholds: AlertThresholds,
    known_services: Vec<String>,
    storage: RwLock<ScoreStorage>,
}

impl HealthScoring {
    /// Create a scoring service. `known_services` seeds the system-score
    /// breakdown so services that never recorded a sample still show up as
    /// "unknown".
    pub fn new(
        scoring: ScoringConfig,
        thresholds: AlertThresholds,
        known_services: Vec<String>,
    ) -> Self {
        Self {
            scoring,
            thresholds,
            known_services,
            storage: RwLock::new(ScoreStorage::default()),
        }
    }

    /// Deterministic score for one probe result.
    ///
    /// Unhealthy results score 0 regardless of latency. Healthy results
    /// score 100 up to the fast threshold, then decay linearly to the
    /// configured floor at the slow threshold.
    pub fn calculate_score(&self, result: &HealthCheckResult) -> u8 {
        if !result.healthy {
            return 0;
        }

        let fast = self.scoring.fast_threshold_ms;
        let slow = self.scoring.slow_threshold_ms;
        let floor = self.scoring.healthy_floor;
        let latency = result.response_time_ms;

        if latency <= fast {
            return 100;
        }
        if latency >= slow {
            return floor;
        }

        let span = (slow - fast) as f64;
        let excess = (latency - fast) as f64;
        let decayed = 100.0 - excess / span * (100.0 - f64::from(floor));
        decayed.round() as u8
    }

    /// Score a result and append it to the service's history, trimming
    /// samples that fell out of the retention window.
    pub fn record(&self, result: &HealthCheckResult) -> u8 {
        let score = self.calculate_score(result);
        let sample = HealthScoreSample {
            service_name: result.service_name.clone(),
            score,
            timestamp: result.timestamp,
        };

        let cutoff = chrono::Utc::now() - self.scoring.retention();
        let mut storage = self.storage.write();
        let history = storage
            .histories
            .entry(result.service_name.clone())
            .or_default();

        history.push_back(sample);
        while history
            .front()
            .is_some_and(|oldest| oldest.timestamp < cutoff)
        {
            history.pop_front();
        }
        while history.len() > MAX_HISTORY_SAMPLES {
            history.pop_front();
        }

        debug!(
            "Recorded score {} for {} ({} samples retained)",
            score,
            result.service_name,
            history.len()
        );
        score
    }

    /// Trend over the samples that fall inside the trailing `window`.
    /// Zero in-range samples yield `sample_count = 0` and a stable
    /// direction rather than an error.
    pub fn trend(&self, service_name: &str, window: chrono::Duration) -> HealthTrendData {
        let cutoff = chrono::Utc::now() - window;
        let storage = self.storage.read();

        let scores: Vec<u8> = storage
            .histories
            .get(service_name)
            .map(|history| {
                history
                    .iter()
                    .filter(|sample| sample.timestamp >= cutoff)
                    .map(|sample| sample.score)
                    .collect()
            })
            .unwrap_or_default();

        if scores.is_empty() {
            return HealthTrendData::empty(service_name);
        }

        let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
        let average_score = sum as f64 / scores.len() as f64;
        let min_score = *scores.iter().min().unwrap_or(&0);
        let max_score = *scores.iter().max().unwrap_or(&0);

        HealthTrendData {
            service_name: service_name.to_string(),
            average_score,
            min_score,
            max_score,
            direction: Self::direction(&scores, self.scoring.trend_tolerance),
            sample_count: scores.len(),
        }
    }

    /// First-half mean vs second-half mean, within a tolerance band
    fn direction(scores: &[u8], tolerance: f64) -> TrendDirection {
        let mid = scores.len() / 2;
        if mid == 0 {
            return TrendDirection::Stable;
        }

        let mean = |slice: &[u8]| {
            slice.iter().map(|&s| f64::from(s)).sum::<f64>() / slice.len() as f64
        };
        let delta = mean(&scores[mid..]) - mean(&scores[..mid]);

        if delta > tolerance {
            TrendDirection::Improving
        } else if delta < -tolerance {
            TrendDirection::Degrading
        } else {
            TrendDirection::Stable
        }
    }

    /// Latest score per known service, averaged with equal weight.
    /// Services with no samples are excluded from the mean but flagged
    /// "unknown" in the breakdown.
    pub fn system_score(&self) -> SystemHealthScore {
        let storage = self.storage.read();

        let mut services = HashMap::new();
        let mut latest_scores = Vec::new();

        let mut names: Vec<&String> = self.known_services.iter().collect();
        for name in storage.histories.keys() {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        for name in names {
            match storage.histories.get(name).and_then(|h| h.back()) {
                Some(sample) => {
                    latest_scores.push(u64::from(sample.score));
                    services.insert(
                        name.clone(),
                        ServiceScore {
                            score: Some(sample.score),
                            status: "ok".to_string(),
                            last_recorded: Some(sample.timestamp),
                        },
                    );
                }
                None => {
                    services.insert(
                        name.clone(),
                        ServiceScore {
                            score: None,
                            status: "unknown".to_string(),
                            last_recorded: None,
                        },
                    );
                }
            }
        }

        let overall_score = if latest_scores.is_empty() {
            None
        } else {
            Some(latest_scores.iter().sum::<u64>() as f64 / latest_scores.len() as f64)
        };

        SystemHealthScore {
            overall_score,
            services,
            computed_at: chrono::Utc::now(),
        }
    }

    /// Fresh alert computation: latest score under the critical threshold
    /// emits critical; a degrading trend under the warning threshold emits
    /// warning. Absent new samples, repeated calls return identical alerts:
    /// ids derive from service and severity, triggered_at from the sample
    /// that tripped the threshold.
    pub fn alerts(&self) -> Vec<HealthAlert> {
        let latest: Vec<(String, u8, chrono::DateTime<chrono::Utc>)> = {
            let storage = self.storage.read();
            storage
                .histories
                .iter()
                .filter_map(|(name, history)| {
                    history.back().map(|s| (name.clone(), s.score, s.timestamp))
                })
                .collect()
        };

        let mut alerts = Vec::new();
        for (service_name, score, recorded_at) in latest {
            if score < self.thresholds.critical_threshold {
                alerts.push(HealthAlert {
                    id: alert_id(&service_name, AlertSeverity::Critical),
                    service_name: service_name.clone(),
                    severity: AlertSeverity::Critical,
                    message: format!(
                        "{} health score {} is below the critical threshold {}",
                        service_name, score, self.thresholds.critical_threshold
                    ),
                    triggered_at: recorded_at,
                });
                continue;
            }

            if score < self.thresholds.warning_threshold {
                let trend = self.trend(&service_name, self.scoring.retention());
                if trend.direction == TrendDirection::Degrading {
                    alerts.push(HealthAlert {
                        id: alert_id(&service_name, AlertSeverity::Warning),
                        service_name: service_name.clone(),
                        severity: AlertSeverity::Warning,
                        message: format!(
                            "{} is degrading: health score {} is below the warning threshold {}",
                            service_name, score, self.thresholds.warning_threshold
                        ),
                        triggered_at: recorded_at,
                    });
                }
            }
        }

        alerts.sort_by(|a, b| a.service_name.cmp(&b.service_name));
        alerts
    }

    /// Services the scoring component was seeded with
    pub fn known_services(&self) -> &[String] {
        &self.known_services
    }
}

/// Name-based uuid so the same condition always carries the same id
fn alert_id(service_name: &str, severity: AlertSeverity) -> String {
    uuid::Uuid::new_v5(
        &uuid::Uuid::NAMESPACE_OID,
        format!("{}:{}", service_name, severity).as_bytes(),
    )
    .to_string()
}

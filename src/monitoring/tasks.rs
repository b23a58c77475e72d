//! Background monitor task
//!
//! Periodically re-probes every dependency (bypassing the cache) so score
//! histories and trends accrue even without request traffic.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tracing::{debug, error};

use super::diagnostics::DiagnosticsAggregator;

impl DiagnosticsAggregator {
    /// Start the periodic probe loop. Idempotent: a second call while the
    /// loop runs is a no-op.
    pub fn start_background_monitor(self: &Arc<Self>, interval: Duration) {
        if self.active.swap(true, Ordering::AcqRel) {
            return;
        }
        // A loop stopped mid-tick may observe active flip back to true on a
        // quick restart; the epoch check makes it exit anyway.
        let epoch = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let aggregator = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately, priming caches and scores
            loop {
                ticker.tick().await;

                if !aggregator.is_monitoring()
                    || aggregator.generation.load(Ordering::Acquire) != epoch
                {
                    debug!("Background monitor stopped");
                    break;
                }

                if let Err(e) = aggregator.refresh_all().await {
                    error!("Background health refresh failed: {}", e);
                }
            }
        });
    }

    /// Stop the probe loop at its next tick
    pub fn stop_background_monitor(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Whether the probe loop is running
    #[inline]
    pub fn is_monitoring(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

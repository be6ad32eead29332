//! Monitor loop: drives checks, aggregation and reporting.

use crate::checker::EndpointChecker;
use crate::tracker::AvailabilityTracker;
use crate::types::EndpointSpec;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::{debug, info};

/// Fixed delay between monitoring cycles.
pub const CYCLE_INTERVAL: Duration = Duration::from_secs(15);

/// Width of the separator line printed after each report.
const SEPARATOR_WIDTH: usize = 50;

/// Handle for stopping a running [`MonitorLoop`].
///
/// A stop request is honored between cycles: checks already in flight
/// run to completion (or time out) and the final report is still
/// printed.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    stop_signal: Arc<Notify>,
}

impl ShutdownHandle {
    /// Request the loop to stop before its next cycle.
    pub fn stop(&self) {
        self.stop_signal.notify_one();
    }
}

/// Repeatedly probes the configured endpoints, feeds verdicts to the
/// tracker, and prints one availability report per cycle.
///
/// Checks run sequentially in list order, so a full pass is bounded by
/// `endpoints.len()` times the request timeout in the worst case.
pub struct MonitorLoop {
    endpoints: Vec<EndpointSpec>,
    checker: Arc<dyn EndpointChecker>,
    tracker: AvailabilityTracker,
    interval: Duration,
    stop_signal: Arc<Notify>,
}

impl MonitorLoop {
    /// Create a monitor loop over `endpoints` with the fixed cycle
    /// interval.
    pub fn new(endpoints: Vec<EndpointSpec>, checker: Arc<dyn EndpointChecker>) -> Self {
        Self::with_interval(endpoints, checker, CYCLE_INTERVAL)
    }

    /// Create a monitor loop with a custom cycle interval.
    pub fn with_interval(
        endpoints: Vec<EndpointSpec>,
        checker: Arc<dyn EndpointChecker>,
        interval: Duration,
    ) -> Self {
        Self {
            endpoints,
            checker,
            tracker: AvailabilityTracker::new(),
            interval,
            stop_signal: Arc::new(Notify::new()),
        }
    }

    /// Handle for stopping the loop from another task.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            stop_signal: self.stop_signal.clone(),
        }
    }

    /// The accumulated per-domain statistics.
    pub fn tracker(&self) -> &AvailabilityTracker {
        &self.tracker
    }

    /// Run one full pass: probe every endpoint in list order, record
    /// each verdict, then print the report and the separator.
    pub async fn run_cycle(&mut self) {
        for endpoint in &self.endpoints {
            let result = self.checker.check(endpoint).await;
            debug!(
                url = %endpoint.url,
                up = result.is_up(),
                latency_ms = result.latency().as_millis(),
                "Endpoint checked"
            );
            self.tracker.update(&endpoint.url, result.is_up());
        }

        self.tracker.report();
        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }

    /// Run cycles until a stop is requested. The delay between cycles
    /// is interruptible; a stop request during the sleep ends the loop
    /// immediately.
    pub async fn run(&mut self) {
        info!(endpoints = self.endpoints.len(), "Monitor loop starting");

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = self.stop_signal.notified() => {
                    info!("Monitor loop stopping");
                    break;
                }
            }
        }
    }
}

//! HTTP endpoint availability probing for Upmon.
//!
//! This crate is the check-and-aggregate engine: it probes configured
//! HTTP endpoints, classifies each probe as UP or DOWN, and accumulates
//! per-domain availability percentages.
//!
//! - A probe is UP iff the response status is 2xx and the measured
//!   latency is below 500 ms; every transport failure is DOWN.
//! - Verdicts are aggregated per domain (`host[:port]` of the URL) for
//!   the lifetime of the process.
//! - The monitor loop probes all endpoints, reports, then sleeps for a
//!   fixed 15 second interval, until asked to stop.
//!
//! # Example
//!
//! ```no_run
//! use probe::{EndpointSpec, HttpChecker, MonitorLoop};
//! use std::sync::Arc;
//!
//! # async fn example() -> common::Result<()> {
//! let endpoints = vec![
//!     EndpointSpec::get("https://example.com/"),
//!     EndpointSpec::get("https://example.com/careers"),
//! ];
//!
//! let checker = Arc::new(HttpChecker::new()?);
//! let mut monitor = MonitorLoop::new(endpoints, checker);
//!
//! let shutdown = monitor.shutdown_handle();
//! tokio::spawn(async move {
//!     tokio::signal::ctrl_c().await.ok();
//!     shutdown.stop();
//! });
//!
//! monitor.run().await;
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod monitor;
pub mod tracker;
pub mod types;

pub use checker::{EndpointChecker, HttpChecker};
pub use monitor::{MonitorLoop, ShutdownHandle, CYCLE_INTERVAL};
pub use tracker::{domain_of, AvailabilityMap, AvailabilityTracker};
pub use types::{DomainStats, EndpointSpec, ProbeFailure, ProbeResult};

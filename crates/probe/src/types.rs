//! Probe types and structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Fixed per-request timeout for a single probe.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Latency threshold for a probe to count as UP. A response at or above
/// this bound is DOWN regardless of its status code.
pub const LATENCY_LIMIT: Duration = Duration::from_millis(500);

/// A single HTTP endpoint to probe.
///
/// Immutable once loaded from configuration; owned by the monitor loop
/// for the duration of one process run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Display name (unused by the probe logic itself)
    #[serde(default)]
    pub name: Option<String>,

    /// Absolute HTTP/HTTPS URL
    pub url: String,

    /// HTTP method, defaults to GET
    #[serde(default = "default_method")]
    pub method: String,

    /// Request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Optional structured request payload, sent as JSON when present
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl EndpointSpec {
    /// Create a spec for a plain GET probe of `url`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            name: None,
            url: url.into(),
            method: default_method(),
            headers: BTreeMap::new(),
            body: None,
        }
    }
}

/// Why a probe produced no usable response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Transport(String),
}

/// Result of one probe of one endpoint.
///
/// Every transport-layer failure is captured as [`ProbeResult::Failed`];
/// the checker never returns an error. The UP/DOWN verdict is derived
/// deterministically by [`ProbeResult::is_up`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeResult {
    /// A response was received.
    Response {
        /// HTTP status code
        status: u16,
        /// Wall-clock time from dispatch to response
        latency: Duration,
    },

    /// No response: timeout, connection, DNS or TLS failure.
    Failed {
        /// Wall-clock time from dispatch to the failure
        latency: Duration,
        /// Failure classification
        reason: ProbeFailure,
    },
}

impl ProbeResult {
    /// Create a result for a received response.
    pub fn response(status: u16, latency: Duration) -> Self {
        Self::Response { status, latency }
    }

    /// Create a result for a timed-out probe.
    pub fn timeout(latency: Duration) -> Self {
        Self::Failed {
            latency,
            reason: ProbeFailure::Timeout,
        }
    }

    /// Create a result for a transport failure.
    pub fn transport_error(latency: Duration, message: impl Into<String>) -> Self {
        Self::Failed {
            latency,
            reason: ProbeFailure::Transport(message.into()),
        }
    }

    /// The UP/DOWN verdict: UP iff a response was received with a 2xx
    /// status code and latency strictly below [`LATENCY_LIMIT`].
    pub fn is_up(&self) -> bool {
        match self {
            Self::Response { status, latency } => {
                (200..300).contains(status) && *latency < LATENCY_LIMIT
            }
            Self::Failed { .. } => false,
        }
    }

    /// Measured wall-clock latency of the probe, whether or not it
    /// produced a response.
    pub fn latency(&self) -> Duration {
        match self {
            Self::Response { latency, .. } | Self::Failed { latency, .. } => *latency,
        }
    }
}

/// Per-domain availability counters.
///
/// Counts are monotonic: they only ever increase, and `total >= up`
/// holds because `up` is only incremented alongside `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStats {
    /// Probes that yielded an UP verdict
    pub up: u64,

    /// All probes recorded for the domain
    pub total: u64,
}

impl DomainStats {
    /// Record one verdict.
    pub fn record(&mut self, is_up: bool) {
        self.total += 1;
        if is_up {
            self.up += 1;
        }
    }
}

//! Domain-level availability accounting.

use crate::types::DomainStats;
use std::collections::BTreeMap;
use tracing::debug;

/// Mapping from domain to its availability counters.
pub type AvailabilityMap = BTreeMap<String, DomainStats>;

/// Extract the aggregation key from a URL: the substring after the first
/// `//`, cut at the first subsequent `/`. Yields `host[:port]` without
/// scheme or path. Case is preserved and default ports are not stripped.
pub fn domain_of(url: &str) -> &str {
    let rest = match url.split_once("//") {
        Some((_, rest)) => rest,
        None => url,
    };
    match rest.split_once('/') {
        Some((domain, _)) => domain,
        None => rest,
    }
}

/// Tracks UP/DOWN verdicts per domain and reports availability
/// percentages.
///
/// Not synchronized; intended for a single owner. A parallel monitor
/// would need to serialize `update` calls through one owning task.
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    availability: AvailabilityMap,
}

impl AvailabilityTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one verdict for the domain of `url`. The domain's entry is
    /// created on first observation.
    pub fn update(&mut self, url: &str, is_up: bool) {
        let domain = domain_of(url);
        let stats = self.availability.entry(domain.to_string()).or_default();
        stats.record(is_up);
        debug!(domain, up = stats.up, total = stats.total, "Recorded verdict");
    }

    /// Current per-domain counters, ordered by domain.
    pub fn snapshot(&self) -> &AvailabilityMap {
        &self.availability
    }

    /// Availability percentage for one entry, rounded half away from
    /// zero (`f64::round`). Entries always have `total >= 1`, so the
    /// division is well defined.
    pub fn percentage(stats: &DomainStats) -> u8 {
        ((stats.up as f64 / stats.total as f64) * 100.0).round() as u8
    }

    /// One report line per domain.
    pub fn report_lines(&self) -> Vec<String> {
        self.availability
            .iter()
            .map(|(domain, stats)| {
                format!(
                    "{} has {}% availability percentage",
                    domain,
                    Self::percentage(stats)
                )
            })
            .collect()
    }

    /// Print the availability report to stdout.
    pub fn report(&self) {
        for line in self.report_lines() {
            println!("{}", line);
        }
    }
}

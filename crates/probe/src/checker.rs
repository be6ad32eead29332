//! Endpoint checker implementations.

use crate::types::{EndpointSpec, ProbeResult, REQUEST_TIMEOUT};
use async_trait::async_trait;
use common::{Error, Result};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Endpoint checker trait
#[async_trait]
pub trait EndpointChecker: Send + Sync {
    /// Probe one endpoint. Total: transport failures are mapped to
    /// [`ProbeResult::Failed`], never returned as errors.
    async fn check(&self, endpoint: &EndpointSpec) -> ProbeResult;
}

/// HTTP endpoint checker backed by a shared reqwest client.
pub struct HttpChecker {
    client: reqwest::Client,
}

impl HttpChecker {
    /// Create a new HTTP checker with the fixed per-request timeout.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::probe)?;

        Ok(Self { client })
    }

    fn build_request(&self, endpoint: &EndpointSpec) -> reqwest::RequestBuilder {
        // An unparseable method string falls back to GET rather than
        // failing the probe.
        let method = endpoint
            .method
            .to_uppercase()
            .parse::<reqwest::Method>()
            .unwrap_or(reqwest::Method::GET);

        let mut request = self.client.request(method, &endpoint.url);

        for (key, value) in &endpoint.headers {
            request = request.header(key, value);
        }

        if let Some(body) = &endpoint.body {
            request = request.json(body);
        }

        request
    }
}

#[async_trait]
impl EndpointChecker for HttpChecker {
    async fn check(&self, endpoint: &EndpointSpec) -> ProbeResult {
        let start = Instant::now();

        match timeout(REQUEST_TIMEOUT, self.build_request(endpoint).send()).await {
            Ok(Ok(response)) => {
                let latency = start.elapsed();
                let status = response.status().as_u16();
                debug!(
                    url = %endpoint.url,
                    status,
                    latency_ms = latency.as_millis(),
                    "Probe received response"
                );
                ProbeResult::response(status, latency)
            }
            Ok(Err(e)) => {
                let latency = start.elapsed();
                if e.is_timeout() {
                    warn!(url = %endpoint.url, "Probe timed out");
                    ProbeResult::timeout(latency)
                } else {
                    warn!(url = %endpoint.url, error = %e, "Probe failed");
                    ProbeResult::transport_error(latency, e.to_string())
                }
            }
            Err(_) => {
                let latency = start.elapsed();
                warn!(url = %endpoint.url, "Probe timed out");
                ProbeResult::timeout(latency)
            }
        }
    }
}

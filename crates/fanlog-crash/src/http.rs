//! HTTP crash reporting backend

use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{CrashError, Result};
use crate::report::CrashReport;
use crate::CrashReporter;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Posts crash reports as JSON to an HTTP endpoint.
///
/// Uses a blocking client, so it must not be driven from inside an async
/// runtime's worker thread.
pub struct HttpCrashReporter {
    endpoint: Url,
    api_key: Option<String>,
    client: Client,
}

impl HttpCrashReporter {
    /// Create a reporter for `endpoint`
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(endpoint, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(endpoint, api_key, client)
    }

    /// Create with a custom HTTP client (useful for testing)
    pub fn with_client(endpoint: &str, api_key: Option<String>, client: Client) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| CrashError::invalid_endpoint(format!("{}: {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(CrashError::invalid_endpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }

        Ok(Self {
            endpoint,
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CrashReporter for HttpCrashReporter {
    fn send(&self, report: &CrashReport) -> Result<()> {
        debug!("Sending crash report {} to {}", report.id, self.endpoint);

        let mut request = self.client.post(self.endpoint.clone()).json(report);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrashError::Rejected {
                status: status.as_u16(),
            });
        }

        info!("Crash report {} delivered", report.id);
        Ok(())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

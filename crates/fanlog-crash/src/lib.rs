//! fanlog crash reporting
//!
//! A destination that remembers recent events as breadcrumbs and, when an
//! event at or above its report level arrives, sends a crash report carrying
//! that trail to a crash-reporting service.

mod error;
mod http;
#[cfg(test)]
pub mod mock;
mod report;

pub use error::{CrashError, Result};
pub use http::{HttpCrashReporter, DEFAULT_TIMEOUT_SECS};
pub use report::{Breadcrumb, BreadcrumbBuffer, CrashReport};

use fanlog_core::{CrashConfig, Destination, DestinationId, Level, LogEvent, Threshold};
use parking_lot::Mutex;
use std::any::Any;
use std::time::Duration;
use tracing::warn;

/// Trait for crash reporting backends
pub trait CrashReporter: Send + Sync {
    /// Deliver one report
    fn send(&self, report: &CrashReport) -> Result<()>;

    /// Check if the reporter is ready to deliver
    fn is_configured(&self) -> bool;
}

/// Destination forwarding serious events to a [`CrashReporter`]
pub struct CrashDestination {
    id: DestinationId,
    threshold: Threshold,
    report_level: Level,
    breadcrumbs: Mutex<BreadcrumbBuffer>,
    reporter: Box<dyn CrashReporter>,
}

impl CrashDestination {
    pub fn new(
        reporter: Box<dyn CrashReporter>,
        threshold: Threshold,
        report_level: Level,
        breadcrumb_capacity: usize,
    ) -> Self {
        Self {
            id: DestinationId::new(),
            threshold,
            report_level,
            breadcrumbs: Mutex::new(BreadcrumbBuffer::new(breadcrumb_capacity)),
            reporter,
        }
    }

    /// Build a destination posting to the endpoint of a `[crash]` config section
    pub fn from_config(config: &CrashConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let reporter =
            HttpCrashReporter::with_timeout(&config.endpoint, config.api_key.clone(), timeout)?;
        Ok(Self::new(
            Box::new(reporter),
            config.threshold,
            config.report_level(),
            config.breadcrumb_capacity(),
        ))
    }

    pub fn report_level(&self) -> Level {
        self.report_level
    }

    /// Breadcrumbs currently held, oldest first
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.breadcrumbs.lock().snapshot()
    }

    fn report(&self, event: &LogEvent) {
        if !self.reporter.is_configured() {
            return;
        }

        let report = CrashReport::new(event, self.breadcrumbs());
        if let Err(e) = self.reporter.send(&report) {
            warn!("Failed to deliver crash report {}: {}", report.summary(), e);
        }
    }
}

impl Destination for CrashDestination {
    fn id(&self) -> DestinationId {
        self.id
    }

    fn threshold(&self) -> Threshold {
        self.threshold
    }

    fn log(&self, event: &LogEvent) {
        if !self.accepts(event.level) {
            return;
        }
        if event.level >= self.report_level {
            self.report(event);
        }
        self.breadcrumbs.lock().push(Breadcrumb::from(event));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

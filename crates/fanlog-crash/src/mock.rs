//! Mock implementations for testing

use crate::error::{CrashError, Result};
use crate::report::CrashReport;
use crate::CrashReporter;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock reporter that records every delivered report
pub struct MockReporter {
    reports: Mutex<Vec<CrashReport>>,
    call_count: AtomicUsize,
    should_fail: bool,
    configured: bool,
}

impl MockReporter {
    pub fn new() -> Self {
        Self {
            reports: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
            should_fail: false,
            configured: true,
        }
    }

    /// A reporter whose deliveries always fail
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    /// A reporter that reports itself as not ready
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn reports(&self) -> Vec<CrashReport> {
        self.reports.lock().clone()
    }
}

impl CrashReporter for MockReporter {
    fn send(&self, report: &CrashReport) -> Result<()> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if !self.configured {
            return Err(CrashError::NotConfigured);
        }
        if self.should_fail {
            return Err(CrashError::Rejected { status: 503 });
        }

        self.reports.lock().push(report.clone());
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

impl CrashReporter for Arc<MockReporter> {
    fn send(&self, report: &CrashReport) -> Result<()> {
        self.as_ref().send(report)
    }

    fn is_configured(&self) -> bool {
        self.as_ref().is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_core::{Level, LogEvent};

    #[test]
    fn test_mock_records_reports() {
        let reporter = MockReporter::new();
        let report = CrashReport::new(&LogEvent::new(Level::Error, "a", "b"), vec![]);
        reporter.send(&report).unwrap();

        assert_eq!(reporter.call_count(), 1);
        assert_eq!(reporter.reports()[0].id, report.id);
    }

    #[test]
    fn test_mock_fails_when_configured() {
        let reporter = MockReporter::failing();
        let report = CrashReport::new(&LogEvent::new(Level::Error, "a", "b"), vec![]);
        assert!(reporter.send(&report).is_err());
        assert!(reporter.reports().is_empty());
    }

    #[test]
    fn test_unconfigured_mock_refuses() {
        let reporter = MockReporter::unconfigured();
        let report = CrashReport::new(&LogEvent::new(Level::Error, "a", "b"), vec![]);
        assert!(matches!(
            reporter.send(&report),
            Err(CrashError::NotConfigured)
        ));
    }
}

//! Crash reports and the breadcrumb trail leading up to them

use chrono::{DateTime, Utc};
use fanlog_core::{Level, LogEvent, Metadata, SourceLocation};
use serde::Serialize;
use std::collections::VecDeque;
use uuid::Uuid;

/// A condensed earlier event attached to a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub label: String,
    pub message: String,
}

impl From<&LogEvent> for Breadcrumb {
    fn from(event: &LogEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            level: event.level,
            label: event.label.clone(),
            message: event.message.clone(),
        }
    }
}

/// Fixed-capacity trail of recent events, oldest dropped first
#[derive(Debug, Clone)]
pub struct BreadcrumbBuffer {
    capacity: usize,
    crumbs: VecDeque<Breadcrumb>,
}

impl BreadcrumbBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            crumbs: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, crumb: Breadcrumb) {
        if self.capacity == 0 {
            return;
        }
        if self.crumbs.len() == self.capacity {
            self.crumbs.pop_front();
        }
        self.crumbs.push_back(crumb);
    }

    pub fn snapshot(&self) -> Vec<Breadcrumb> {
        self.crumbs.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }
}

/// Payload delivered to a crash-reporting service
#[derive(Debug, Clone, Serialize)]
pub struct CrashReport {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub label: String,
    pub message: String,
    pub metadata: Metadata,
    pub error: Option<String>,
    pub location: SourceLocation,
    pub breadcrumbs: Vec<Breadcrumb>,
}

impl CrashReport {
    pub fn new(event: &LogEvent, breadcrumbs: Vec<Breadcrumb>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: event.timestamp,
            level: event.level,
            label: event.label.clone(),
            message: event.message.clone(),
            metadata: event.metadata.clone(),
            error: event.error.clone(),
            location: event.location,
            breadcrumbs,
        }
    }

    /// One-line summary used in diagnostics
    pub fn summary(&self) -> String {
        match &self.error {
            Some(error) => format!("[{}] {}: {} ({})", self.level, self.label, self.message, error),
            None => format!("[{}] {}: {}", self.level, self.label, self.message),
        }
    }
}

//! The logging facade

use chrono::Utc;
use fanlog_core::{
    constants::TIMESTAMP_FORMAT, Destination, DestinationId, Error, Level, LogEvent,
    LoggingConfig, Metadata, Result, SourceLocation,
};
use fanlog_crash::CrashDestination;
use fanlog_file::{FileDestination, RotationSettings};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::console::ConsoleDestination;
use crate::manager::DestinationManager;

static GLOBAL: OnceCell<Logger> = OnceCell::new();

/// Formats events and fans them out to every accepting destination
#[derive(Default)]
pub struct Logger {
    destinations: DestinationManager,
    timestamps: bool,
}

impl Logger {
    /// A logger with no destinations
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a logger and its destinations from a config file
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let logger = Self::new().with_timestamps(config.timestamps);

        if let Some(console) = &config.console {
            logger.add(Arc::new(ConsoleDestination::new(console.threshold, console.colors)));
        }

        if let Some(file) = &config.file {
            let settings = RotationSettings::from_config(file)?;
            logger.add(Arc::new(FileDestination::new(settings, file.threshold)?));
        }

        if let Some(crash) = &config.crash {
            let destination = CrashDestination::from_config(crash)
                .map_err(|e| Error::config(format!("crash destination: {}", e)))?;
            logger.add(Arc::new(destination));
        }

        debug!("Logger built with {} destination(s)", logger.destinations.len());
        Ok(logger)
    }

    /// Prefix every message with the time it was logged
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    pub fn with_destination(self, destination: Arc<dyn Destination>) -> Self {
        self.destinations.add(destination);
        self
    }

    pub fn add(&self, destination: Arc<dyn Destination>) -> DestinationId {
        self.destinations.add(destination)
    }

    pub fn remove(&self, id: DestinationId) -> Option<Arc<dyn Destination>> {
        self.destinations.remove(id)
    }

    pub fn destinations(&self) -> &DestinationManager {
        &self.destinations
    }

    /// Whether any destination would write an event at `level`
    pub fn is_enabled(&self, level: Level) -> bool {
        self.destinations
            .snapshot()
            .iter()
            .any(|d| d.accepts(level))
    }

    /// Log one event.
    ///
    /// `message` and `metadata` run at most once, and only when at least one
    /// destination accepts `level`.
    pub fn log<M, D>(
        &self,
        level: Level,
        label: &str,
        message: M,
        metadata: D,
        error: Option<&dyn std::error::Error>,
        location: SourceLocation,
    ) where
        M: FnOnce() -> String,
        D: FnOnce() -> Metadata,
    {
        let targets = self.destinations.accepting(level);
        if targets.is_empty() {
            return;
        }

        let mut message = message();
        if self.timestamps {
            message = format!("{} {}", Utc::now().format(TIMESTAMP_FORMAT), message);
        }

        let mut event = LogEvent::new(level, label, message)
            .with_metadata(metadata())
            .with_location(location);
        if let Some(error) = error {
            event = event.with_error(error.to_string());
        }

        for destination in targets {
            destination.log(&event);
        }
    }

    /// Log a plain message without metadata
    pub fn message(&self, level: Level, label: &str, message: impl Into<String>) {
        let message = message.into();
        self.log(
            level,
            label,
            || message,
            Metadata::new,
            None,
            SourceLocation::unknown(),
        );
    }

    pub fn verbose(&self, label: &str, message: impl Into<String>) {
        self.message(Level::Verbose, label, message);
    }

    pub fn debug(&self, label: &str, message: impl Into<String>) {
        self.message(Level::Debug, label, message);
    }

    pub fn info(&self, label: &str, message: impl Into<String>) {
        self.message(Level::Info, label, message);
    }

    pub fn warning(&self, label: &str, message: impl Into<String>) {
        self.message(Level::Warning, label, message);
    }

    pub fn error(&self, label: &str, message: impl Into<String>) {
        self.message(Level::Error, label, message);
    }

    pub fn critical(&self, label: &str, message: impl Into<String>) {
        self.message(Level::Critical, label, message);
    }

    /// Log `message` together with the error that caused it
    pub fn report(
        &self,
        level: Level,
        label: &str,
        message: impl Into<String>,
        error: &dyn std::error::Error,
    ) {
        let message = message.into();
        self.log(
            level,
            label,
            || message,
            Metadata::new,
            Some(error),
            SourceLocation::unknown(),
        );
    }

    /// Existing files of every file destination
    pub fn log_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        self.destinations
            .for_each_of::<FileDestination>(|file| files.extend(file.log_files()));
        files
    }

    /// Clear the files of every file destination
    pub fn clear_log_files(&self) {
        self.destinations
            .for_each_of::<FileDestination>(FileDestination::clear_log_files);
    }
}

/// Install the process-wide logger; fails with the logger if one is already set
pub fn set_global(logger: Logger) -> std::result::Result<(), Logger> {
    GLOBAL.set(logger)
}

/// The process-wide logger, if one was installed
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}

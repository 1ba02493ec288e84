//! fanlog - a leveled logging facade
//!
//! A [`Logger`] formats each call once and hands it to every registered
//! [`Destination`] whose threshold accepts the level:
//!
//! - [`ConsoleDestination`] for terminals
//! - [`FileDestination`] for size-rotated log files
//! - [`CrashDestination`] for a crash-reporting service
//! - [`MockDestination`] for tests
//!
//! Destinations never return errors to the caller. Their own failures are
//! reported through `tracing`.

mod console;
mod logger;
mod macros;
mod manager;
mod mock;

pub use console::ConsoleDestination;
pub use logger::{global, set_global, Logger};
pub use manager::DestinationManager;
pub use mock::MockDestination;

pub use fanlog_core::{
    Charset, Destination, DestinationId, Error, Level, LogEvent, LoggingConfig, Metadata,
    PrefixStyle, Result, SourceLocation, Threshold,
};
pub use fanlog_crash::{CrashDestination, CrashReport, CrashReporter, HttpCrashReporter};
pub use fanlog_file::{FileDestination, RotationSettings};

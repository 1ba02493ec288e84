//! Constants and default values for fanlog

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Directory created under the platform's per-user data directory
pub const FANLOG_DIR: &str = "fanlog";

/// Default folder for log files, relative to the base directory
pub const DEFAULT_LOG_FOLDER: &str = "logs";

/// Default log file stem
pub const DEFAULT_BASE_NAME: &str = "application";

/// Extension shared by the current file and every backup
pub const LOG_EXTENSION: &str = "log";

/// Default rotation threshold in bytes (1 MiB)
pub const DEFAULT_SIZE_LIMIT_BYTES: i64 = 1024 * 1024;

/// Default number of numbered backups kept next to the current file
pub const DEFAULT_ROTATIONS_KEPT: u32 = 10;

/// Default number of breadcrumbs a crash destination remembers
pub const DEFAULT_BREADCRUMB_CAPACITY: usize = 100;

/// Timestamp layout used when the facade injects timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Config file names searched for, in priority order
pub const CONFIG_FILES: &[&str] = &[
    "fanlog.toml",
    "fanlog.yaml",
    "fanlog.yml",
    "fanlog.json",
];

/// Get the platform base directory that log folders are resolved under
pub fn base_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|d| d.join(FANLOG_DIR))
        .ok_or(Error::BaseDirUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir() {
        if let Ok(dir) = base_dir() {
            assert!(dir.ends_with(FANLOG_DIR));
        }
    }
}

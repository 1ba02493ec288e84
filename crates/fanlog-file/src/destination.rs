//! Rotating file destination

use fanlog_core::{
    format_line, Destination, DestinationId, Error, LogEvent, PrefixStyle, Result, Threshold,
};
use parking_lot::{Mutex, MutexGuard};
use std::any::Any;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::reader::{tail_across, LogReader};
use crate::rotation::{LogFile, RotationSettings};
use crate::rotator::{RotationReport, Rotator};
use crate::writer::FileWriter;

/// One gate for every file destination in the process.
///
/// Destinations writing to different folders still serialize against each
/// other; the lost cross-file throughput buys a single lock ordering.
static FILE_GATE: Mutex<()> = parking_lot::const_mutex(());

fn acquire_gate() -> MutexGuard<'static, ()> {
    FILE_GATE.lock()
}

/// Destination that appends formatted lines to a size-rotated log file
pub struct FileDestination {
    id: DestinationId,
    threshold: Threshold,
    settings: RotationSettings,
    /// Only touched while `FILE_GATE` is held
    writer: Mutex<Option<FileWriter>>,
}

impl FileDestination {
    /// Create a destination and open its current file.
    ///
    /// Invalid settings are rejected. Failing to open the file is not an
    /// error: the destination starts without a writer and retries on the
    /// next log call.
    pub fn new(settings: RotationSettings, threshold: Threshold) -> Result<Self> {
        settings.validate()?;

        let destination = Self {
            id: DestinationId::new(),
            threshold,
            settings,
            writer: Mutex::new(None),
        };

        {
            let _gate = acquire_gate();
            let mut slot = destination.writer.lock();
            destination.with_rotator(|rotator| {
                rotator.reopen(&mut slot);
            });
        }

        Ok(destination)
    }

    /// Destination with default settings, accepting every level
    pub fn with_defaults() -> Result<Self> {
        Self::new(RotationSettings::default(), Threshold::default())
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    /// Path of the current file, if the base directory resolves
    pub fn current_path(&self) -> Result<PathBuf> {
        let folder = self.settings.resolve_folder()?;
        Ok(self.settings.path_in(&folder, LogFile::Current))
    }

    /// Whether a writer is open right now
    pub fn has_writer(&self) -> bool {
        let _gate = acquire_gate();
        self.writer.lock().is_some()
    }

    /// Existing log files: the current file, then backups from newest to oldest
    pub fn log_files(&self) -> Vec<PathBuf> {
        let folder = match self.settings.resolve_folder() {
            Ok(folder) => folder,
            Err(e) => {
                debug!("Cannot list log files: {}", e);
                return vec![];
            }
        };

        LogFile::all(self.settings.rotations_kept())
            .map(|file| self.settings.path_in(&folder, file))
            .filter(|path| path.exists())
            .collect()
    }

    /// Delete every log file and start a fresh current file.
    ///
    /// Only the files [`log_files`](Self::log_files) lists are removed. With
    /// zero rotations kept, the retired `{base}.1.log` is not listed and
    /// survives until the next rotation deletes it. Individual deletion
    /// failures are logged and skipped.
    pub fn clear_log_files(&self) {
        let _gate = acquire_gate();
        let mut slot = self.writer.lock();

        if let Some(writer) = slot.take() {
            if let Err(e) = writer.close() {
                warn!("Failed to close log file before clearing: {}", e);
            }
        }

        for path in self.log_files() {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Failed to delete log file {}: {}", path.display(), e);
                }
            }
        }

        self.with_rotator(|rotator| {
            rotator.reopen(&mut slot);
        });
    }

    /// Last `n` lines across the backups and the current file, newest last
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        let _gate = acquire_gate();
        let charset = self.settings.charset();
        let readers: Vec<LogReader> = self
            .log_files()
            .into_iter()
            .rev()
            .map(|path| LogReader::new(path, charset))
            .collect();
        tail_across(&readers, n)
    }

    /// Run `f` with a rotator for the resolved folder; no-op if it cannot be resolved
    fn with_rotator(&self, f: impl FnOnce(&Rotator<'_>)) {
        match self.settings.resolve_folder() {
            Ok(folder) => f(&Rotator::new(&self.settings, &folder)),
            Err(e) => warn!("Cannot resolve log folder: {}", e),
        }
    }

    /// Append `line` under the gate.
    ///
    /// Rotation is checked before the write, which catches a file that opened
    /// over budget, and again after it, so the write that spends the budget
    /// retires the file straight away.
    fn write_line(&self, line: &str) {
        let _gate = acquire_gate();
        let mut slot = self.writer.lock();

        self.with_rotator(|rotator| {
            if let Some(report) = rotator.rotate_if_needed(&mut slot) {
                log_failed_steps(&report);
            }
        });

        let Some(writer) = slot.as_mut() else {
            return;
        };

        match writer.append(line) {
            Ok(_) => {}
            Err(Error::Encoding { charset }) => {
                debug!("Dropped log line that cannot be encoded as {}", charset);
                return;
            }
            Err(e) => {
                warn!(
                    "Failed to write to {}: {}; closing writer",
                    writer.path().display(),
                    e
                );
                *slot = None;
                return;
            }
        }

        if writer.is_rotation_due() {
            self.with_rotator(|rotator| log_failed_steps(&rotator.rotate(&mut slot)));
        }
    }
}

fn log_failed_steps(report: &RotationReport) {
    if !report.failures.is_empty() {
        debug!(
            "Rotation finished with {} failed step(s)",
            report.failures.len()
        );
    }
}

impl Destination for FileDestination {
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
        self.write_line(&format_line(event, PrefixStyle::Plain));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for FileDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDestination")
            .field("id", &self.id)
            .field("threshold", &self.threshold)
            .field("settings", &self.settings)
            .finish()
    }
}

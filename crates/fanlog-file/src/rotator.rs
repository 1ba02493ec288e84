//! Executes the rotation sequence for a file destination

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error, warn};

use crate::rotation::{LogFile, RotationPolicy, RotationSettings, RotationStep};
use crate::writer::FileWriter;

/// A rotation step that failed; later steps still ran
#[derive(Debug)]
pub struct StepFailure {
    pub step: RotationStep,
    pub error: io::Error,
}

/// What happened during one rotation
#[derive(Debug, Default)]
pub struct RotationReport {
    pub failures: Vec<StepFailure>,
    /// Whether a fresh current-file writer is in place afterwards
    pub reopened: bool,
}

impl RotationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.reopened
    }
}

/// Rotates the files of one destination.
///
/// Callers hold the file gate for the whole call.
pub struct Rotator<'a> {
    settings: &'a RotationSettings,
    folder: &'a Path,
}

impl<'a> Rotator<'a> {
    pub fn new(settings: &'a RotationSettings, folder: &'a Path) -> Self {
        Self { settings, folder }
    }

    /// Rotate if the writer's budget is spent; reopen if there is no writer.
    ///
    /// Returns the report when a rotation ran.
    pub fn rotate_if_needed(&self, slot: &mut Option<FileWriter>) -> Option<RotationReport> {
        if slot.is_none() {
            self.reopen(slot);
            return None;
        }
        if slot.as_ref().is_some_and(FileWriter::is_rotation_due) {
            Some(self.rotate(slot))
        } else {
            None
        }
    }

    /// Close the current writer, shift the backups and open a fresh file
    pub fn rotate(&self, slot: &mut Option<FileWriter>) -> RotationReport {
        debug!(
            "Rotating log files for {} in {}",
            self.settings.base_name(),
            self.folder.display()
        );

        if let Some(writer) = slot.take() {
            if let Err(e) = writer.close() {
                warn!("Failed to close log file before rotation: {}", e);
            }
        }

        let mut report = RotationReport::default();
        for step in RotationPolicy::plan(self.settings.rotations_kept()) {
            if let Err(error) = self.execute(step) {
                warn!("Log rotation step {:?} failed: {}", step, error);
                report.failures.push(StepFailure { step, error });
            }
        }

        report.reopened = self.reopen(slot);
        report
    }

    /// Open a writer on the current file if the slot is empty
    pub fn reopen(&self, slot: &mut Option<FileWriter>) -> bool {
        if slot.is_some() {
            return true;
        }
        let path = self.path(LogFile::Current);
        match FileWriter::open(path, self.settings) {
            Ok(writer) => {
                *slot = Some(writer);
                true
            }
            Err(e) if e.is_configuration() => {
                error!("Log folder {} is unusable: {}", self.folder.display(), e);
                false
            }
            Err(e) => {
                warn!(
                    "Failed to open log file in {}: {}; dropping lines until it can be opened",
                    self.folder.display(),
                    e
                );
                false
            }
        }
    }

    /// Run one step; a missing source file is not an error
    fn execute(&self, step: RotationStep) -> io::Result<()> {
        match step {
            RotationStep::Delete(file) => match fs::remove_file(self.path(file)) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            },
            RotationStep::Rename { from, to } => {
                let from = self.path(from);
                if !from.exists() {
                    return Ok(());
                }
                fs::rename(from, self.path(to))
            }
        }
    }

    fn path(&self, file: LogFile) -> std::path::PathBuf {
        self.settings.path_in(self.folder, file)
    }
}

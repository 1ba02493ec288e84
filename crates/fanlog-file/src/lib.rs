//! fanlog file - append-only log files with size-based rotation
//!
//! The current file is `{base_name}.log`; retired files become numbered
//! backups `{base_name}.1.log` (newest) through `{base_name}.{n}.log`.
//! Every write and rotation across all file destinations in the process
//! runs under one gate.

mod destination;
mod reader;
mod rotation;
mod rotator;
mod writer;

pub use destination::FileDestination;
pub use reader::{tail_across, LogReader};
pub use rotation::{LogFile, RotationPolicy, RotationSettings, RotationStep};
pub use rotator::{RotationReport, Rotator, StepFailure};
pub use writer::FileWriter;

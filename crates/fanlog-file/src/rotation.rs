//! Rotation settings, log file naming and the rotation decision

use fanlog_core::{constants, Charset, Error, FileConfig, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path, PathBuf};

/// File stems may only use characters that are safe in every file system
static BASE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("Invalid base name regex"));

/// Rotation settings for one file destination.
///
/// Built with the `with_*` methods and checked by [`RotationSettings::validate`];
/// a destination owns its copy and never changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSettings {
    base_dir: Option<PathBuf>,
    folder: PathBuf,
    base_name: String,
    size_limit_bytes: i64,
    rotations_kept: u32,
    charset: Charset,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self::new(constants::DEFAULT_LOG_FOLDER)
    }
}

impl RotationSettings {
    /// Settings for `folder` (relative to the platform base directory) with defaults
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: None,
            folder: folder.into(),
            base_name: constants::DEFAULT_BASE_NAME.to_string(),
            size_limit_bytes: constants::DEFAULT_SIZE_LIMIT_BYTES,
            rotations_kept: constants::DEFAULT_ROTATIONS_KEPT,
            charset: Charset::default(),
        }
    }

    /// Resolve `folder` under `dir` instead of the platform base directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    pub fn with_size_limit(mut self, bytes: i64) -> Self {
        self.size_limit_bytes = bytes;
        self
    }

    pub fn with_rotations_kept(mut self, rotations: u32) -> Self {
        self.rotations_kept = rotations;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Build settings from a `[file]` config section
    pub fn from_config(config: &FileConfig) -> Result<Self> {
        let mut settings = Self::new(
            config
                .folder
                .as_deref()
                .unwrap_or(constants::DEFAULT_LOG_FOLDER),
        );
        if let Some(dir) = &config.base_dir {
            settings = settings.with_base_dir(dir.clone());
        }
        if let Some(name) = &config.base_name {
            settings = settings.with_base_name(name.as_str());
        }
        if let Some(bytes) = config.size_limit_bytes {
            settings = settings.with_size_limit(bytes);
        }
        if let Some(rotations) = config.rotations_kept {
            settings = settings.with_rotations_kept(rotations);
        }
        if let Some(label) = &config.charset {
            settings = settings.with_charset(label.parse()?);
        }
        settings.validate()?;
        Ok(settings)
    }

    /// Check the invariants a destination relies on
    pub fn validate(&self) -> Result<()> {
        if self.size_limit_bytes <= 0 {
            return Err(Error::invalid_settings(format!(
                "size limit must be positive, got {}",
                self.size_limit_bytes
            )));
        }
        if !BASE_NAME_REGEX.is_match(&self.base_name) || self.base_name.contains("..") {
            return Err(Error::invalid_settings(format!(
                "invalid base name '{}'",
                self.base_name
            )));
        }
        let escapes = self
            .folder
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(Error::invalid_settings(format!(
                "folder must be relative and stay inside the base directory: {}",
                self.folder.display()
            )));
        }
        Ok(())
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn size_limit_bytes(&self) -> i64 {
        self.size_limit_bytes
    }

    pub fn rotations_kept(&self) -> u32 {
        self.rotations_kept
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Absolute folder the log files live in
    pub fn resolve_folder(&self) -> Result<PathBuf> {
        let base = match &self.base_dir {
            Some(dir) => dir.clone(),
            None => constants::base_dir()?,
        };
        Ok(base.join(&self.folder))
    }

    /// Path of `file` inside an already resolved folder
    pub fn path_in(&self, folder: &Path, file: LogFile) -> PathBuf {
        folder.join(file.file_name(&self.base_name))
    }
}

/// A logical log file: the active one or a numbered backup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFile {
    Current,
    /// Backup `n`, where 1 is the newest
    Rotation(u32),
}

impl LogFile {
    pub fn file_name(&self, base_name: &str) -> String {
        match self {
            LogFile::Current => format!("{}.{}", base_name, constants::LOG_EXTENSION),
            LogFile::Rotation(n) => format!("{}.{}.{}", base_name, n, constants::LOG_EXTENSION),
        }
    }

    /// The current file followed by backups 1..=rotations_kept
    pub fn all(rotations_kept: u32) -> impl Iterator<Item = LogFile> {
        std::iter::once(LogFile::Current).chain((1..=rotations_kept).map(LogFile::Rotation))
    }
}

/// One file operation in a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStep {
    Delete(LogFile),
    Rename { from: LogFile, to: LogFile },
}

/// Pure rotation decisions
pub struct RotationPolicy;

impl RotationPolicy {
    /// Rotation is due once the byte budget is used up
    pub fn is_rotation_due(bytes_remaining: i64) -> bool {
        bytes_remaining <= 0
    }

    /// File operations for one rotation, in execution order.
    ///
    /// The oldest backup goes first, then backups shift up by one from the
    /// oldest down, then the current file becomes backup 1. With zero
    /// rotations kept the current file still moves to backup 1, and the next
    /// rotation deletes it.
    pub fn plan(rotations_kept: u32) -> Vec<RotationStep> {
        let oldest = rotations_kept.max(1);
        let mut steps = Vec::with_capacity(rotations_kept as usize + 2);

        steps.push(RotationStep::Delete(LogFile::Rotation(oldest)));
        for k in (1..rotations_kept).rev() {
            steps.push(RotationStep::Rename {
                from: LogFile::Rotation(k),
                to: LogFile::Rotation(k + 1),
            });
        }
        steps.push(RotationStep::Rename {
            from: LogFile::Current,
            to: LogFile::Rotation(1),
        });

        steps
    }
}

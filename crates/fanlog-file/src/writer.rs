//! Append-only log file with a byte budget

use fanlog_core::{Charset, Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::rotation::{RotationPolicy, RotationSettings};

/// One open log file and how many more bytes it may take before rotating.
///
/// `close` consumes the writer, so nothing can be appended afterwards.
pub struct FileWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    charset: Charset,
    bytes_remaining: i64,
}

impl FileWriter {
    /// Open `path` for appending, creating it and its parent folders if needed.
    ///
    /// A file already larger than the size limit opens with a negative budget,
    /// which makes the next write rotate first.
    pub fn open(path: PathBuf, settings: &RotationSettings) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::config(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        let size_on_disk = file.seek(SeekFrom::End(0))?;
        let bytes_remaining =
            settings.size_limit_bytes() - i64::try_from(size_on_disk).unwrap_or(i64::MAX);

        debug!(
            "Opened log file {} ({} bytes, {} remaining)",
            path.display(),
            size_on_disk,
            bytes_remaining
        );

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            charset: settings.charset(),
            bytes_remaining,
        })
    }

    /// Encode and append `line`, returning the number of bytes written.
    ///
    /// A line the charset cannot represent fails with [`Error::Encoding`]
    /// before anything is written, and the budget is left untouched.
    pub fn append(&mut self, line: &str) -> Result<usize> {
        let bytes = self.charset.encode(line)?;

        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        self.bytes_remaining -= bytes.len() as i64;

        Ok(bytes.len())
    }

    /// Flush and release the file handle
    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|e| Error::IoError(e.into_error()))?
            .sync_all()?;
        Ok(())
    }

    pub fn is_rotation_due(&self) -> bool {
        RotationPolicy::is_rotation_due(self.bytes_remaining)
    }

    pub fn bytes_remaining(&self) -> i64 {
        self.bytes_remaining
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("path", &self.path)
            .field("charset", &self.charset)
            .field("bytes_remaining", &self.bytes_remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings(limit: i64) -> RotationSettings {
        RotationSettings::new("logs").with_size_limit(limit)
    }

    #[test]
    fn test_open_creates_folders_and_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("app.log");

        let writer = FileWriter::open(path.clone(), &settings(100)).unwrap();
        assert!(path.exists());
        assert_eq!(writer.bytes_remaining(), 100);
        assert_eq!(writer.path(), path.as_path());
    }

    #[test]
    fn test_budget_tracks_bytes_written() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let mut writer = FileWriter::open(path.clone(), &settings(1000)).unwrap();
        let lines = ["first line\n", "second, longer line\n", "caf\u{e9}\n"];
        let mut total = 0;
        for line in lines {
            total += writer.append(line).unwrap();
        }

        assert_eq!(total, 11 + 20 + 6);
        assert_eq!(writer.bytes_remaining(), 1000 - total as i64);
        assert_eq!(fs::read_to_string(&path).unwrap(), lines.concat());
    }

    #[test]
    fn test_open_accounts_for_existing_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "x".repeat(40)).unwrap();

        let mut writer = FileWriter::open(path.clone(), &settings(100)).unwrap();
        assert_eq!(writer.bytes_remaining(), 60);

        writer.append("tail\n").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&"x".repeat(40)));
        assert!(content.ends_with("tail\n"));
    }

    #[test]
    fn test_oversized_file_opens_with_negative_budget() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        fs::write(&path, "y".repeat(150)).unwrap();

        let writer = FileWriter::open(path, &settings(100)).unwrap();
        assert_eq!(writer.bytes_remaining(), -50);
        assert!(writer.is_rotation_due());
    }

    #[test]
    fn test_unencodable_line_is_rejected_without_charge() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let settings = settings(100).with_charset(Charset::for_label("windows-1252").unwrap());

        let mut writer = FileWriter::open(path.clone(), &settings).unwrap();
        let result = writer.append("snowman \u{2603}\n");

        assert!(matches!(result, Err(Error::Encoding { .. })));
        assert_eq!(writer.bytes_remaining(), 100);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_utf16_budget_counts_encoded_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");
        let settings = settings(100).with_charset(Charset::Utf16Le);

        let mut writer = FileWriter::open(path, &settings).unwrap();
        assert_eq!(writer.append("abc\n").unwrap(), 8);
        assert_eq!(writer.bytes_remaining(), 92);
    }

    #[test]
    fn test_close_flushes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let mut writer = FileWriter::open(path.clone(), &settings(100)).unwrap();
        writer.append("bye\n").unwrap();
        writer.close().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "bye\n");
    }

    #[test]
    fn test_uncreatable_folder_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("blocked"), "file").unwrap();
        let path = dir.path().join("blocked").join("app.log");

        let err = FileWriter::open(path, &settings(100)).unwrap_err();
        assert!(err.is_configuration());
    }
}

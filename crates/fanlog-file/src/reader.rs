//! Reads log files back for inspection

use fanlog_core::{Charset, Result};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Reader for one log file written in a known charset
pub struct LogReader {
    path: PathBuf,
    charset: Charset,
}

impl LogReader {
    pub fn new(path: PathBuf, charset: Charset) -> Self {
        Self { path, charset }
    }

    /// All lines of the file, oldest first; a missing file has none
    pub fn lines(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let bytes = fs::read(&self.path)?;
        let text = self.charset.decode(&bytes);
        Ok(text.lines().map(str::to_string).collect())
    }

    /// The last `n` lines of the file
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        let mut lines = self.lines()?;
        let skip = lines.len().saturating_sub(n);
        Ok(lines.split_off(skip))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size on disk in bytes
    pub fn size(&self) -> Result<u64> {
        if !self.path.exists() {
            return Ok(0);
        }
        Ok(fs::metadata(&self.path)?.len())
    }
}

/// Last `n` lines across several files given oldest first
pub fn tail_across(readers: &[LogReader], n: usize) -> Result<Vec<String>> {
    if n == 0 {
        return Ok(vec![]);
    }

    let mut window: VecDeque<String> = VecDeque::new();
    for reader in readers {
        for line in reader.lines()? {
            window.push_back(line);
            if window.len() > n {
                window.pop_front();
            }
        }
    }
    Ok(window.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_tail_nonexistent_file() {
        let reader = LogReader::new(PathBuf::from("/nonexistent/file.log"), Charset::utf8());
        assert!(reader.tail(10).unwrap().is_empty());
        assert!(!reader.exists());
        assert_eq!(reader.size().unwrap(), 0);
    }

    #[test]
    fn test_tail_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.log");

        {
            let mut file = fs::File::create(&path).unwrap();
            for i in 1..=20 {
                writeln!(file, "Line {}", i).unwrap();
            }
        }

        let reader = LogReader::new(path, Charset::utf8());
        let lines = reader.tail(5).unwrap();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Line 16");
        assert_eq!(lines[4], "Line 20");
    }

    #[test]
    fn test_reads_utf16() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wide.log");
        let bytes = Charset::Utf16Be.encode("alpha\nbeta\n").unwrap();
        fs::write(&path, &bytes).unwrap();

        let reader = LogReader::new(path, Charset::Utf16Be);
        assert_eq!(reader.lines().unwrap(), vec!["alpha", "beta"]);
        assert_eq!(reader.size().unwrap(), bytes.len() as u64);
    }

    #[test]
    fn test_tail_across_files() {
        let dir = TempDir::new().unwrap();
        let older = dir.path().join("app.1.log");
        let newer = dir.path().join("app.log");
        fs::write(&older, "a\nb\nc\n").unwrap();
        fs::write(&newer, "d\ne\n").unwrap();

        let readers = vec![
            LogReader::new(older, Charset::utf8()),
            LogReader::new(newer, Charset::utf8()),
        ];
        assert_eq!(tail_across(&readers, 3).unwrap(), vec!["c", "d", "e"]);
        assert_eq!(tail_across(&readers, 10).unwrap().len(), 5);
    }

    #[test]
    fn test_tail_across_unbounded_and_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");
        fs::write(&path, "one\ntwo\n").unwrap();
        let readers = [LogReader::new(path, Charset::default())];

        assert_eq!(tail_across(&readers, usize::MAX).unwrap(), vec!["one", "two"]);
        assert!(tail_across(&readers, 0).unwrap().is_empty());
    }
}

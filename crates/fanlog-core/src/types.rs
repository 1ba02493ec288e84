//! Core types for fanlog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};

/// Severity of a log event, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// All levels, least severe first
    pub const ALL: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Uppercased name as it appears in formatted lines
    pub fn label(&self) -> &'static str {
        match self {
            Level::Verbose => "VERBOSE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Warning and above get a decorated prefix on console-like destinations
    pub fn is_problem(&self) -> bool {
        *self >= Level::Warning
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "verbose" | "trace" => Ok(Level::Verbose),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" | "fatal" => Ok(Level::Critical),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

/// Key/value pairs attached to an event, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(Vec<(String, String)>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

/// Where in the calling program an event was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Location used when the caller did not supply one
    pub const fn unknown() -> Self {
        Self::new("<unknown>", 0, "<unknown>")
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.function)
    }
}

/// A fully evaluated log event, handed to every accepting destination
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub level: Level,
    pub label: String,
    pub message: String,
    pub metadata: Metadata,
    /// Description of the error supplied with the call, if any
    pub error: Option<String>,
    pub location: SourceLocation,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(level: Level, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
            message: message.into(),
            metadata: Metadata::new(),
            error: None,
            location: SourceLocation::unknown(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Verbose < Level::Debug);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_problem_levels() {
        let problems: Vec<_> = Level::ALL.into_iter().filter(Level::is_problem).collect();
        assert_eq!(problems, vec![Level::Warning, Level::Error, Level::Critical]);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" critical ".parse::<Level>().unwrap(), Level::Critical);
        assert!(matches!("loud".parse::<Level>(), Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn test_level_labels_round_trip_through_from_str() {
        for level in Level::ALL {
            assert_eq!(level.label().parse::<Level>().unwrap(), level);
        }
    }

    #[test]
    fn test_metadata_keeps_insertion_order() {
        let metadata = Metadata::new().with("b", 2).with("a", 1).with("b", 3);
        let pairs: Vec<_> = metadata.iter().collect();
        assert_eq!(pairs, vec![("b", "3"), ("a", "1")]);
        assert_eq!(metadata.get("a"), Some("1"));
        assert_eq!(metadata.len(), 2);
    }

    #[test]
    fn test_metadata_from_iter() {
        let metadata: Metadata = vec![("user", "42"), ("route", "/")].into_iter().collect();
        assert_eq!(metadata.get("route"), Some("/"));
    }

    #[test]
    fn test_event_builder() {
        let event = LogEvent::new(Level::Error, "net", "connection reset")
            .with_error("broken pipe")
            .with_location(SourceLocation::new("src/net.rs", 10, "net::send"));
        assert_eq!(event.error.as_deref(), Some("broken pipe"));
        assert_eq!(event.location.to_string(), "src/net.rs:10 net::send");
    }
}

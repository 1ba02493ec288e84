//! Error types for fanlog

use std::path::PathBuf;

/// fanlog error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Platform base directory could not be resolved")]
    BaseDirUnavailable,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Unknown charset: {0}")]
    UnknownCharset(String),

    #[error("Text cannot be encoded as {charset}")]
    Encoding { charset: String },

    #[error("Invalid level: {0}")]
    InvalidLevel(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type alias for fanlog
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub fn invalid_settings<S: Into<String>>(msg: S) -> Self {
        Error::InvalidSettings(msg.into())
    }

    pub fn encoding<S: Into<String>>(charset: S) -> Self {
        Error::Encoding {
            charset: charset.into(),
        }
    }

    /// True for errors that leave a destination unable to open its file
    /// because of how it was configured rather than a transient I/O fault
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::ConfigError(_) | Error::BaseDirUnavailable | Error::InvalidSettings(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::encoding("windows-1252");
        assert_eq!(err.to_string(), "Text cannot be encoded as windows-1252");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::IoError(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_errors() {
        assert!(Error::BaseDirUnavailable.is_configuration());
        assert!(Error::invalid_settings("size").is_configuration());
    }
}

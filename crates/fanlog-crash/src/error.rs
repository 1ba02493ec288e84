//! Error types for crash reporting

/// Crash reporting error type
#[derive(Debug, thiserror::Error)]
pub enum CrashError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Crash service rejected report with status {status}")]
    Rejected { status: u16 },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Crash reporter not configured")]
    NotConfigured,
}

/// Result type alias for crash reporting operations
pub type Result<T> = std::result::Result<T, CrashError>;

impl CrashError {
    pub fn invalid_endpoint<S: Into<String>>(msg: S) -> Self {
        CrashError::InvalidEndpoint(msg.into())
    }
}

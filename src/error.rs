//! Error types for the check-in scheduler.

/// Top-level error type for the check-in scheduler.
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    /// Key-value store read/write error.
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Email transport error (network failure, provider rejection).
    #[error("email error: {0}")]
    Email(String),

    /// System notification error.
    #[error("notification error: {0}")]
    Notification(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, CheckinError>;

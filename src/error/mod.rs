//! Error types for Switchboard.

use thiserror::Error;

/// Primary error type for all Switchboard operations.
#[derive(Error, Debug)]
pub enum SwitchboardError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("unknown interrupt action '{action}'")]
    UnknownInterrupt { action: String },

    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid thread id: {0}")]
    InvalidThreadId(String),

    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    #[error("tool loop exceeded {rounds} rounds without a final reply")]
    ToolLoopOverflow { rounds: usize },
}

impl SwitchboardError {
    /// Create an API error from a status code and body text.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error is a transient external-service failure.
    ///
    /// There is no automatic retry policy: a retryable error still aborts
    /// the current run, and the next run replays the in-flight turn from
    /// the last durable checkpoint.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SwitchboardError>;

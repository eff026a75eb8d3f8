// Error types for the benchmark harness

use thiserror::Error;

/// Result type alias for benchmark operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur while benchmarking an endpoint
#[derive(Debug, Error)]
pub enum BenchError {
    /// Caller supplied unusable input (e.g. an empty endpoint list)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The endpoint-test deadline elapsed before or during an attempt
    #[error("Deadline exceeded while benchmarking {endpoint}")]
    DeadlineExceeded { endpoint: String },

    /// The invocation transport itself failed (network fault, bad response)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Metadata lookup for an endpoint failed
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BenchError {
    /// Create an input validation error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        BenchError::InvalidInput(msg.into())
    }

    /// Create a deadline-exceeded error for the given endpoint
    pub fn deadline(endpoint: impl Into<String>) -> Self {
        BenchError::DeadlineExceeded {
            endpoint: endpoint.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        BenchError::Transport(msg.into())
    }

    /// Create a metadata error
    pub fn metadata(msg: impl Into<String>) -> Self {
        BenchError::Metadata(msg.into())
    }
}

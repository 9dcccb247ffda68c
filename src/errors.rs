use thiserror::Error;

/// Error type that captures common persistence and validation failures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid value: {0}")]
    Invalid(String),
}

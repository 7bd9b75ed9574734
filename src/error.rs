//! Error types for a3s-cron-descriptor

use thiserror::Error;

/// Errors that can occur while parsing or describing a cron expression
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Malformed cron expression (empty, or a field-count violation)
    #[error("Invalid cron expression: {0}")]
    Parse(String),

    /// A translation table could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for descriptor operations
pub type Result<T> = std::result::Result<T, DescriptorError>;

//! Error types for audit-log

use thiserror::Error;

/// Errors that can occur while building or persisting audit events
#[derive(Debug, Error)]
pub enum AuditError {
    /// Transport connection failure
    #[error("Connection error: {0}")]
    Connection(String),

    /// Transport has no usable connection
    #[error("Transport '{0}' is not connected")]
    NotConnected(String),

    /// Write failure in a transport
    #[error("Failed to write audit event to '{transport}': {reason}")]
    Write {
        transport: String,
        reason: String,
    },

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

//! Error types for the gateway crate.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while receiving, parsing and persisting messages.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HL7 parse error for one inbound message.
    #[error("HL7 parse error: {0}")]
    Parse(#[from] hl7_message::Hl7Error),

    /// Serialization error while rendering the parse result.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Inbound frame was not valid UTF-8.
    #[error("inbound frame is not valid UTF-8")]
    NonUtf8Frame,

    /// I/O error with the offending path.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path on which the operation failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A requested save directory would escape the configured base.
    #[error("save path {} is outside the configured base directory", .requested.display())]
    SavePathOutsideBase {
        /// The rejected path as requested.
        requested: PathBuf,
    },

    /// The listener could not be bound.
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GatewayError {
    /// Creates an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

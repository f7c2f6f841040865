//! Error types for HL7 message parsing.

use thiserror::Error;

/// Errors that can occur during HL7 message parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Hl7Error {
    /// Empty or whitespace-only message provided.
    #[error("empty HL7 message")]
    EmptyMessage,

    /// The message contains no MSH header segment.
    #[error("no MSH header segment in message")]
    MissingHeader,

    /// A segment model constructor was invoked against the wrong segment type.
    #[error("segment type mismatch: expected {expected}, found {found}")]
    SegmentTypeMismatch {
        /// The segment code the model requires.
        expected: &'static str,
        /// The code that was actually present.
        found: String,
    },
}

/// Result type for HL7 parsing operations.
pub type Hl7Result<T> = std::result::Result<T, Hl7Error>;

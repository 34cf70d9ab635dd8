//! Custom error types for the propbag-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every decode failure is terminal: the parser never recovers internally
/// and never hands back a partially decoded tree.
#[derive(Debug, Error)]
pub enum PropbagError {
    /// An error originating from loading the input file.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A read requested more bytes than remain in the buffer.
    #[error("Out of bounds read at offset {offset}: requested {requested} bytes, but only {remaining} remain")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        remaining: usize,
    },

    /// A declared length or count exceeded one of the safety caps.
    #[error("Size limit exceeded for {context} at offset {offset}: {found} is outside the allowed limit of {limit}")]
    SizeLimitExceeded {
        context: &'static str,
        limit: i64,
        found: i64,
        offset: usize,
    },

    /// A property carried a type tag the decoder does not know.
    #[error("Unknown property kind '{kind}' at offset {offset}")]
    UnknownPropertyKind { kind: String, offset: usize },

    /// Bytes could not be decoded in the encoding the wire format declared.
    #[error("Failed to decode {context} at offset {offset}: {reason}")]
    DecodeError {
        context: &'static str,
        offset: usize,
        reason: String,
    },

    /// The header record is structurally unacceptable.
    #[error("Invalid header: {0}")]
    HeaderError(String),

    /// Structures or arrays were nested deeper than the configured limit.
    #[error("Nesting depth limit of {limit} exceeded at offset {offset}")]
    DepthExceeded { limit: usize, offset: usize },

    /// Serializing the decoded tree to JSON failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using the crate's `PropbagError` type.
pub type Result<T> = std::result::Result<T, PropbagError>;

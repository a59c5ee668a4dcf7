//! Error handling for the hashing engine
//!
//! Every variant is a contract violation raised at the offending call. Nothing
//! here is retried internally and no partial digest is ever produced.

use hashkit_common::{Classified, ErrorKind};
use thiserror::Error;

/// Hashing-specific errors
#[derive(Debug, Error)]
pub enum HashError {
    /// Call not valid in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Digest read as an integer of a different width
    #[error("Type mismatch: {actual}-byte digest read as a {expected_bits}-bit integer")]
    TypeMismatch {
        /// Requested integer width in bits
        expected_bits: u32,
        /// Digest length in bytes
        actual: usize,
    },

    /// Argument with an unusable value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Offset or length outside the available data
    #[error("Argument out of range: {0}")]
    OutOfRange(String),

    /// Key length the algorithm does not accept
    #[error("Invalid key length for {algorithm}: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Algorithm that rejected the key
        algorithm: &'static str,
        /// Accepted lengths
        expected: String,
        /// Offered key length in bytes
        actual: usize,
    },

    /// Required argument missing or empty
    #[error("Missing argument: {0} must not be empty")]
    NullArgument(&'static str),

    /// Unknown algorithm name or missing capability
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Configuration that failed to parse
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Read failure
    #[error("I/O error while reading input: {0}")]
    Io(#[from] std::io::Error),
}

impl HashError {
    /// Create an invalid-operation error
    #[must_use]
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Create an invalid-argument error
    #[must_use]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an out-of-range error
    #[must_use]
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }
}

impl Classified for HashError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOperation(_) | Self::TypeMismatch { .. } => ErrorKind::InvalidOperation,
            Self::InvalidArgument(_) | Self::InvalidKeyLength { .. } => ErrorKind::InvalidArgument,
            Self::OutOfRange(_) => ErrorKind::OutOfRange,
            Self::NullArgument(_) => ErrorKind::NullArgument,
            Self::UnsupportedAlgorithm(_) => ErrorKind::NotImplemented,
            Self::Config(_) => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<serde_json::Error> for HashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;

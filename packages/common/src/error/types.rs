//! Core error kinds and classification

use thiserror::Error;

/// Broad categories of hashkit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// The call is not valid in the object's current state
    /// (absorbing after squeezing, numeric view of the wrong width)
    #[error("Invalid operation")]
    InvalidOperation,

    /// An argument had an unusable value (bad key length, zero buffer size)
    #[error("Invalid argument")]
    InvalidArgument,

    /// A length or offset points outside the available data
    #[error("Argument out of range")]
    OutOfRange,

    /// A required argument was missing or empty
    #[error("Missing argument")]
    NullArgument,

    /// The requested capability or algorithm does not exist
    #[error("Not implemented")]
    NotImplemented,

    /// Configuration could not be parsed or failed validation
    #[error("Configuration error")]
    Configuration,

    /// I/O failure while reading input
    #[error("I/O error")]
    Io,
}

impl ErrorKind {
    /// Whether this kind is an argument-level error (argument, range or missing)
    #[must_use]
    pub fn is_argument_error(self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::OutOfRange | Self::NullArgument
        )
    }
}

/// Errors that can report their [`ErrorKind`]
pub trait Classified {
    /// The taxonomy entry this error belongs to
    fn kind(&self) -> ErrorKind;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_family() {
        assert!(ErrorKind::InvalidArgument.is_argument_error());
        assert!(ErrorKind::OutOfRange.is_argument_error());
        assert!(ErrorKind::NullArgument.is_argument_error());
        assert!(!ErrorKind::InvalidOperation.is_argument_error());
        assert!(!ErrorKind::Io.is_argument_error());
    }

    #[test]
    fn display_names() {
        assert_eq!(ErrorKind::OutOfRange.to_string(), "Argument out of range");
        assert_eq!(ErrorKind::NotImplemented.to_string(), "Not implemented");
    }
}

//! Error types for Triptych cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid key length provided.
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Invalid signature length.
    InvalidSignatureLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Signature verification failed.
    VerificationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength { expected, actual } => {
                write!(f, "invalid key length: expected {expected}, got {actual}")
            }
            Error::InvalidSignatureLength { expected, actual } => {
                write!(
                    f,
                    "invalid signature length: expected {expected}, got {actual}"
                )
            }
            Error::VerificationFailed => write!(f, "signature verification failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

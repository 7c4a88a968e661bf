//! Custom error types for the abif-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum AbifError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The input cannot be used as a byte source (e.g., a path naming a directory).
    #[error("Unsupported input type: {0}")]
    UnsupportedInputType(String),

    /// The first four bytes are not the `ABIF` signature.
    #[error("File not recognized as ABIF: found signature {found:?}")]
    UnrecognizedFormat { found: String },

    /// The major version (`version / 100`) is greater than 1.
    #[error("Unsupported ABIF version: {0}. Only major version 1 and below are supported.")]
    UnsupportedVersion(u16),

    /// A declared offset or count points past the end of the source.
    #[error("Truncated input: needed {length} bytes at offset {offset}, but only {available} available")]
    TruncatedInput {
        offset: u64,
        length: u64,
        available: u64,
    },

    /// The file is structurally invalid (e.g., negative counts or offsets).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

/// A convenience `Result` type alias using the crate's `AbifError` type.
pub type Result<T> = std::result::Result<T, AbifError>;

//! Error types for ensvalid.
//!
//! Only environment-class failures live here: unreadable inputs, wrong
//! extensions, parquet decode problems, unwritable report destinations.
//! Per-record validation problems are data, accumulated by the drivers in
//! [`crate::validate`], and never surface through this type.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for ensvalid operations.
pub type Result<T> = std::result::Result<T, EnsvalidError>;

/// Fatal errors that abort a validate operation.
#[derive(Debug, Error)]
pub enum EnsvalidError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file does not carry the extension expected for its type.
    #[error("Expected a file with {expected} extension: {path}")]
    UnexpectedExtension {
        /// The offending path
        path: PathBuf,
        /// Human-readable description of the accepted extensions
        expected: &'static str,
    },

    /// Error from the parquet reader while materializing a TSS table.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// A parquet column held a value the TSS table schema cannot take.
    #[error("Unexpected value in parquet column '{column}': {reason}")]
    TableDecode {
        /// Column name
        column: String,
        /// What was found instead
        reason: String,
    },
}

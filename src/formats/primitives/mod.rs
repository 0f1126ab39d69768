//! Shared primitives for the tab-delimited annotation formats.
//!
//! This module provides the reusable infrastructure every validated format
//! builds on:
//! - Field splitting and parsing utilities
//! - Genomic types (coordinate ranges, strands, seqid rules)
//! - The GFF3 attribute sub-format parser
//! - Error types shared across formats
//!
//! # Example: Using Genomic Types
//!
//! ```
//! use ensvalid::formats::primitives::{GenomicRange, Strand};
//! use std::str::FromStr;
//!
//! // Construct a 1-based inclusive range from raw column text
//! let range = GenomicRange::parse("100", "200")?;
//! assert_eq!(range.length(), 101);
//!
//! // Parse strand
//! let strand = Strand::from_str("+")?;
//! assert_eq!(strand, Strand::Forward);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;

use thiserror::Error;

pub mod attributes;
pub mod fields;
pub mod genomic;

// Re-exports
pub use attributes::{AttributeError, AttributeMap};
pub use fields::{parse_optional, parse_required, split_fields};
pub use genomic::{validate_seqid, BedRange, GenomicRange, RangeError, SeqidError, Strand, TssRange};

/// Errors that can occur when parsing a single field of a record.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Record does not split into the expected number of tab-delimited columns.
    #[error("Incorrect number of columns. Expected {expected}, got {actual}.")]
    FieldCount {
        /// Expected number of columns
        expected: usize,
        /// Actual number of columns found
        actual: usize,
    },

    /// Invalid field value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid strand specification.
    #[error("Invalid strand: {0} (expected '+', '-', '.', or '?')")]
    InvalidStrand(String),
}

/// Result type for format operations.
pub type Result<T> = std::result::Result<T, FormatError>;

/// All constraints violated by a single record, aggregated.
///
/// A rejected record carries every violated-field message, not just the
/// first one, so a single line with a bad seqid and an inverted range
/// produces one failure mentioning both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationFailure {
    /// Violated-field messages, in field order.
    pub problems: Vec<String>,
}

impl ValidationFailure {
    /// Creates an empty failure to accumulate into.
    pub fn new() -> Self {
        ValidationFailure::default()
    }

    /// Records one violated constraint.
    pub fn push(&mut self, message: impl Into<String>) {
        self.problems.push(message.into());
    }

    /// True when no constraint has been violated.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Resolves the accumulation: the built value when clean, `self` otherwise.
    pub fn finish<T>(self, value: impl FnOnce() -> T) -> std::result::Result<T, ValidationFailure> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.problems.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_message() {
        let err = FormatError::FieldCount {
            expected: 9,
            actual: 8,
        };
        assert_eq!(
            err.to_string(),
            "Incorrect number of columns. Expected 9, got 8."
        );
    }

    #[test]
    fn test_validation_failure_aggregates() {
        let mut failure = ValidationFailure::new();
        failure.push("seqid is bad");
        failure.push("range is inverted");

        assert_eq!(failure.to_string(), "seqid is bad; range is inverted");
    }

    #[test]
    fn test_validation_failure_finish() {
        let clean = ValidationFailure::new();
        assert_eq!(clean.finish(|| 42), Ok(42));

        let mut dirty = ValidationFailure::new();
        dirty.push("broken");
        assert!(dirty.finish(|| 42).is_err());
    }
}

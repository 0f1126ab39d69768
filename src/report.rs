//! Accumulated diagnostics and the error report writer.
//!
//! Validation errors are data: each one carries its location (a 1-based
//! line/row number, or the whole table) and a message. A pass accumulates
//! them in order and, when any exist, persists them to a timestamped report
//! file, one diagnostic per line.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Result;

/// One accumulated diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A diagnostic tied to a 1-based line (or row) number.
    Row {
        /// 1-based line number in the input file (or row index in a table)
        line: usize,
        /// Aggregated message for that record
        message: String,
    },
    /// A table-level diagnostic not tied to any row.
    Table {
        /// Aggregated message for the structural violation
        message: String,
    },
}

impl ValidationError {
    /// Creates a line-tagged diagnostic.
    pub fn row(line: usize, message: impl Into<String>) -> Self {
        ValidationError::Row {
            line,
            message: message.into(),
        }
    }

    /// Creates a table-level diagnostic.
    pub fn table(message: impl Into<String>) -> Self {
        ValidationError::Table {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Row { line, message } => write!(f, "Line {line}: {message}"),
            ValidationError::Table { message } => write!(f, "Column-related error: {message}"),
        }
    }
}

/// Writes accumulated errors to a timestamped report file in `out_dir`.
///
/// The file is named `validation_errors_{YYYYMMDD-HHMMSS}.txt` and holds one
/// diagnostic per line, in accumulation order. Callers must not invoke this
/// with an empty sequence; a clean pass writes no report at all.
///
/// # Errors
///
/// Write failures (unwritable directory, disk full) are fatal to the
/// validate operation and propagate unchanged.
pub fn write_error_report(errors: &[ValidationError], out_dir: &Path) -> Result<PathBuf> {
    let time_info = Local::now().format("%Y%m%d-%H%M%S");
    let report_path = out_dir.join(format!("validation_errors_{time_info}.txt"));

    let body = errors
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&report_path, body)?;

    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_display() {
        let err = ValidationError::row(7, "Incorrect number of columns. Expected 9, got 8.");
        assert_eq!(
            err.to_string(),
            "Line 7: Incorrect number of columns. Expected 9, got 8."
        );
    }

    #[test]
    fn test_table_display() {
        let err = ValidationError::table("Columns have unequal lengths.");
        assert_eq!(
            err.to_string(),
            "Column-related error: Columns have unequal lengths."
        );
    }

    #[test]
    fn test_write_error_report() {
        let dir = tempfile::tempdir().unwrap();
        let errors = vec![
            ValidationError::row(2, "first problem"),
            ValidationError::row(7, "second problem"),
        ];

        let path = write_error_report(&errors, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("validation_errors_"));
        assert!(name.ends_with(".txt"));

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Line 2: first problem\nLine 7: second problem");
    }

    #[test]
    fn test_write_error_report_unwritable_dir_is_fatal() {
        let errors = vec![ValidationError::row(1, "problem")];
        let result = write_error_report(&errors, Path::new("/nonexistent/ensvalid-out"));
        assert!(result.is_err());
    }
}

//! Field-level parsing utilities for tab-delimited records.

use std::str::FromStr;

use crate::formats::primitives::{FormatError, Result};

/// Splits a line on tab characters, optionally enforcing a column count.
///
/// # Errors
///
/// [`FormatError::FieldCount`] when `expected` is given and the line does
/// not split into exactly that many columns.
///
/// # Examples
///
/// ```
/// use ensvalid::formats::primitives::split_fields;
///
/// let fields = split_fields("1\tensembl\tgene", Some(3))?;
/// assert_eq!(fields, vec!["1", "ensembl", "gene"]);
///
/// assert!(split_fields("1\tensembl", Some(3)).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn split_fields(line: &str, expected: Option<usize>) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if let Some(expected) = expected {
        if fields.len() != expected {
            return Err(FormatError::FieldCount {
                expected,
                actual: fields.len(),
            });
        }
    }
    Ok(fields)
}

/// Parses a required field value.
///
/// # Errors
///
/// [`FormatError::InvalidField`] when the value does not parse as `T`.
pub fn parse_required<T>(value: &str, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| FormatError::InvalidField {
        field: field.to_string(),
        reason: e.to_string(),
    })
}

/// Parses an optional field value, treating the `.` sentinel as absent.
///
/// # Examples
///
/// ```
/// use ensvalid::formats::primitives::parse_optional;
///
/// let score: Option<f64> = parse_optional(".", "score")?;
/// assert_eq!(score, None);
///
/// let score: Option<f64> = parse_optional("0.9", "score")?;
/// assert_eq!(score, Some(0.9));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_optional<T>(value: &str, field: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value == "." {
        return Ok(None);
    }
    parse_required(value, field).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields_exact_count() {
        let fields = split_fields("a\tb\tc", Some(3)).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_fields_wrong_count() {
        let err = split_fields("a\tb", Some(3)).unwrap_err();
        assert!(matches!(
            err,
            FormatError::FieldCount {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_split_fields_unchecked() {
        let fields = split_fields("a\tb\tc\td", None).unwrap();
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_parse_required() {
        let value: u64 = parse_required("42", "start").unwrap();
        assert_eq!(value, 42);

        let err = parse_required::<u64>("x", "start").unwrap_err();
        assert!(err.to_string().contains("start"));
    }

    #[test]
    fn test_parse_optional_dot_sentinel() {
        assert_eq!(parse_optional::<f64>(".", "score").unwrap(), None);
        assert_eq!(parse_optional::<f64>("1.5", "score").unwrap(), Some(1.5));
        assert!(parse_optional::<f64>("abc", "score").is_err());
    }
}

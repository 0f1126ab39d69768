//! BED-format row shapes: TSS intervals and CDS-counts rows.
//!
//! Both shapes use 6 tab-delimited columns:
//! `seqid, start, end, name, score, strand`.
//!
//! The TSS shape is strict: single-base 0-based interval, an
//! `ENSG…(+)`/`ENSG…(-)` name, the literal `*` score, and a two-valued
//! strand. The CDS-counts shape only requires integer coordinates.
//!
//! # Examples
//!
//! ```
//! use ensvalid::formats::bed::TssBedRecord;
//!
//! let columns = ["1", "11868", "11869", "ENSG00000223972(+)", "*", "+"];
//! let record = TssBedRecord::from_columns(&columns)?;
//! assert_eq!(record.location.start, 11868);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::formats::primitives::{
    validate_seqid, FormatError, Strand, TssRange, ValidationFailure,
};

/// Number of columns in the BED shapes validated here.
pub const BED_COLUMNS: usize = 6;

lazy_static! {
    static ref TSS_NAME_RE: Regex = Regex::new(r"^ENSG\d{11}\([+-]\)$").unwrap();
}

/// A validated transcription-start-site BED row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TssBedRecord {
    /// Chromosome/contig name; same seqid rules as GFF3 rows.
    pub seqid: String,
    /// Single-base 0-based half-open interval.
    pub location: TssRange,
    /// Feature name, `ENSG` + 11 digits + parenthesized strand.
    pub name: String,
    /// Strand; only `+` and `-` are valid in this shape.
    pub strand: Strand,
}

impl TssBedRecord {
    /// Builds a TSS row from the 6 raw columns of a data line.
    ///
    /// Every violated constraint is collected into one
    /// [`ValidationFailure`].
    pub fn from_columns(columns: &[&str]) -> Result<Self, ValidationFailure> {
        check_column_count(columns)?;

        let mut failure = ValidationFailure::new();

        let seqid = match validate_seqid(columns[0]) {
            Ok(value) => Some(value.to_string()),
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };

        let location = match TssRange::parse(columns[1], columns[2]) {
            Ok(range) => Some(range),
            Err(e) => {
                failure.push(e.to_string());
                None
            }
        };

        let name = columns[3];
        if !TSS_NAME_RE.is_match(name) {
            failure.push(format!(
                "Name value ('{name}') does not match the expected 'ENSG<11 digits>(+|-)' pattern."
            ));
        }

        if columns[4] != "*" {
            failure.push(format!(
                "Score value ('{}') is expected to be the literal '*'.",
                columns[4]
            ));
        }

        let strand = match columns[5] {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            other => {
                failure.push(format!("Strand value ('{other}') is expected to be '+' or '-'."));
                None
            }
        };

        failure.finish(|| TssBedRecord {
            seqid: seqid.unwrap(),
            location: location.unwrap(),
            name: name.to_string(),
            strand: strand.unwrap(),
        })
    }
}

/// A loosely-typed CDS-counts BED row.
///
/// Only the coordinate columns carry a type constraint; the remaining
/// columns are kept as raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdsCountsRecord {
    /// Chromosome/contig name.
    pub seqid: String,
    /// Start position.
    pub start: i64,
    /// End position.
    pub end: i64,
    /// Feature name.
    pub name: String,
    /// Score column, unconstrained.
    pub score: String,
    /// Strand column, unconstrained.
    pub strand: String,
}

impl CdsCountsRecord {
    /// Builds a CDS-counts row from the 6 raw columns of a data line.
    pub fn from_columns(columns: &[&str]) -> Result<Self, ValidationFailure> {
        check_column_count(columns)?;

        let mut failure = ValidationFailure::new();

        let start = parse_int(columns[1], "start", &mut failure);
        let end = parse_int(columns[2], "end", &mut failure);

        failure.finish(|| CdsCountsRecord {
            seqid: columns[0].to_string(),
            start: start.unwrap(),
            end: end.unwrap(),
            name: columns[3].to_string(),
            score: columns[4].to_string(),
            strand: columns[5].to_string(),
        })
    }
}

fn check_column_count(columns: &[&str]) -> Result<(), ValidationFailure> {
    let mut failure = ValidationFailure::new();
    if columns.len() != BED_COLUMNS {
        failure.push(
            FormatError::FieldCount {
                expected: BED_COLUMNS,
                actual: columns.len(),
            }
            .to_string(),
        );
    }
    failure.finish(|| ())
}

fn parse_int(value: &str, field: &str, failure: &mut ValidationFailure) -> Option<i64> {
    match i64::from_str(value) {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            failure.push(format!("Coordinate '{value}' in column '{field}' is not an integer."));
            None
        }
    }
}

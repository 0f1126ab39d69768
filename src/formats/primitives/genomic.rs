//! Genomic coordinate types and per-field rules shared by all row shapes.
//!
//! Three range flavors exist, differing only in their bounds and ordering
//! invariants:
//! - [`GenomicRange`]: GFF3-style, 1-based inclusive, `start <= end`
//! - [`BedRange`]: BED-style, 0-based half-open, `start < end`
//! - [`TssRange`]: a [`BedRange`] that must span exactly one base
//!
//! All three construct from the raw text tokens of the two coordinate
//! columns, so numeric conversion failures surface as [`RangeError`] values
//! rather than panics.
//!
//! # Examples
//!
//! ```
//! use ensvalid::formats::primitives::{GenomicRange, TssRange, RangeError};
//!
//! let range = GenomicRange::parse("100", "200")?;
//! assert_eq!(range.start, 100);
//! assert_eq!(range.end, 200);
//!
//! // TSS features are single-base
//! assert!(TssRange::parse("1000", "1001").is_ok());
//! assert!(matches!(
//!     TssRange::parse("1000", "1005"),
//!     Err(RangeError::WrongSpan { .. })
//! ));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::formats::primitives::FormatError;

/// Errors produced while constructing a coordinate range from raw text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RangeError {
    /// Coordinate token does not convert to an integer.
    #[error("Coordinate '{value}' is not a number.")]
    NotANumber {
        /// The offending raw token
        value: String,
    },

    /// Coordinate is below the minimum bound for this range kind.
    #[error("Coordinate {value} is below the minimum of {min}.")]
    BelowMinimum {
        /// The parsed coordinate
        value: i64,
        /// The minimum bound for this range kind
        min: i64,
    },

    /// GFF3-style ordering violation (`start > end`).
    #[error("Start coordinate ({start}) is greater than end coordinate ({end}).")]
    Inverted {
        /// Start coordinate
        start: u64,
        /// End coordinate
        end: u64,
    },

    /// BED-style ordering violation (`start >= end`, the interval is empty).
    #[error("Start coordinate ({start}) is greater or equal than end coordinate ({end}).")]
    Empty {
        /// Start coordinate
        start: u64,
        /// End coordinate
        end: u64,
    },

    /// TSS features must span exactly one base.
    #[error("TSSs should be a one base feature: end ({end}) - start ({start}) != 1.")]
    WrongSpan {
        /// Start coordinate
        start: u64,
        /// End coordinate
        end: u64,
    },
}

fn parse_coordinate(value: &str, min: i64) -> Result<u64, RangeError> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| RangeError::NotANumber {
            value: value.to_string(),
        })?;
    if parsed < min {
        return Err(RangeError::BelowMinimum { value: parsed, min });
    }
    Ok(parsed as u64)
}

/// A GFF3-style coordinate range: 1-based, inclusive on both ends.
///
/// # Invariants
///
/// - `start >= 1`, `end >= 1`
/// - `start <= end`
///
/// # Examples
///
/// ```
/// use ensvalid::formats::primitives::GenomicRange;
///
/// let range = GenomicRange::parse("100", "250")?;
/// assert_eq!(range.length(), 151);
///
/// // Inverted ranges are rejected
/// assert!(GenomicRange::parse("250", "100").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenomicRange {
    /// Start position (1-based, inclusive).
    pub start: u64,
    /// End position (1-based, inclusive).
    pub end: u64,
}

impl GenomicRange {
    /// Constructs a range from the raw text of the start/end columns.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotANumber`] for non-numeric input,
    /// [`RangeError::BelowMinimum`] for coordinates below 1,
    /// [`RangeError::Inverted`] when `start > end`.
    pub fn parse(start_text: &str, end_text: &str) -> Result<Self, RangeError> {
        let start = parse_coordinate(start_text, 1)?;
        let end = parse_coordinate(end_text, 1)?;
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(GenomicRange { start, end })
    }

    /// Length of the range in bases (inclusive coordinates).
    #[inline]
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }
}

impl fmt::Display for GenomicRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A BED-style coordinate range: 0-based, half-open `[start, end)`.
///
/// # Invariants
///
/// - `start >= 0`, `end >= 1`
/// - `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BedRange {
    /// Start position (0-based, inclusive).
    pub start: u64,
    /// End position (0-based, exclusive).
    pub end: u64,
}

impl BedRange {
    /// Constructs a range from the raw text of the start/end columns.
    ///
    /// # Errors
    ///
    /// [`RangeError::NotANumber`] for non-numeric input,
    /// [`RangeError::BelowMinimum`] for a negative start or an end below 1,
    /// [`RangeError::Empty`] when `start >= end`.
    pub fn parse(start_text: &str, end_text: &str) -> Result<Self, RangeError> {
        let start = parse_coordinate(start_text, 0)?;
        let end = parse_coordinate(end_text, 1)?;
        if start >= end {
            return Err(RangeError::Empty { start, end });
        }
        Ok(BedRange { start, end })
    }

    /// Length of the interval in bases.
    #[inline]
    pub fn length(&self) -> u64 {
        self.end - self.start
    }
}

impl fmt::Display for BedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A transcription start site interval: a [`BedRange`] spanning exactly one base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TssRange {
    /// Start position (0-based, inclusive).
    pub start: u64,
    /// End position (0-based, exclusive); always `start + 1`.
    pub end: u64,
}

impl TssRange {
    /// Constructs a single-base range from the raw text of the start/end columns.
    ///
    /// # Errors
    ///
    /// Everything [`BedRange::parse`] rejects, plus
    /// [`RangeError::WrongSpan`] when `end - start != 1`.
    pub fn parse(start_text: &str, end_text: &str) -> Result<Self, RangeError> {
        let range = BedRange::parse(start_text, end_text)?;
        if range.end - range.start != 1 {
            return Err(RangeError::WrongSpan {
                start: range.start,
                end: range.end,
            });
        }
        Ok(TssRange {
            start: range.start,
            end: range.end,
        })
    }
}

impl fmt::Display for TssRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// DNA strand orientation as it appears in GFF3 column 7.
///
/// # Examples
///
/// ```
/// use ensvalid::formats::primitives::Strand;
/// use std::str::FromStr;
///
/// assert_eq!(Strand::from_str("+")?, Strand::Forward);
/// assert_eq!(Strand::from_str("-")?, Strand::Reverse);
/// assert_eq!(Strand::from_str(".")?, Strand::Unstranded);
/// assert_eq!(Strand::from_str("?")?, Strand::Unknown);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Plus strand (+)
    Forward,
    /// Minus strand (-)
    Reverse,
    /// Feature is not stranded (.)
    Unstranded,
    /// Strandedness is relevant but unknown (?)
    Unknown,
}

impl FromStr for Strand {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, FormatError> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unstranded),
            "?" => Ok(Strand::Unknown),
            _ => Err(FormatError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unstranded => write!(f, "."),
            Strand::Unknown => write!(f, "?"),
        }
    }
}

/// Errors produced by [`validate_seqid`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SeqidError {
    /// Seqid contains characters outside the restricted class.
    #[error("Seqid value ('{0}') contains characters outside the allowed set.")]
    InvalidCharacters(String),

    /// Ensembl-sourced files use bare chromosome names, never `chr`-prefixed.
    #[error("Seqid value ('{0}') from an Ensembl-generated file is not expected to start with 'chr'.")]
    ChrPrefix(String),
}

lazy_static! {
    static ref SEQID_RE: Regex = Regex::new(r"^[a-zA-Z0-9.:^*$@!+_?|-]+$").unwrap();
}

/// Validates a seqid (column 1) value, returning it unchanged on success.
///
/// Two rules apply to every row shape:
/// - The value matches the restricted seqid character class.
/// - The value does not begin with `chr` (case-insensitive); Ensembl files
///   use bare chromosome names like `1` or `X`.
///
/// # Examples
///
/// ```
/// use ensvalid::formats::primitives::validate_seqid;
///
/// assert_eq!(validate_seqid("21")?, "21");
/// assert!(validate_seqid("chr21").is_err());
/// assert!(validate_seqid("CHR21").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn validate_seqid(value: &str) -> Result<&str, SeqidError> {
    if !SEQID_RE.is_match(value) {
        return Err(SeqidError::InvalidCharacters(value.to_string()));
    }
    if value.len() >= 3 && value[..3].eq_ignore_ascii_case("chr") {
        return Err(SeqidError::ChrPrefix(value.to_string()));
    }
    Ok(value)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn genomic_range_succeeds_iff_ordered(a in 1u64..1_000_000, b in 1u64..1_000_000) {
            let result = GenomicRange::parse(&a.to_string(), &b.to_string());
            if a <= b {
                let range = result.unwrap();
                prop_assert_eq!(range.start, a);
                prop_assert_eq!(range.end, b);
            } else {
                prop_assert_eq!(result.unwrap_err(), RangeError::Inverted { start: a, end: b });
            }
        }

        #[test]
        fn tss_range_succeeds_iff_single_base(a in 0u64..1_000_000, b in 1u64..1_000_000) {
            let result = TssRange::parse(&a.to_string(), &b.to_string());
            prop_assert_eq!(result.is_ok(), b.wrapping_sub(a) == 1 && a < b);
        }

        #[test]
        fn bed_range_length_positive(a in 0u64..100_000, b in 0u64..100_000) {
            if let Ok(range) = BedRange::parse(&a.to_string(), &b.to_string()) {
                prop_assert!(range.length() >= 1);
            }
        }
    }
}

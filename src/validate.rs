//! File validation drivers.
//!
//! Each driver streams the records of one input, applies classification and
//! typed-row construction per record, and accumulates diagnostics instead of
//! aborting: a full pass always runs to completion so the report covers
//! *every* bad row, not just the first. Only environment-class errors
//! (unreadable input, unwritable output directory) abort a pass.
//!
//! # Examples
//!
//! ```
//! use ensvalid::validate::validate_gff3_lines;
//!
//! let input = "##gff-version 3\n\
//!              chr1\tens\texon\t100\t200\t.\t+\t.\tx=y\n\
//!              1\tens\texon\t100\t200\t.\t+\t.\tx=y\n";
//! let outcome = validate_gff3_lines(input.as_bytes())?;
//!
//! // Line 2 is rejected (chr prefix), line 3 is clean
//! assert_eq!(outcome.errors.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::error::Result;
use crate::formats::bed::{CdsCountsRecord, TssBedRecord, BED_COLUMNS};
use crate::formats::gff3::{GffRecord, TranscriptTag, GFF3_COLUMNS};
use crate::formats::primitives::{split_fields, ValidationFailure};
use crate::formats::TssTable;
use crate::io::{check_extension, open_text, read_tss_table, FileKind};
use crate::report::{write_error_report, ValidationError};

/// Outcome of a GFF3 validation pass.
///
/// Validated rows are discarded; the only things that survive the pass are
/// the accumulated diagnostics and the set of transcript tags observed on
/// valid gencode-basic transcript rows.
#[derive(Debug, Default)]
pub struct GffOutcome {
    /// Accumulated diagnostics, in ascending line order.
    pub errors: Vec<ValidationError>,
    /// Distinct transcript tags seen on valid transcript rows.
    pub observed_tags: BTreeSet<TranscriptTag>,
}

fn record_columns<'a>(
    line: &'a str,
    line_number: usize,
    expected: usize,
    errors: &mut Vec<ValidationError>,
) -> Option<Vec<&'a str>> {
    match split_fields(line, Some(expected)) {
        Ok(columns) => Some(columns),
        Err(e) => {
            // Structural error: record the mismatch, skip the record whole.
            errors.push(ValidationError::row(line_number, e.to_string()));
            None
        }
    }
}

/// Validates Ensembl genome GFF3 records from a line stream.
///
/// Lines are numbered from 1 counting every physical line; lines starting
/// with `#` are skipped. A record with the wrong column count yields a
/// column-count diagnostic and is not partially validated.
///
/// # Errors
///
/// Only I/O failures from the underlying reader.
pub fn validate_gff3_lines<R: BufRead>(reader: R) -> Result<GffOutcome> {
    let mut outcome = GffOutcome::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let line = line.trim_end();
        if line.starts_with('#') {
            continue;
        }

        let Some(columns) = record_columns(line, line_number, GFF3_COLUMNS, &mut outcome.errors)
        else {
            continue;
        };

        match GffRecord::from_columns(&columns) {
            Ok(GffRecord::Transcript(row)) => {
                outcome.observed_tags.extend(row.attributes.tags.iter().copied());
            }
            Ok(_) => {}
            Err(failure) => {
                outcome
                    .errors
                    .push(ValidationError::row(line_number, failure.to_string()));
            }
        }
    }

    Ok(outcome)
}

fn validate_bed_lines<R, F>(reader: R, mut build: F) -> Result<Vec<ValidationError>>
where
    R: BufRead,
    F: FnMut(&[&str]) -> std::result::Result<(), ValidationFailure>,
{
    let mut errors = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let line = line.trim_end();
        if line.starts_with('#') {
            continue;
        }

        let Some(columns) = record_columns(line, line_number, BED_COLUMNS, &mut errors) else {
            continue;
        };

        if let Err(failure) = build(&columns) {
            errors.push(ValidationError::row(line_number, failure.to_string()));
        }
    }

    Ok(errors)
}

/// Validates TSS BED records from a line stream.
pub fn validate_tss_bed_lines<R: BufRead>(reader: R) -> Result<Vec<ValidationError>> {
    validate_bed_lines(reader, |columns| {
        TssBedRecord::from_columns(columns).map(|_| ())
    })
}

/// Validates CDS-counts BED records from a line stream.
pub fn validate_cds_counts_lines<R: BufRead>(reader: R) -> Result<Vec<ValidationError>> {
    validate_bed_lines(reader, |columns| {
        CdsCountsRecord::from_columns(columns).map(|_| ())
    })
}

/// Validates a materialized columnar TSS table.
///
/// Runs the per-row pass over every complete row, then the whole-table
/// structural pass; structural violations land as one table-level error
/// after the row diagnostics.
pub fn validate_tss_table(table: &TssTable) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for index in 0..table.row_count() {
        if let Err(failure) = table.validate_row(index) {
            // Rows are reported 1-based, like file lines.
            errors.push(ValidationError::row(index + 1, failure.to_string()));
        }
    }

    if let Err(failure) = table.validate_columns() {
        errors.push(ValidationError::table(failure.to_string()));
    }

    errors
}

fn finish(errors: Vec<ValidationError>, out_dir: &Path) -> Result<Option<PathBuf>> {
    if errors.is_empty() {
        info!("No validation errors found.");
        return Ok(None);
    }

    let report_path = write_error_report(&errors, out_dir)?;
    error!("Found {} validation errors.", errors.len());
    error!("Validation errors written to {}", report_path.display());
    Ok(Some(report_path))
}

/// Validates an Ensembl genome GFF3 file and writes a report on failure.
///
/// Returns the report path when diagnostics were found, `None` for a clean
/// file.
pub fn validate_gff3_path(path: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    check_extension(path, FileKind::Gff3)?;
    let outcome = validate_gff3_lines(open_text(path)?)?;
    if !outcome.observed_tags.is_empty() {
        info!(
            "Observed transcript tags: {:?}",
            outcome.observed_tags
        );
    }
    finish(outcome.errors, out_dir)
}

/// Validates a TSS BED file and writes a report on failure.
pub fn validate_tss_bed_path(path: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    check_extension(path, FileKind::Bed)?;
    let errors = validate_tss_bed_lines(open_text(path)?)?;
    finish(errors, out_dir)
}

/// Validates a CDS-counts BED file and writes a report on failure.
pub fn validate_cds_counts_path(path: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    check_extension(path, FileKind::Bed)?;
    let errors = validate_cds_counts_lines(open_text(path)?)?;
    finish(errors, out_dir)
}

/// Validates a columnar TSS table file and writes a report on failure.
pub fn validate_tss_table_path(path: &Path, out_dir: &Path) -> Result<Option<PathBuf>> {
    check_extension(path, FileKind::Parquet)?;
    let table = read_tss_table(path)?;
    let errors = validate_tss_table(&table);
    finish(errors, out_dir)
}

//! The columnar TSS table shape.
//!
//! A TSS table holds the same logical fields as a TSS row, but as parallel
//! equal-length columns (as materialized from a parquet file by the I/O
//! collaborator): `referenceName`, `tssStart`, `tssEnd`, `geneId`, `strand`.
//!
//! Validation runs in two passes:
//! - **Per row**: each row index is reconstructed and checked like a record
//!   (positive coordinates, `start <= end`, known strand).
//! - **Whole table**: column lengths must agree and each column must conform
//!   as a sequence; violations become one table-level error not tied to a
//!   row index.

use std::str::FromStr;

use strum::{Display, EnumString};

use crate::formats::primitives::ValidationFailure;

/// Strand vocabulary used by the columnar TSS tables.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
pub enum TableStrand {
    FORWARD,
    REVERSE,
}

/// A materialized columnar TSS table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TssTable {
    /// `referenceName` column: chromosome/contig names.
    pub reference_name: Vec<String>,
    /// `tssStart` column: 1-based start positions.
    pub tss_start: Vec<i64>,
    /// `tssEnd` column: 1-based end positions.
    pub tss_end: Vec<i64>,
    /// `geneId` column: stable gene identifiers.
    pub gene_id: Vec<String>,
    /// `strand` column: `FORWARD` or `REVERSE`.
    pub strand: Vec<String>,
}

impl TssTable {
    /// Number of complete rows, the shortest column length.
    ///
    /// Unequal column lengths are a table-level violation reported by
    /// [`TssTable::validate_columns`]; row-wise validation still covers the
    /// rows every column has.
    pub fn row_count(&self) -> usize {
        self.reference_name
            .len()
            .min(self.tss_start.len())
            .min(self.tss_end.len())
            .min(self.gene_id.len())
            .min(self.strand.len())
    }

    /// Validates one reconstructed row; `index` is 0-based.
    pub fn validate_row(&self, index: usize) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();

        let start = self.tss_start[index];
        let end = self.tss_end[index];
        if start < 1 {
            failure.push(format!("tssStart ({start}) must be a positive integer."));
        }
        if end < 1 {
            failure.push(format!("tssEnd ({end}) must be a positive integer."));
        }
        if start >= 1 && end >= 1 && start > end {
            failure.push(format!(
                "Start coordinate ({start}) is greater than end coordinate ({end})."
            ));
        }

        let strand = &self.strand[index];
        if TableStrand::from_str(strand).is_err() {
            failure.push(format!(
                "Strand value ('{strand}') is expected to be 'FORWARD' or 'REVERSE'."
            ));
        }

        failure.finish(|| ())
    }

    /// Validates the table structurally, as columns.
    ///
    /// Checks that all five columns have equal lengths and that each column
    /// conforms as a whole sequence. All violations aggregate into a single
    /// failure.
    pub fn validate_columns(&self) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();

        let lengths = [
            self.reference_name.len(),
            self.tss_start.len(),
            self.tss_end.len(),
            self.gene_id.len(),
            self.strand.len(),
        ];
        if lengths.iter().any(|&len| len != lengths[0]) {
            failure.push(format!(
                "Columns have unequal lengths: referenceName={}, tssStart={}, tssEnd={}, geneId={}, strand={}.",
                lengths[0], lengths[1], lengths[2], lengths[3], lengths[4]
            ));
        }

        let bad_starts = self.tss_start.iter().filter(|&&v| v < 1).count();
        if bad_starts > 0 {
            failure.push(format!(
                "tssStart column contains {bad_starts} non-positive value(s)."
            ));
        }
        let bad_ends = self.tss_end.iter().filter(|&&v| v < 1).count();
        if bad_ends > 0 {
            failure.push(format!(
                "tssEnd column contains {bad_ends} non-positive value(s)."
            ));
        }

        let bad_strands = self
            .strand
            .iter()
            .filter(|v| TableStrand::from_str(v).is_err())
            .count();
        if bad_strands > 0 {
            failure.push(format!(
                "Strand column contains {bad_strands} value(s) outside {{FORWARD, REVERSE}}."
            ));
        }

        failure.finish(|| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_table() -> TssTable {
        TssTable {
            reference_name: vec!["1".into(), "21".into()],
            tss_start: vec![11869, 5011799],
            tss_end: vec![11869, 5011799],
            gene_id: vec!["ENSG00000223972".into(), "ENSG00000279493".into()],
            strand: vec!["FORWARD".into(), "REVERSE".into()],
        }
    }

    #[test]
    fn test_valid_table_passes_both_passes() {
        let table = valid_table();
        for index in 0..table.row_count() {
            assert!(table.validate_row(index).is_ok());
        }
        assert!(table.validate_columns().is_ok());
    }

    #[test]
    fn test_row_inverted_coordinates() {
        let mut table = valid_table();
        table.tss_start[1] = 6000000;
        let failure = table.validate_row(1).unwrap_err();
        assert!(failure.to_string().contains("greater than end coordinate"));
    }

    #[test]
    fn test_row_non_positive_start() {
        let mut table = valid_table();
        table.tss_start[0] = 0;
        let failure = table.validate_row(0).unwrap_err();
        assert!(failure.to_string().contains("positive integer"));
    }

    #[test]
    fn test_row_unknown_strand() {
        let mut table = valid_table();
        table.strand[0] = "+".into();
        let failure = table.validate_row(0).unwrap_err();
        assert!(failure.to_string().contains("FORWARD"));
    }

    #[test]
    fn test_columns_unequal_lengths() {
        let mut table = valid_table();
        table.gene_id.pop();
        let failure = table.validate_columns().unwrap_err();
        assert!(failure.to_string().contains("unequal lengths"));
    }

    #[test]
    fn test_columns_aggregate_multiple_violations() {
        let mut table = valid_table();
        table.tss_start[0] = -5;
        table.strand[1] = "reverse".into();
        let failure = table.validate_columns().unwrap_err();
        assert_eq!(failure.problems.len(), 2);
    }
}

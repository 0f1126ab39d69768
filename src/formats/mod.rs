//! Annotation file format shapes and their validation rules.
//!
//! Every format shares the same pattern: raw tab-delimited columns go in,
//! and either a typed, constraint-checked record or a
//! [`ValidationFailure`](primitives::ValidationFailure) carrying every
//! violated constraint for that record comes out. Nothing here touches the
//! filesystem; drivers in [`crate::validate`] own the per-file loops.
//!
//! # Module Organization
//!
//! - [`primitives`]: Shared infrastructure
//!   - Coordinate ranges, strands, seqid rules, field and attribute parsing
//! - Format-specific modules:
//!   - [`gff3`]: Ensembl genome GFF3 rows (gene / transcript / generic)
//!   - [`bed`]: TSS BED and CDS-counts BED rows
//!   - [`tss_table`]: the columnar TSS table shape

pub mod bed;
pub mod gff3;
pub mod primitives;
pub mod tss_table;

// Re-exports of the types drivers and callers touch most.
pub use bed::{CdsCountsRecord, TssBedRecord, BED_COLUMNS};
pub use gff3::{classify, Biotype, GffRecord, RowKind, TranscriptTag, GFF3_COLUMNS};
pub use primitives::{FormatError, ValidationFailure};
pub use tss_table::{TableStrand, TssTable};

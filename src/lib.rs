//! ensvalid: validation of Ensembl annotation artifacts
//!
//! # Overview
//!
//! ensvalid checks genomic annotation files (Ensembl genome GFF3s, BED-format
//! transcription-start-site (TSS) files, CDS-counts BEDs and columnar TSS
//! tables) against format and biological-consistency rules. Bad rows do not
//! abort the pass: every diagnostic is accumulated with its line number and,
//! when any exist, written to a timestamped report file.
//!
//! ## Key Behaviors
//!
//! - **Fail-soft validation**: one pass reports *all* row-level errors
//! - **Content-based row schemas**: GFF3 records are routed to a gene,
//!   transcript or generic schema by their raw attribute text
//! - **Aggregated diagnostics**: a rejected record carries every violated
//!   constraint, not just the first
//! - **Streaming**: one record in memory at a time, gzip decompressed
//!   transparently
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use ensvalid::validate::validate_gff3_path;
//!
//! # fn main() -> ensvalid::Result<()> {
//! // Validate a genome GFF3; a report path comes back when rows failed
//! let report = validate_gff3_path(
//!     Path::new("Homo_sapiens.GRCh38.113.gff3.gz"),
//!     Path::new("."),
//! )?;
//!
//! if let Some(report) = report {
//!     eprintln!("diagnostics written to {}", report.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`formats`]: Row shapes and their validation rules (GFF3, BED, TSS table)
//! - [`validate`]: Per-file drivers that accumulate diagnostics
//! - [`report`]: Diagnostic values and the report writer
//! - [`io`]: Input opening, extension checks, parquet materialization
//! - [`error`]: Fatal, environment-class errors

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod formats;
pub mod io;
pub mod report;
pub mod validate;

pub use error::{EnsvalidError, Result};
pub use report::ValidationError;

use std::path::PathBuf;

use clap::Parser;

/// Validate Ensembl annotation files.
///
/// Checks an annotation artifact against its format's rules and, when rows
/// fail, writes a timestamped diagnostic report into the output directory.
/// Row-level findings go to the report, not the exit code.
#[derive(Parser, Debug)]
#[command(name = "ensvalid")]
#[command(version)]
pub struct Args {
    /// Input file to validate
    pub file_path: PathBuf,

    /// Input file type
    #[arg(short = 't', long = "type", value_enum)]
    pub file_type: FileType,

    /// Directory the error report is written into
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// The supported annotation artifact types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FileType {
    /// Ensembl genome annotation GFF3 (.gff3, .gff3.gz)
    EnsemblGenomeGff3,
    /// Columnar TSS table (.parquet)
    TssParquet,
    /// TSS intervals in BED format (.bed)
    TssBed,
    /// CDS counts in BED format (.bed)
    CdsCountsBed,
}

//! Opening validation inputs: extension checks, transparent decompression,
//! and the parquet collaborator for columnar TSS tables.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;

use crate::error::{EnsvalidError, Result};
use crate::formats::TssTable;

/// Input file kinds, each with its accepted extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Ensembl genome GFF3, plain or gzip-compressed.
    Gff3,
    /// BED-format file (TSS or CDS-counts).
    Bed,
    /// Columnar TSS table.
    Parquet,
}

impl FileKind {
    fn accepts(self, name: &str) -> bool {
        match self {
            FileKind::Gff3 => name.ends_with(".gff3") || name.ends_with(".gff3.gz"),
            FileKind::Bed => name.ends_with(".bed"),
            FileKind::Parquet => name.ends_with(".parquet"),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FileKind::Gff3 => ".gff3 or .gff3.gz",
            FileKind::Bed => ".bed",
            FileKind::Parquet => ".parquet",
        }
    }
}

/// Checks that `path` carries an extension accepted for `kind`.
///
/// # Errors
///
/// [`EnsvalidError::UnexpectedExtension`] on mismatch; fatal to the
/// validate operation.
pub fn check_extension(path: &Path, kind: FileKind) -> Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if kind.accepts(&name) {
        Ok(())
    } else {
        Err(EnsvalidError::UnexpectedExtension {
            path: path.to_path_buf(),
            expected: kind.expected(),
        })
    }
}

/// Opens a text input, transparently decompressing `.gz` files.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Materializes the five named TSS columns from a parquet file.
///
/// Unknown columns are ignored. A known column holding an unexpected
/// physical type is fatal.
pub fn read_tss_table(path: &Path) -> Result<TssTable> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file)?;

    let mut table = TssTable::default();
    for row in reader.get_row_iter(None)? {
        let row = row?;
        for (name, field) in row.get_column_iter() {
            match (name.as_str(), field) {
                ("referenceName", Field::Str(value)) => {
                    table.reference_name.push(value.clone());
                }
                ("tssStart", field) => table.tss_start.push(integer_field("tssStart", field)?),
                ("tssEnd", field) => table.tss_end.push(integer_field("tssEnd", field)?),
                ("geneId", Field::Str(value)) => table.gene_id.push(value.clone()),
                ("strand", Field::Str(value)) => table.strand.push(value.clone()),
                ("referenceName" | "geneId" | "strand", other) => {
                    return Err(EnsvalidError::TableDecode {
                        column: name.clone(),
                        reason: format!("expected a string, got {other}"),
                    });
                }
                // Columns outside the TSS schema are not ours to judge.
                _ => {}
            }
        }
    }
    Ok(table)
}

fn integer_field(column: &str, field: &Field) -> Result<i64> {
    match field {
        Field::Int(value) => Ok(i64::from(*value)),
        Field::Long(value) => Ok(*value),
        Field::Short(value) => Ok(i64::from(*value)),
        other => Err(EnsvalidError::TableDecode {
            column: column.to_string(),
            reason: format!("expected an integer, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_check_extension() {
        assert!(check_extension(Path::new("x.gff3"), FileKind::Gff3).is_ok());
        assert!(check_extension(Path::new("x.gff3.gz"), FileKind::Gff3).is_ok());
        assert!(check_extension(Path::new("x.gff"), FileKind::Gff3).is_err());

        assert!(check_extension(Path::new("tss.bed"), FileKind::Bed).is_ok());
        assert!(check_extension(Path::new("tss.bed.gz"), FileKind::Bed).is_err());

        assert!(check_extension(Path::new("tss.parquet"), FileKind::Parquet).is_ok());
        assert!(check_extension(Path::new("tss.txt"), FileKind::Parquet).is_err());
    }

    #[test]
    fn test_open_text_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.bed");
        std::fs::write(&path, "1\t100\t101\n").unwrap();

        let mut reader = open_text(&path).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "1\t100\t101\n");
    }

    #[test]
    fn test_open_text_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.gff3.gz");

        let file = File::create(&path).unwrap();
        let mut encoder =
            flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"##gff-version 3\n1\tens\tgene\n").unwrap();
        encoder.finish().unwrap();

        let mut reader = open_text(&path).unwrap();
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        assert_eq!(line, "##gff-version 3\n");
    }
}

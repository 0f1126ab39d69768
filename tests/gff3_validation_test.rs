//! Integration tests for the Ensembl genome GFF3 validator.
//!
//! The fixture lines mirror real Ensembl GRCh38 annotation records
//! (gene / transcript / exon rows with Ensembl attribute vocabularies).

use std::fs;
use std::io::Write;

use ensvalid::validate::{validate_gff3_lines, validate_gff3_path};
use ensvalid::ValidationError;

const HEADER: &str = "##gff-version 3\n#!genome-build GRCh38.p14\n";

const GENE: &str = "13\tensembl_havana\tgene\t32315086\t32400268\t.\t+\t.\t\
    ID=gene:ENSG00000139618;Name=BRCA2;biotype=protein_coding;\
    description=BRCA2 DNA repair associated;gene_id=ENSG00000139618;\
    logic_name=ensembl_havana_gene_homo_sapiens;version=15";

const TRANSCRIPT: &str = "5\thavana\tlnc_RNA\t26583266\t26586475\t.\t-\t.\t\
    ID=transcript:ENST00000623180;Parent=gene:ENSG00000280279;Name=LINC02887-201;\
    biotype=lncRNA;tag=gencode_basic,Ensembl_canonical;\
    transcript_id=ENST00000623180;transcript_support_level=5;version=1";

const EXON: &str = "13\thavana\texon\t32315086\t32315668\t.\t+\t.\t\
    Parent=transcript:ENST00000380152;Name=ENSE00001184784;rank=1";

#[test]
fn clean_file_yields_no_errors() {
    let input = format!("{HEADER}{GENE}\n{TRANSCRIPT}\n{EXON}\n");
    let outcome = validate_gff3_lines(input.as_bytes()).expect("read failed");
    assert!(outcome.errors.is_empty(), "unexpected: {:?}", outcome.errors);
}

#[test]
fn errors_reference_physical_line_numbers() {
    // Header occupies lines 1-2; the bad record sits on line 4.
    let bad = GENE.replacen("13", "chr13", 1);
    let input = format!("{HEADER}{GENE}\n{bad}\n{EXON}\n");

    let outcome = validate_gff3_lines(input.as_bytes()).expect("read failed");
    assert_eq!(outcome.errors.len(), 1);
    assert!(matches!(outcome.errors[0], ValidationError::Row { line: 4, .. }));
}

#[test]
fn one_line_can_carry_multiple_failures() {
    let input = "chr1\tens\tgene\t100\t50\t.\t+\t.\t\
                 ID=gene:X;biotype=lncRNA;gene_id=X;logic_name=l;version=1\n";
    let outcome = validate_gff3_lines(input.as_bytes()).expect("read failed");

    assert_eq!(outcome.errors.len(), 1);
    let message = outcome.errors[0].to_string();
    assert!(message.contains("not expected to start with 'chr'"));
    assert!(message.contains("Start coordinate (100) is greater than end coordinate (50)"));
}

#[test]
fn column_count_mismatch_is_reported_not_validated() {
    // Range is inverted too, but the record never reaches range construction.
    let input = "1\tens\tgene\t100\t50\t.\t+\t.\n";
    let outcome = validate_gff3_lines(input.as_bytes()).expect("read failed");

    assert_eq!(outcome.errors.len(), 1);
    let message = outcome.errors[0].to_string();
    assert!(message.contains("Incorrect number of columns"));
    assert!(!message.contains("Start coordinate"));
}

#[test]
fn gzip_file_validates_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let gff_path = dir.path().join("annotation.gff3.gz");
    let out_dir = dir.path().join("reports");
    fs::create_dir(&out_dir).unwrap();

    let bad = GENE.replacen("13", "chr13", 1);
    let body = format!("{HEADER}{GENE}\n{bad}\n");
    let file = fs::File::create(&gff_path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder.write_all(body.as_bytes()).unwrap();
    encoder.finish().unwrap();

    let report = validate_gff3_path(&gff_path, &out_dir)
        .expect("validation pass failed")
        .expect("a report should have been written");

    let contents = fs::read_to_string(&report).unwrap();
    assert!(contents.starts_with("Line 4: "));
    assert!(contents.contains("'chr'"));
}

#[test]
fn clean_file_writes_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let gff_path = dir.path().join("annotation.gff3");
    fs::write(&gff_path, format!("{HEADER}{GENE}\n")).unwrap();

    let report = validate_gff3_path(&gff_path, dir.path()).expect("validation pass failed");
    assert!(report.is_none());

    let leftover: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("validation_errors_")
        })
        .collect();
    assert!(leftover.is_empty());
}

#[test]
fn wrong_extension_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotation.gtf");
    fs::write(&path, format!("{GENE}\n")).unwrap();

    assert!(validate_gff3_path(&path, dir.path()).is_err());
}

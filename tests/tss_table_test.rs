//! Integration tests for the columnar TSS table validator.

use ensvalid::formats::TssTable;
use ensvalid::validate::validate_tss_table;
use ensvalid::ValidationError;

fn table() -> TssTable {
    TssTable {
        reference_name: vec!["1".into(), "21".into(), "X".into()],
        tss_start: vec![11869, 5011799, 100635558],
        tss_end: vec![11869, 5011799, 100635558],
        gene_id: vec![
            "ENSG00000223972".into(),
            "ENSG00000279493".into(),
            "ENSG00000000003".into(),
        ],
        strand: vec!["FORWARD".into(), "REVERSE".into(), "REVERSE".into()],
    }
}

#[test]
fn clean_table_passes_both_passes() {
    assert!(validate_tss_table(&table()).is_empty());
}

#[test]
fn row_errors_carry_one_based_indices() {
    let mut table = table();
    table.tss_start[2] = 200000000; // beyond its end

    let errors = validate_tss_table(&table);
    // Inverted coordinates are a row-level problem only; both columns stay
    // positive, so the structural pass has nothing to add.
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::Row { line: 3, .. }));
    assert!(errors[0]
        .to_string()
        .contains("greater than end coordinate"));
}

#[test]
fn structural_violations_are_one_table_level_error() {
    let mut table = table();
    table.strand.pop();

    let errors = validate_tss_table(&table);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ValidationError::Table { .. }));
    assert!(errors[0].to_string().starts_with("Column-related error:"));
}

#[test]
fn row_and_table_errors_combine() {
    let mut table = table();
    table.tss_end[0] = -4;

    let errors = validate_tss_table(&table);
    // Row 1 fails, and the column pass independently flags tssEnd.
    assert_eq!(errors.len(), 2);
    assert!(matches!(errors[0], ValidationError::Row { line: 1, .. }));
    assert!(matches!(errors[1], ValidationError::Table { .. }));
}

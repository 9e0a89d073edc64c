use std::fs;

use crm_ingest::{
    IngestError, TEMPLATE_HEADERS, read_csv_file, read_csv_str, template_csv,
};
use crm_map::{generate_initial_mappings, validate_mapping_completeness};

#[test]
fn template_header_line_is_stable() {
    let csv = template_csv().expect("render template");
    let header = csv.lines().next().unwrap_or_default();
    insta::assert_snapshot!(header, @"Organizations,Priority-Focus,Segment,Distributor,Primary Account Manager,Secondary Account Manager,Address,City,State,Zip,Phone,Website,Contact,Contact Email,Contact Phone,Title,Notes");
}

#[test]
fn template_reads_back_with_all_rows() {
    let csv = template_csv().expect("render template");
    let table = read_csv_str(&csv).expect("parse template");
    assert_eq!(table.headers, TEMPLATE_HEADERS.to_vec());
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[2][16], "Quarterly review, \"key account\"");
}

#[test]
fn template_maps_to_a_valid_mapping_set() {
    let csv = template_csv().expect("render template");
    let table = read_csv_str(&csv).expect("parse template");
    let mappings = generate_initial_mappings(&table.headers);
    let result = validate_mapping_completeness(&mappings);
    assert!(result.is_valid, "{:?}", result.errors);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    let distributor = mappings
        .iter()
        .find(|m| m.csv_column == "Distributor")
        .expect("distributor column");
    assert!(distributor.maps_to.is_skip());
    assert!(
        mappings
            .iter()
            .filter(|m| m.csv_column != "Distributor")
            .all(|m| m.confidence == 100)
    );
}

#[test]
fn reads_file_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("accounts.csv");
    fs::write(&path, "Company,Email\nAcme,ops@acme.example\n").expect("write csv");

    let table = read_csv_file(&path).expect("read csv");
    assert_eq!(table.headers, vec!["Company", "Email"]);
    assert_eq!(table.row_count(), 1);
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = read_csv_file(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

//! CSV reading and structural checks.

use std::io::Read;
use std::path::Path;

use crm_map::safe_column_name;
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{IngestError, Result};

use super::table::CsvTable;

/// Maximum file size for CSV loading (50 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Headers the strict template variant requires verbatim.
pub const STRICT_TEMPLATE_HEADERS: &[&str] = &["organizations"];

fn normalize_cell(raw: &str) -> String {
    raw.trim().to_string()
}

/// Read CSV text. The first non-blank record is the header row.
pub fn read_csv_str(text: &str) -> Result<CsvTable> {
    read_csv_reader(text.as_bytes())
}

/// Read CSV from any reader.
pub fn read_csv_reader<R: Read>(input: R) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut blank = 0usize;
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            blank += 1;
            continue;
        }
        match headers {
            None => headers = Some(record.iter().map(safe_column_name).collect()),
            Some(_) => rows.push(record.iter().map(normalize_cell).collect()),
        }
    }

    let headers = headers.ok_or(IngestError::EmptyCsv)?;
    if blank > 0 {
        debug!(blank, "skipped blank rows");
    }
    Ok(CsvTable::new(headers, rows))
}

/// Read a CSV file after checking its size.
pub fn read_csv_file(path: &Path) -> Result<CsvTable> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)?;
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv_reader(bytes.as_slice())?;
    info!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.row_count(),
        "loaded CSV"
    );
    Ok(table)
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Fail on the first required header that the table lacks (case-insensitive).
pub fn require_headers(table: &CsvTable, required: &[&str]) -> Result<()> {
    for header in required {
        if table.column_index(header).is_none() {
            return Err(IngestError::MissingHeader {
                header: (*header).to_string(),
            });
        }
    }
    Ok(())
}

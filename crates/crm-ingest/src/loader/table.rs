//! In-memory CSV table: one header row plus string cells.

use tracing::warn;

/// Header row and data rows of an import file.
///
/// Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                let dropped = dropped_cells(&row, width);
                if dropped > 0 {
                    warn!(
                        row = idx + 1,
                        dropped,
                        width,
                        "row has more cells than headers, extra cells dropped"
                    );
                }
                pad_row(row, width)
            })
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a header, compared case-insensitively after trimming.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        let wanted = header.trim();
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }
}

/// Non-empty cells past the header width.
pub(crate) fn dropped_cells(row: &[String], width: usize) -> usize {
    row.iter()
        .skip(width)
        .filter(|cell| !cell.trim().is_empty())
        .count()
}

/// Pad short rows with empty cells and drop cells past the header width.
pub(crate) fn pad_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

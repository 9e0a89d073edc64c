//! Preview of an import: row counts and display samples.

use serde::Serialize;
use tracing::info;

use crm_model::ParsedOrganization;
use crm_transform::RowParser;

use crate::row::{ValidationOptions, validate_row};

pub const DEFAULT_SAMPLE_SIZE: usize = 5;

/// A row excluded from the import, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRow {
    /// 1-based position among the data rows (header excluded).
    pub row_number: usize,
    pub organization_name: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    pub total_rows: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Rows that passed with at least one warning.
    pub warning_count: usize,
    pub valid_sample: Vec<ParsedOrganization>,
    pub invalid_sample: Vec<InvalidRow>,
    /// Distinct warning texts in first-seen order.
    pub warnings: Vec<String>,
    /// Zero-based indices of the rows that passed validation.
    #[serde(skip)]
    pub valid_indices: Vec<usize>,
}

impl ImportPreview {
    /// The rows that passed validation, in file order.
    pub fn valid_rows<'a, R>(&self, rows: &'a [R]) -> Vec<&'a R> {
        self.valid_indices
            .iter()
            .filter_map(|idx| rows.get(*idx))
            .collect()
    }

    pub fn has_invalid_rows(&self) -> bool {
        self.invalid_count > 0
    }
}

/// Validate every row and keep up to `sample_size` valid and invalid rows.
pub fn build_preview<R>(
    parser: &RowParser,
    rows: &[R],
    options: ValidationOptions,
    sample_size: usize,
) -> ImportPreview
where
    R: AsRef<[String]>,
{
    let mut preview = ImportPreview {
        total_rows: rows.len(),
        ..ImportPreview::default()
    };

    for (idx, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let result = validate_row(parser, row, options);
        for warning in &result.warnings {
            if !preview.warnings.contains(warning) {
                preview.warnings.push(warning.clone());
            }
        }

        if result.is_valid {
            preview.valid_count += 1;
            preview.valid_indices.push(idx);
            if result.has_warnings() {
                preview.warning_count += 1;
            }
            if preview.valid_sample.len() < sample_size {
                preview.valid_sample.push(parser.parse_organization(row));
            }
        } else {
            preview.invalid_count += 1;
            if preview.invalid_sample.len() < sample_size {
                preview.invalid_sample.push(InvalidRow {
                    row_number: idx + 1,
                    organization_name: parser.organization_name(row),
                    errors: result.errors,
                });
            }
        }
    }

    info!(
        total = preview.total_rows,
        valid = preview.valid_count,
        invalid = preview.invalid_count,
        "Validated import rows"
    );
    preview
}

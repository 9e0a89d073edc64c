//! Utility functions for mapping operations.

/// Normalizes a header for comparison: trimmed and lowercased.
///
/// Inner punctuation and spacing are kept so that `Priority-Focus` still
/// matches its registered synonym exactly.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Trims whitespace and a leading byte-order mark from a column name,
/// preserving the original casing.
pub fn safe_column_name(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

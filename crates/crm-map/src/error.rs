//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Column not present in the CSV header row.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Target text did not name a canonical field or `skip`.
    #[error("Unknown mapping target '{target}' for column '{column}'")]
    UnknownTarget {
        /// The column being overridden.
        column: String,
        /// The unrecognized target text.
        target: String,
    },
}

impl MappingError {
    /// Get the column name associated with this error.
    pub fn column(&self) -> &str {
        match self {
            Self::ColumnNotFound(c) => c,
            Self::UnknownTarget { column, .. } => column,
        }
    }
}

//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // === Write Rejections ===
    /// Unique name constraint (case-insensitive) violated.
    #[error("duplicate key value violates unique constraint: organization '{name}' already exists")]
    DuplicateName { name: String },

    /// Contact references an organization id the store does not know.
    #[error("contact references unknown organization id {id}")]
    UnknownOrganization { id: u64 },

    /// Store refused the call for a backend-specific reason.
    #[error("{0}")]
    Rejected(String),

    // === Snapshot Persistence ===
    #[error("Failed to {operation} store file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid store file: {path}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },
}

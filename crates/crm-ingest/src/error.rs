//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an import file.
///
/// All of these are structural: they block the whole import before any row
/// is parsed.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("CSV file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// CSV has no header row.
    #[error("CSV file is empty")]
    EmptyCsv,

    /// A required header is absent.
    #[error("required column '{header}' not found")]
    MissingHeader { header: String },

    // === Output Errors ===
    /// Failed to write the template.
    #[error("failed to write CSV: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

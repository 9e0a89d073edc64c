//! CRM import file ingestion.
//!
//! # Features
//!
//! - **CSV Loading**: Read an import file into headers and trimmed string cells
//! - **Structural Checks**: Reject files that lack required columns before parsing
//! - **Template**: Write the sample CSV offered to users as a starting point
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use crm_ingest::{read_csv_file, require_headers, STRICT_TEMPLATE_HEADERS};
//!
//! let table = read_csv_file(Path::new("accounts.csv"))?;
//! require_headers(&table, STRICT_TEMPLATE_HEADERS)?;
//! ```

mod error;
mod loader;
mod template;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use loader::{
    CsvTable, MAX_CSV_FILE_SIZE, STRICT_TEMPLATE_HEADERS, check_file_size_with_limit,
    read_csv_file, read_csv_reader, read_csv_str, require_headers,
};

// === Template ===
pub use template::{TEMPLATE_HEADERS, TEMPLATE_ROWS, template_csv, write_template};

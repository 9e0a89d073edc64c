//! Row validation for CRM CSV imports.
//!
//! Validation never fails the run: every row gets a
//! [`ValidationResult`](crm_model::ValidationResult) and invalid rows are
//! reported in an [`ImportPreview`] while the rest move on to grouping.

mod preview;
mod row;

pub use preview::{DEFAULT_SAMPLE_SIZE, ImportPreview, InvalidRow, build_preview};
pub use row::{MISSING_NAME_ERROR, ValidationOptions, is_valid_email, validate_row};

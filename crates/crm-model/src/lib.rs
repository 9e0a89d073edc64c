//! Data model for the CRM CSV import pipeline.
//!
//! Every structure here is created fresh per import run. Nothing is mutated
//! after creation except an [`OrganizationGroup`] gaining contacts while
//! rows are folded into it.

pub mod error;
pub mod field;
pub mod import;
pub mod mapping;
pub mod organization;
pub mod validation;

pub use error::{ModelError, Result};
pub use field::CanonicalField;
pub use import::{BatchError, ImportFailure, ImportResult};
pub use mapping::{FieldMapping, MappingTarget};
pub use organization::{
    DEFAULT_COUNTRY, DEFAULT_SEGMENT, OrganizationGroup, OrganizationType, ParsedContact,
    ParsedOrganization, Priority,
};
pub use validation::ValidationResult;

//! Row parsing and organization grouping for CRM CSV imports.
//!
//! A [`RowParser`] is built once per file from the headers and the confirmed
//! mappings, then turns each row into a [`ParsedOrganization`] and an
//! optional [`ParsedContact`]. [`group_rows`] folds rows sharing an
//! organization name into one [`OrganizationGroup`].
//!
//! [`ParsedOrganization`]: crm_model::ParsedOrganization
//! [`ParsedContact`]: crm_model::ParsedContact
//! [`OrganizationGroup`]: crm_model::OrganizationGroup

mod grouping;
mod names;
mod parser;
mod segment;

pub use grouping::group_rows;
pub use names::split_full_name;
pub use parser::{ColumnRole, MappedCell, MappedRow, RowParser};
pub use segment::infer_segment;

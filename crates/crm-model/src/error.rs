use thiserror::Error;

/// Errors raised when parsing model values from their string form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown canonical field: {0}")]
    UnknownField(String),
    #[error("unknown organization type: {0}")]
    UnknownOrganizationType(String),
    #[error("invalid priority: {0}")]
    InvalidPriority(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::field::CanonicalField;

/// Where a CSV column goes: a canonical field, or nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingTarget {
    Field(CanonicalField),
    Skip,
}

impl MappingTarget {
    pub fn field(&self) -> Option<CanonicalField> {
        match self {
            Self::Field(field) => Some(*field),
            Self::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.write_str(field.as_str()),
            Self::Skip => f.write_str("skip"),
        }
    }
}

impl FromStr for MappingTarget {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("skip") {
            return Ok(Self::Skip);
        }
        s.parse::<CanonicalField>().map(Self::Field)
    }
}

/// Mapping of one CSV header onto a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Header text exactly as it appears in the CSV (trimmed).
    pub csv_column: String,
    pub maps_to: MappingTarget,
    /// Matcher confidence, 0-100.
    pub confidence: u8,
    /// True once a user has confirmed or replaced the suggestion.
    pub user_overridden: bool,
}

impl FieldMapping {
    pub fn suggested(csv_column: impl Into<String>, maps_to: MappingTarget, confidence: u8) -> Self {
        Self {
            csv_column: csv_column.into(),
            maps_to,
            confidence: confidence.min(100),
            user_overridden: false,
        }
    }

    pub fn skipped(csv_column: impl Into<String>) -> Self {
        Self::suggested(csv_column, MappingTarget::Skip, 0)
    }

    pub fn target_field(&self) -> Option<CanonicalField> {
        self.maps_to.field()
    }
}

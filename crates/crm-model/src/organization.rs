//! Parsed organization and contact records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Country written when the CSV does not supply one.
pub const DEFAULT_COUNTRY: &str = "US";

/// Segment written when neither a column nor the name suggests one.
pub const DEFAULT_SEGMENT: &str = "General";

/// Relationship of an organization to the business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationType {
    #[default]
    Customer,
    Principal,
    Distributor,
    Prospect,
    Vendor,
}

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Principal => "principal",
            Self::Distributor => "distributor",
            Self::Prospect => "prospect",
            Self::Vendor => "vendor",
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "principal" => Ok(Self::Principal),
            "distributor" => Ok(Self::Distributor),
            "prospect" => Ok(Self::Prospect),
            "vendor" => Ok(Self::Vendor),
            _ => Err(ModelError::UnknownOrganizationType(s.to_string())),
        }
    }
}

/// Account priority, A (highest) through D.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    A,
    B,
    #[default]
    C,
    D,
}

impl Priority {
    /// Normalize a raw CSV value. Anything other than a single A-D letter
    /// (case-insensitive, surrounding whitespace ignored) becomes `C`.
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            _ => Err(ModelError::InvalidPriority(s.to_string())),
        }
    }
}

/// Organization record extracted from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOrganization {
    /// Trimmed organization name; may be empty; the validator rejects that.
    pub name: String,
    pub organization_type: OrganizationType,
    pub priority: Priority,
    pub segment: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub primary_manager_name: Option<String>,
    pub secondary_manager_name: Option<String>,
    pub notes: Option<String>,
    /// Unrecognized CSV columns, serialized as `header: value; header: value`.
    pub import_notes: Option<String>,
}

impl ParsedOrganization {
    /// An organization with only a name and every other field defaulted.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            organization_type: OrganizationType::default(),
            priority: Priority::default(),
            segment: DEFAULT_SEGMENT.to_string(),
            address: None,
            city: None,
            state: None,
            zip: None,
            country: DEFAULT_COUNTRY.to_string(),
            phone: None,
            website: None,
            primary_manager_name: None,
            secondary_manager_name: None,
            notes: None,
            import_notes: None,
        }
    }
}

/// Contact record extracted from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedContact {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    /// True only for the first contact of an organization group.
    pub is_primary: bool,
}

/// All rows sharing one organization name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationGroup {
    pub organization: ParsedOrganization,
    pub contacts: Vec<ParsedContact>,
}

impl OrganizationGroup {
    pub fn new(organization: ParsedOrganization) -> Self {
        Self {
            organization,
            contacts: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.organization.name
    }

    /// Append a contact, marking it primary if it is the first one.
    pub fn push_contact(&mut self, mut contact: ParsedContact) {
        contact.is_primary = self.contacts.is_empty();
        self.contacts.push(contact);
    }
}

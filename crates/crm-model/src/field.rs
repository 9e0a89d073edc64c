//! Canonical CRM fields that CSV headers are mapped onto.
//!
//! The declaration order of [`CanonicalField::ALL`] is significant: the
//! mapping generator walks fields in this order and keeps the first field
//! that reaches the best confidence, so earlier fields win ties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Target attribute of an imported organization or contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    OrganizationName,
    Priority,
    Segment,
    Address,
    City,
    State,
    Zip,
    Country,
    Phone,
    Website,
    PrimaryManagerName,
    SecondaryManagerName,
    Notes,
    ContactName,
    ContactEmail,
    ContactPhone,
    ContactTitle,
}

impl CanonicalField {
    /// All fields in tie-break priority order.
    pub const ALL: [CanonicalField; 17] = [
        CanonicalField::OrganizationName,
        CanonicalField::Priority,
        CanonicalField::Segment,
        CanonicalField::Address,
        CanonicalField::City,
        CanonicalField::State,
        CanonicalField::Zip,
        CanonicalField::Country,
        CanonicalField::Phone,
        CanonicalField::Website,
        CanonicalField::PrimaryManagerName,
        CanonicalField::SecondaryManagerName,
        CanonicalField::Notes,
        CanonicalField::ContactName,
        CanonicalField::ContactEmail,
        CanonicalField::ContactPhone,
        CanonicalField::ContactTitle,
    ];

    /// Snake-case key used in mapping profiles and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrganizationName => "organization_name",
            Self::Priority => "priority",
            Self::Segment => "segment",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
            Self::Country => "country",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::PrimaryManagerName => "primary_manager_name",
            Self::SecondaryManagerName => "secondary_manager_name",
            Self::Notes => "notes",
            Self::ContactName => "contact_name",
            Self::ContactEmail => "contact_email",
            Self::ContactPhone => "contact_phone",
            Self::ContactTitle => "contact_title",
        }
    }

    /// Human-readable label shown in mapping reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OrganizationName => "Organization Name",
            Self::Priority => "Priority",
            Self::Segment => "Segment",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::Zip => "Zip Code",
            Self::Country => "Country",
            Self::Phone => "Phone",
            Self::Website => "Website",
            Self::PrimaryManagerName => "Primary Manager",
            Self::SecondaryManagerName => "Secondary Manager",
            Self::Notes => "Notes",
            Self::ContactName => "Contact Name",
            Self::ContactEmail => "Contact Email",
            Self::ContactPhone => "Contact Phone",
            Self::ContactTitle => "Contact Title",
        }
    }

    /// Returns true for fields that describe the contact rather than the organization.
    pub fn is_contact_field(&self) -> bool {
        matches!(
            self,
            Self::ContactName | Self::ContactEmail | Self::ContactPhone | Self::ContactTitle
        )
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

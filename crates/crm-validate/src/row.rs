//! Per-row checks: required name, email format, contact presence, priority.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crm_model::{CanonicalField, Priority, ValidationResult};
use crm_transform::RowParser;

/// Error text for a row without an organization name.
pub const MISSING_NAME_ERROR: &str = "Organization name is required";

/// Loose address shape: something, `@`, a domain with at least one dot.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

/// Knobs for row validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Malformed emails reject the row when set; otherwise they only warn.
    pub strict_email: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self { strict_email: true }
    }
}

impl ValidationOptions {
    pub fn lenient() -> Self {
        Self {
            strict_email: false,
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Validate one raw row against the resolved column layout.
pub fn validate_row(
    parser: &RowParser,
    row: &[String],
    options: ValidationOptions,
) -> ValidationResult {
    let mapped = parser.map_row(row);
    let mut result = ValidationResult::valid();

    if mapped.get(CanonicalField::OrganizationName).is_none() {
        result.error(MISSING_NAME_ERROR);
    }

    if let Some(email) = mapped.get(CanonicalField::ContactEmail)
        && !is_valid_email(email)
    {
        let message = format!("Invalid email format: {email}");
        if options.strict_email {
            result.error(message);
        } else {
            result.warning(message);
        }
    }

    if mapped.get(CanonicalField::ContactName).is_none() {
        result.warning("No contact name; organization will be imported without a contact");
    }

    if let Some(raw) = mapped.get(CanonicalField::Priority)
        && Priority::from_str(raw).is_err()
    {
        result.warning(format!(
            "Invalid priority '{raw}', defaulting to {}",
            Priority::default()
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("jane@acme.com"));
        assert!(is_valid_email(" ops@sub.acme.example "));
        assert!(!is_valid_email("jane@acme"));
        assert!(!is_valid_email("jane acme.com"));
        assert!(!is_valid_email("@acme.com"));
        assert!(!is_valid_email("a b@acme.com"));
    }
}

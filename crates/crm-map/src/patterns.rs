//! Header synonyms accepted for each canonical field.

use std::collections::BTreeSet;

use crm_model::CanonicalField;

use crate::utils::normalize_header;

/// Lowercase header synonyms for a canonical field.
pub fn patterns_for(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::OrganizationName => &[
            "organization",
            "organizations",
            "organization name",
            "company",
            "company name",
            "customer",
            "customer name",
            "account name",
            "business name",
            "org name",
        ],
        CanonicalField::Priority => &[
            "priority",
            "priority-focus",
            "priority focus",
            "priority level",
            "tier",
        ],
        CanonicalField::Segment => &[
            "segment",
            "market segment",
            "industry",
            "category",
            "business type",
        ],
        CanonicalField::Address => &[
            "address",
            "street",
            "street address",
            "address line 1",
            "address 1",
        ],
        CanonicalField::City => &["city", "town"],
        CanonicalField::State => &["state", "province", "state/province", "region"],
        CanonicalField::Zip => &["zip", "zip code", "zipcode", "postal code", "postcode"],
        CanonicalField::Country => &["country"],
        CanonicalField::Phone => &[
            "phone",
            "phone number",
            "main phone",
            "office phone",
            "telephone",
        ],
        CanonicalField::Website => &["website", "web site", "url", "web address"],
        CanonicalField::PrimaryManagerName => &[
            "primary manager",
            "primary account manager",
            "account manager",
            "sales rep",
            "manager",
        ],
        CanonicalField::SecondaryManagerName => &[
            "secondary manager",
            "secondary account manager",
            "backup manager",
        ],
        CanonicalField::Notes => &["notes", "note", "comments", "remarks"],
        CanonicalField::ContactName => &[
            "contact",
            "contact name",
            "full name",
            "attendee",
            "attendee name",
            "primary contact",
            "name",
        ],
        CanonicalField::ContactEmail => &[
            "email",
            "e-mail",
            "email address",
            "contact email",
            "attendee email",
        ],
        CanonicalField::ContactPhone => &[
            "contact phone",
            "mobile",
            "cell",
            "cell phone",
            "direct phone",
            "attendee phone",
        ],
        CanonicalField::ContactTitle => &["title", "job title", "position", "contact title"],
    }
}

/// Union of every field's synonyms.
pub fn all_patterns() -> BTreeSet<&'static str> {
    CanonicalField::ALL
        .iter()
        .flat_map(|field| patterns_for(*field).iter().copied())
        .collect()
}

/// Returns true when the header is one of the registered synonyms.
pub fn is_known_header(header: &str) -> bool {
    let normalized = normalize_header(header);
    CanonicalField::ALL
        .iter()
        .any(|field| patterns_for(*field).contains(&normalized.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_field_has_patterns() {
        for field in CanonicalField::ALL {
            assert!(!patterns_for(field).is_empty(), "{field} has no patterns");
        }
    }

    #[test]
    fn patterns_are_lowercase_and_trimmed() {
        for pattern in all_patterns() {
            assert_eq!(pattern, pattern.trim());
            assert_eq!(pattern, pattern.to_lowercase());
        }
    }

    #[test]
    fn known_header_ignores_case_and_padding() {
        assert!(is_known_header("  Customer Name "));
        assert!(is_known_header("EMAIL"));
        assert!(!is_known_header("Favourite Colour"));
    }
}

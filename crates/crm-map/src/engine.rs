//! Mapping generator: turns a CSV header row into field mappings.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crm_model::{CanonicalField, FieldMapping, MappingTarget, ValidationResult};

use crate::matcher::{HeaderMatch, match_header};
use crate::patterns::patterns_for;
use crate::utils::safe_column_name;

/// Mappings below this confidence produce a review warning unless overridden.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 50;

/// Error reported when no column maps to the organization name.
pub const MISSING_ORGANIZATION_ERROR: &str = "Organization Name is required";

/// Confidence level categories for mapping reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Below the warning threshold; needs confirmation.
    Low,
    /// Usable, but worth a glance.
    Medium,
    /// Exact synonym match.
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub fn categorize(confidence: u8, low_threshold: u8) -> Self {
        if confidence >= 100 {
            Self::High
        } else if confidence >= low_threshold {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - exact synonym",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// A candidate field for one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCandidate {
    pub field: CanonicalField,
    pub matched: HeaderMatch,
}

/// Engine for mapping CSV headers onto canonical fields.
///
/// Fields are evaluated in [`CanonicalField::ALL`] order and the strictly
/// highest confidence wins, so the earlier field keeps a tie.
#[derive(Debug, Clone, Copy)]
pub struct MappingEngine {
    low_confidence_threshold: u8,
}

impl Default for MappingEngine {
    fn default() -> Self {
        Self {
            low_confidence_threshold: LOW_CONFIDENCE_THRESHOLD,
        }
    }
}

impl MappingEngine {
    pub fn new(low_confidence_threshold: u8) -> Self {
        Self {
            low_confidence_threshold,
        }
    }

    pub fn low_confidence_threshold(&self) -> u8 {
        self.low_confidence_threshold
    }

    /// Best field for a header, or `None` when nothing scores above zero.
    pub fn best_match(&self, header: &str) -> Option<FieldCandidate> {
        let mut best: Option<FieldCandidate> = None;
        for field in CanonicalField::ALL {
            let matched = match_header(header, patterns_for(field));
            if matched.confidence == 0 {
                continue;
            }
            let better = best
                .as_ref()
                .is_none_or(|current| matched.confidence > current.matched.confidence);
            if better {
                best = Some(FieldCandidate { field, matched });
            }
        }
        best
    }

    /// Every field with a non-zero score, best first; ties keep field order.
    pub fn rank_fields(&self, header: &str) -> Vec<FieldCandidate> {
        let mut candidates: Vec<FieldCandidate> = CanonicalField::ALL
            .iter()
            .map(|field| FieldCandidate {
                field: *field,
                matched: match_header(header, patterns_for(*field)),
            })
            .filter(|candidate| candidate.matched.confidence > 0)
            .collect();
        // Stable sort keeps registry order among equal scores.
        candidates.sort_by(|a, b| b.matched.confidence.cmp(&a.matched.confidence));
        candidates
    }

    /// One mapping per header, in header order.
    pub fn generate(&self, headers: &[String]) -> Vec<FieldMapping> {
        headers
            .iter()
            .map(|header| {
                let column = safe_column_name(header);
                match self.best_match(&column) {
                    Some(candidate) => {
                        debug!(
                            column = %column,
                            field = %candidate.field,
                            confidence = candidate.matched.confidence,
                            "mapped column"
                        );
                        FieldMapping::suggested(
                            column,
                            MappingTarget::Field(candidate.field),
                            candidate.matched.confidence,
                        )
                    }
                    None => {
                        debug!(column = %column, "no field match, skipping column");
                        FieldMapping::skipped(column)
                    }
                }
            })
            .collect()
    }

    /// Checks that a mapping set can drive an import.
    ///
    /// Missing organization name and duplicate targets are errors; weak
    /// suggestions that nobody confirmed are warnings.
    pub fn validate(&self, mappings: &[FieldMapping]) -> ValidationResult {
        let mut result = ValidationResult::valid();

        let has_organization = mappings
            .iter()
            .any(|m| m.target_field() == Some(CanonicalField::OrganizationName));
        if !has_organization {
            result.error(MISSING_ORGANIZATION_ERROR);
        }

        let mut by_field: BTreeMap<CanonicalField, Vec<&str>> = BTreeMap::new();
        for mapping in mappings {
            if let Some(field) = mapping.target_field() {
                by_field
                    .entry(field)
                    .or_default()
                    .push(mapping.csv_column.as_str());
            }
        }
        for (field, columns) in &by_field {
            if columns.len() > 1 {
                result.error(format!(
                    "Multiple columns mapped to {}: {}",
                    field.label(),
                    columns.join(", ")
                ));
            }
        }

        for mapping in mappings {
            let Some(field) = mapping.target_field() else {
                continue;
            };
            if !mapping.user_overridden && mapping.confidence < self.low_confidence_threshold {
                result.warning(format!(
                    "Low confidence mapping: '{}' -> {} ({}%)",
                    mapping.csv_column,
                    field.label(),
                    mapping.confidence
                ));
            }
        }

        if !result.is_valid {
            warn!(errors = result.errors.len(), "mapping set is incomplete");
        }
        result
    }
}

/// Generates mappings with the default engine.
pub fn generate_initial_mappings(headers: &[String]) -> Vec<FieldMapping> {
    MappingEngine::default().generate(headers)
}

/// Validates mappings with the default engine.
pub fn validate_mapping_completeness(mappings: &[FieldMapping]) -> ValidationResult {
    MappingEngine::default().validate(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn first_field_wins_ties() {
        // "Name" is a substring of several organization synonyms and an exact
        // contact synonym; exact beats substring.
        let engine = MappingEngine::default();
        let candidate = engine.best_match("Name").unwrap();
        assert_eq!(candidate.field, CanonicalField::ContactName);
        assert_eq!(candidate.matched.confidence, 100);

        // "Phone" is exact for the organization phone and a substring of
        // "contact phone"; the organization field is evaluated first anyway.
        let candidate = engine.best_match("Phone").unwrap();
        assert_eq!(candidate.field, CanonicalField::Phone);
    }

    #[test]
    fn equal_scores_keep_registry_order() {
        // "Customer Zip" contains both "customer" and "zip" (75 each);
        // organization name is earlier in the registry.
        let candidate = MappingEngine::default().best_match("Customer Zip").unwrap();
        assert_eq!(candidate.field, CanonicalField::OrganizationName);
        assert_eq!(candidate.matched.confidence, 75);
    }

    #[test]
    fn rank_fields_orders_by_confidence() {
        let ranked = MappingEngine::default().rank_fields("Contact Phone");
        assert_eq!(ranked[0].field, CanonicalField::ContactPhone);
        assert_eq!(ranked[0].matched.confidence, 100);
        assert!(ranked.iter().skip(1).all(|c| c.matched.confidence <= 100));
    }

    #[test]
    fn unmatched_header_is_skipped() {
        let mappings = generate_initial_mappings(&headers(&["Favourite Colour"]));
        assert_eq!(mappings[0].maps_to, MappingTarget::Skip);
        assert_eq!(mappings[0].confidence, 0);
    }

    #[test]
    fn duplicate_targets_are_errors() {
        let mappings = vec![
            FieldMapping::suggested(
                "Company",
                MappingTarget::Field(CanonicalField::OrganizationName),
                100,
            ),
            FieldMapping::suggested("Email", MappingTarget::Field(CanonicalField::ContactEmail), 100),
            FieldMapping::suggested(
                "E-mail",
                MappingTarget::Field(CanonicalField::ContactEmail),
                100,
            ),
        ];
        let result = validate_mapping_completeness(&mappings);
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Multiple columns mapped to Contact Email: Email, E-mail".to_string()]
        );
    }

    #[test]
    fn low_confidence_warns_unless_overridden() {
        let mut weak = FieldMapping::suggested("Cty", MappingTarget::Field(CanonicalField::City), 45);
        let org = FieldMapping::suggested(
            "Company",
            MappingTarget::Field(CanonicalField::OrganizationName),
            100,
        );
        let result = validate_mapping_completeness(&[org.clone(), weak.clone()]);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);

        weak.user_overridden = true;
        let result = validate_mapping_completeness(&[org, weak]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(ConfidenceLevel::categorize(100, 50), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::categorize(75, 50), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::categorize(49, 50), ConfidenceLevel::Low);
    }
}

//! Row parser: one CSV row into organization and contact records.

use std::collections::BTreeMap;

use crm_map::{is_known_header, safe_column_name};
use crm_model::{
    CanonicalField, DEFAULT_COUNTRY, FieldMapping, OrganizationType, ParsedContact,
    ParsedOrganization, Priority,
};

use crate::names::split_full_name;
use crate::segment::infer_segment;

const DISTRIBUTOR_MARKER: &str = "distributor";

/// What a CSV column contributes to a parsed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Feeds a canonical field.
    Field(CanonicalField),
    /// Header mentions "distributor"; read only for type inference.
    TypeFlag,
    /// Skipped, or lost a duplicate mapping to an earlier column.
    Ignored,
    /// Feeds nothing and is not a registry synonym.
    Unmapped,
}

/// A cell classified by its column role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappedCell<'a> {
    Known {
        field: CanonicalField,
        value: &'a str,
    },
    Unmapped {
        header: &'a str,
        value: &'a str,
    },
}

/// Row values keyed by canonical field, plus leftover unmapped cells.
///
/// `notes` holds every cell whose header is not a registry synonym, whatever
/// its role, so a fuzzy-mapped or flag column is still recorded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedRow<'a> {
    fields: BTreeMap<CanonicalField, &'a str>,
    unmapped: Vec<(&'a str, &'a str)>,
    notes: Vec<(&'a str, &'a str)>,
    type_flags: Vec<&'a str>,
}

impl<'a> MappedRow<'a> {
    /// Trimmed, non-empty value of a field.
    pub fn get(&self, field: CanonicalField) -> Option<&'a str> {
        self.fields
            .get(&field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Trimmed value of a field, empty when absent.
    pub fn text(&self, field: CanonicalField) -> &'a str {
        self.get(field).unwrap_or_default()
    }

    pub fn cells(&self) -> impl Iterator<Item = MappedCell<'a>> + '_ {
        let known = self
            .fields
            .iter()
            .map(|(field, value)| MappedCell::Known {
                field: *field,
                value: *value,
            });
        let unmapped = self
            .unmapped
            .iter()
            .map(|&(header, value)| MappedCell::Unmapped { header, value });
        known.chain(unmapped)
    }

    /// `"header: value; header: value"` for non-empty cells under headers
    /// the registry does not know, in column order.
    pub fn import_notes(&self) -> Option<String> {
        let notes: Vec<String> = self
            .notes
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(header, value)| format!("{header}: {}", value.trim()))
            .collect();
        if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        }
    }

    fn flags_distributor(&self) -> bool {
        self.type_flags.iter().any(|value| {
            let lower = value.to_lowercase();
            lower.contains("yes") || lower.contains(DISTRIBUTOR_MARKER)
        })
    }
}

/// Parses rows of one CSV file according to its resolved mappings.
#[derive(Debug, Clone)]
pub struct RowParser {
    headers: Vec<String>,
    roles: Vec<ColumnRole>,
    known: Vec<bool>,
}

impl RowParser {
    /// Resolve a role for every header. When a field is mapped by more than
    /// one column, the first column feeds it and the others are ignored.
    pub fn new(headers: &[String], mappings: &[FieldMapping]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| safe_column_name(h)).collect();
        let known: Vec<bool> = headers.iter().map(|h| is_known_header(h)).collect();
        let mut assigned = Vec::new();
        let roles = headers
            .iter()
            .zip(&known)
            .map(|(column, &known)| {
                let column = column.as_str();
                let target = mappings
                    .iter()
                    .find(|m| m.csv_column == column)
                    .and_then(FieldMapping::target_field);
                match target {
                    Some(field) if !assigned.contains(&field) => {
                        assigned.push(field);
                        ColumnRole::Field(field)
                    }
                    Some(_) => ColumnRole::Ignored,
                    None if column.to_lowercase().contains(DISTRIBUTOR_MARKER) => {
                        ColumnRole::TypeFlag
                    }
                    None if known => ColumnRole::Ignored,
                    None => ColumnRole::Unmapped,
                }
            })
            .collect();
        Self {
            headers,
            roles,
            known,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// Column index feeding a field.
    pub fn column_of(&self, field: CanonicalField) -> Option<usize> {
        self.roles
            .iter()
            .position(|role| *role == ColumnRole::Field(field))
    }

    /// True when the column's header is one of the registry synonyms.
    pub fn is_known_column(&self, idx: usize) -> bool {
        self.known.get(idx).copied().unwrap_or_default()
    }

    pub fn has_field(&self, field: CanonicalField) -> bool {
        self.column_of(field).is_some()
    }

    /// Classify every cell of a row. Missing trailing cells read as empty.
    pub fn map_row<'a>(&'a self, row: &'a [String]) -> MappedRow<'a> {
        let mut mapped = MappedRow::default();
        for (idx, role) in self.roles.iter().enumerate() {
            let value = row.get(idx).map(String::as_str).unwrap_or_default();
            let header = self.headers[idx].as_str();
            if header.to_lowercase().contains(DISTRIBUTOR_MARKER) {
                mapped.type_flags.push(value);
            }
            if !self.known[idx] {
                mapped.notes.push((header, value));
            }
            match role {
                ColumnRole::Field(field) => {
                    mapped.fields.insert(*field, value);
                }
                ColumnRole::Unmapped => mapped.unmapped.push((header, value)),
                ColumnRole::TypeFlag | ColumnRole::Ignored => {}
            }
        }
        mapped
    }

    /// Trimmed organization name, empty when the column is absent or blank.
    pub fn organization_name(&self, row: &[String]) -> String {
        self.map_row(row)
            .text(CanonicalField::OrganizationName)
            .to_string()
    }

    /// Always returns an organization; an empty name is left to validation.
    pub fn parse_organization(&self, row: &[String]) -> ParsedOrganization {
        let mapped = self.map_row(row);
        let name = mapped.text(CanonicalField::OrganizationName).to_string();

        let segment = mapped
            .get(CanonicalField::Segment)
            .map_or_else(|| infer_segment(&name).to_string(), str::to_string);

        let is_distributor =
            mapped.flags_distributor() || segment.to_lowercase().contains(DISTRIBUTOR_MARKER);
        let organization_type = if is_distributor {
            OrganizationType::Distributor
        } else {
            OrganizationType::Customer
        };

        let owned = |field: CanonicalField| mapped.get(field).map(str::to_string);

        ParsedOrganization {
            organization_type,
            priority: Priority::normalize(mapped.text(CanonicalField::Priority)),
            segment,
            address: owned(CanonicalField::Address),
            city: owned(CanonicalField::City),
            state: owned(CanonicalField::State),
            zip: owned(CanonicalField::Zip),
            country: owned(CanonicalField::Country).unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            phone: owned(CanonicalField::Phone),
            website: owned(CanonicalField::Website),
            primary_manager_name: owned(CanonicalField::PrimaryManagerName),
            secondary_manager_name: owned(CanonicalField::SecondaryManagerName),
            notes: owned(CanonicalField::Notes),
            import_notes: mapped.import_notes(),
            name,
        }
    }

    /// Contact for the row, or `None` when the full-name cell is empty.
    pub fn parse_contact(&self, row: &[String], is_primary: bool) -> Option<ParsedContact> {
        let mapped = self.map_row(row);
        let full_name = mapped.get(CanonicalField::ContactName)?;
        let (first_name, last_name) = split_full_name(full_name);
        Some(ParsedContact {
            first_name,
            last_name,
            email: mapped.get(CanonicalField::ContactEmail).map(str::to_string),
            phone: mapped.get(CanonicalField::ContactPhone).map(str::to_string),
            title: mapped.get(CanonicalField::ContactTitle).map(str::to_string),
            is_primary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::MappingTarget;

    fn parser(headers: &[&str], targets: &[MappingTarget]) -> (Vec<String>, RowParser) {
        let headers: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
        let mappings: Vec<FieldMapping> = headers
            .iter()
            .zip(targets)
            .map(|(h, t)| FieldMapping::suggested(h.clone(), *t, 100))
            .collect();
        let parser = RowParser::new(&headers, &mappings);
        (headers, parser)
    }

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn roles_follow_mappings() {
        let (_, parser) = parser(
            &["Company", "Company Name", "Distributor?", "Email", "Badge"],
            &[
                MappingTarget::Field(CanonicalField::OrganizationName),
                MappingTarget::Field(CanonicalField::OrganizationName),
                MappingTarget::Skip,
                MappingTarget::Skip,
                MappingTarget::Skip,
            ],
        );
        assert_eq!(
            parser.roles(),
            &[
                ColumnRole::Field(CanonicalField::OrganizationName),
                ColumnRole::Ignored,
                ColumnRole::TypeFlag,
                ColumnRole::Ignored,
                ColumnRole::Unmapped,
            ]
        );
        assert_eq!(parser.column_of(CanonicalField::OrganizationName), Some(0));
    }

    #[test]
    fn cells_are_tagged() {
        let (_, parser) = parser(
            &["Company", "Badge"],
            &[
                MappingTarget::Field(CanonicalField::OrganizationName),
                MappingTarget::Skip,
            ],
        );
        let values = row(&["Acme", "B-17"]);
        let cells: Vec<MappedCell<'_>> = parser.map_row(&values).cells().collect();
        assert_eq!(
            cells,
            vec![
                MappedCell::Known {
                    field: CanonicalField::OrganizationName,
                    value: "Acme"
                },
                MappedCell::Unmapped {
                    header: "Badge",
                    value: "B-17"
                },
            ]
        );
    }

    #[test]
    fn unknown_headers_are_noted_whatever_their_role() {
        let (_, parser) = parser(
            &["Customer Name", "Company Website", "Distributor", "Email"],
            &[
                MappingTarget::Field(CanonicalField::OrganizationName),
                MappingTarget::Field(CanonicalField::OrganizationName),
                MappingTarget::Skip,
                MappingTarget::Skip,
            ],
        );
        assert!(parser.is_known_column(0));
        assert!(!parser.is_known_column(1));
        assert_eq!(parser.roles()[1], ColumnRole::Ignored);

        let values = row(&["Acme", "acme.com", "Yes", ""]);
        let org = parser.parse_organization(&values);
        assert_eq!(org.name, "Acme");
        assert_eq!(org.organization_type, OrganizationType::Distributor);
        assert_eq!(
            org.import_notes.as_deref(),
            Some("Company Website: acme.com; Distributor: Yes")
        );
    }

    #[test]
    fn short_rows_read_as_empty() {
        let (_, parser) = parser(
            &["Company", "Contact"],
            &[
                MappingTarget::Field(CanonicalField::OrganizationName),
                MappingTarget::Field(CanonicalField::ContactName),
            ],
        );
        let values = row(&["Acme"]);
        assert_eq!(parser.organization_name(&values), "Acme");
        assert!(parser.parse_contact(&values, true).is_none());
    }
}

//! Fold parsed rows into organization groups.

use std::collections::HashMap;

use tracing::debug;

use crm_model::OrganizationGroup;

use crate::parser::RowParser;

/// Group rows by exact trimmed organization name, in first-seen order.
///
/// The first row of a group supplies the organization fields. Every row
/// contributes at most one contact; the first contact appended to a group is
/// primary. Rows with an empty name are skipped.
pub fn group_rows<R>(parser: &RowParser, rows: &[R]) -> Vec<OrganizationGroup>
where
    R: AsRef<[String]>,
{
    let mut groups: Vec<OrganizationGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for row in rows {
        let row = row.as_ref();
        let name = parser.organization_name(row);
        if name.is_empty() {
            skipped += 1;
            continue;
        }
        let idx = *index_by_name.entry(name).or_insert_with(|| {
            groups.push(OrganizationGroup::new(parser.parse_organization(row)));
            groups.len() - 1
        });
        if let Some(contact) = parser.parse_contact(row, false) {
            groups[idx].push_contact(contact);
        }
    }

    debug!(
        rows = rows.len(),
        groups = groups.len(),
        skipped,
        "Grouped rows into organizations"
    );
    groups
}

use crm_ingest::{read_csv_str, template_csv};
use crm_map::generate_initial_mappings;
use crm_model::{OrganizationType, Priority};
use crm_transform::{RowParser, group_rows, split_full_name};
use proptest::prelude::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn parser_for(headers: &[String]) -> RowParser {
    RowParser::new(headers, &generate_initial_mappings(headers))
}

#[test]
fn attendee_rows_group_under_one_organization() {
    let headers = strings(&["Customer Name", "Attendee Name", "Attendee Email"]);
    let rows = vec![
        strings(&["Acme Foods", "Doe, Jane", "jane@acme.com"]),
        strings(&["Acme Foods", "John Smith", "john@acme.com"]),
    ];
    let parser = parser_for(&headers);

    let groups = group_rows(&parser, &rows);
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group.name(), "Acme Foods");
    assert_eq!(group.organization.segment, "General");
    assert_eq!(group.organization.organization_type, OrganizationType::Customer);
    assert_eq!(group.organization.country, "US");

    let names: Vec<(&str, &str, bool)> = group
        .contacts
        .iter()
        .map(|c| (c.first_name.as_str(), c.last_name.as_str(), c.is_primary))
        .collect();
    assert_eq!(names, vec![("Jane", "Doe", true), ("John", "Smith", false)]);
    assert_eq!(group.contacts[1].email.as_deref(), Some("john@acme.com"));
}

#[test]
fn unknown_priority_falls_back_to_c() {
    let headers = strings(&["Organizations", "Priority-Focus"]);
    let parser = parser_for(&headers);

    let lower = parser.parse_organization(&strings(&["Acme", "b"]));
    assert_eq!(lower.priority, Priority::B);

    let unknown = parser.parse_organization(&strings(&["Acme", "e"]));
    assert_eq!(unknown.priority, Priority::C);
}

#[test]
fn template_rows_parse_into_two_groups() {
    let table = read_csv_str(&template_csv().expect("render template")).expect("parse template");
    let parser = parser_for(&table.headers);

    let groups = group_rows(&parser, &table.rows);
    let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["Harbor Street Bistro", "Northeast Foodservice Supply"]);

    let bistro = &groups[0];
    assert_eq!(bistro.organization.segment, "Restaurant");
    assert_eq!(bistro.organization.organization_type, OrganizationType::Customer);
    assert_eq!(bistro.organization.priority, Priority::A);
    assert_eq!(
        bistro.organization.import_notes.as_deref(),
        Some("Distributor: No")
    );
    assert_eq!(bistro.contacts.len(), 2);
    assert_eq!(bistro.contacts[0].first_name, "Marco");
    assert_eq!(bistro.contacts[0].last_name, "Reyes");
    assert_eq!(bistro.contacts[0].phone.as_deref(), Some("207-555-0199"));
    assert_eq!(bistro.contacts[1].phone, None);

    let supplier = &groups[1];
    assert_eq!(supplier.organization.segment, "Broadline Distributor");
    assert_eq!(supplier.organization.organization_type, OrganizationType::Distributor);
    assert_eq!(
        supplier.organization.secondary_manager_name.as_deref(),
        Some("Dana Whitfield")
    );
}

#[test]
fn distributor_flag_column_sets_type() {
    let headers = strings(&["Company", "Is Distributor?"]);
    let parser = parser_for(&headers);

    let flagged = parser.parse_organization(&strings(&["Sysco North", "YES"]));
    assert_eq!(flagged.organization_type, OrganizationType::Distributor);
    assert_eq!(flagged.import_notes.as_deref(), Some("Is Distributor?: YES"));

    let plain = parser.parse_organization(&strings(&["Corner Grocery", "no"]));
    assert_eq!(plain.organization_type, OrganizationType::Customer);
    assert_eq!(plain.segment, "Retail");
}

#[test]
fn unrecognized_columns_become_import_notes() {
    let headers = strings(&["Company", "Lead Source", "Favourite Colour", "Email"]);
    let parser = parser_for(&headers);

    let org = parser.parse_organization(&strings(&["Acme", "Trade show", "", "ops@acme.example"]));
    assert_eq!(org.import_notes.as_deref(), Some("Lead Source: Trade show"));

    let org = parser.parse_organization(&strings(&["Acme", "Web", "Teal", ""]));
    assert_eq!(
        org.import_notes.as_deref(),
        Some("Lead Source: Web; Favourite Colour: Teal")
    );
}

#[test]
fn mapped_but_unregistered_headers_still_become_notes() {
    let headers = strings(&["Customer Name", "Company Website", "Distributor"]);
    let parser = parser_for(&headers);

    let org = parser.parse_organization(&strings(&["Acme", "acme.com", "Yes"]));
    assert_eq!(org.name, "Acme");
    assert_eq!(org.organization_type, OrganizationType::Distributor);
    assert_eq!(
        org.import_notes.as_deref(),
        Some("Company Website: acme.com; Distributor: Yes")
    );
}

#[test]
fn rows_without_names_or_contacts() {
    let headers = strings(&["Company", "Contact"]);
    let rows = vec![
        strings(&["", "Orphan Row"]),
        strings(&["Beta Labs", ""]),
        strings(&["Alpha Inc", "Cher"]),
        strings(&["Beta Labs", "Ann Lee"]),
    ];
    let parser = parser_for(&headers);

    let groups = group_rows(&parser, &rows);
    let names: Vec<&str> = groups.iter().map(|g| g.name()).collect();
    assert_eq!(names, vec!["Beta Labs", "Alpha Inc"]);

    assert_eq!(groups[0].contacts.len(), 1);
    assert!(groups[0].contacts[0].is_primary);
    assert_eq!(groups[0].contacts[0].first_name, "Ann");
    assert_eq!(groups[1].contacts[0].last_name, "");
}

#[test]
fn grouping_key_is_case_sensitive() {
    let headers = strings(&["Company"]);
    let rows = vec![strings(&["Acme"]), strings(&["ACME"]), strings(&[" Acme "])];
    let groups = group_rows(&parser_for(&headers), &rows);
    assert_eq!(groups.len(), 2);
}

proptest! {
    #[test]
    fn split_name_keeps_non_empty_input(raw in "[A-Za-z ,]{0,24}") {
        let (first, last) = split_full_name(&raw);
        let has_letters = raw.chars().any(|c| c.is_ascii_alphabetic());
        if has_letters {
            prop_assert!(!first.is_empty() || !last.is_empty());
        }
    }

    #[test]
    fn organization_name_is_the_trimmed_cell(
        name in "[A-Za-z][A-Za-z &.'-]{0,20}",
        pad_left in " {0,3}",
        pad_right in " {0,3}",
    ) {
        let headers = strings(&["Company", "Contact"]);
        let parser = parser_for(&headers);
        let row = vec![format!("{pad_left}{name}{pad_right}"), String::new()];

        let org = parser.parse_organization(&row);
        prop_assert_eq!(org.name.as_str(), name.trim());
        prop_assert!(!org.name.is_empty());
        prop_assert_eq!(parser.organization_name(&row), org.name);
    }

    #[test]
    fn groups_follow_first_seen_order(names in prop::collection::vec("[a-d]", 1..20)) {
        let headers = strings(&["Company", "Contact"]);
        let rows: Vec<Vec<String>> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| vec![name.clone(), format!("Person {idx}")])
            .collect();
        let groups = group_rows(&parser_for(&headers), &rows);

        let mut expected: Vec<&str> = Vec::new();
        for name in &names {
            if !expected.contains(&name.as_str()) {
                expected.push(name);
            }
        }
        let actual: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        prop_assert_eq!(actual, expected);

        for group in &groups {
            prop_assert!(group.contacts[0].is_primary);
            prop_assert!(group.contacts[1..].iter().all(|c| !c.is_primary));
        }
        let contacts: usize = groups.iter().map(|g| g.contacts.len()).sum();
        prop_assert_eq!(contacts, names.len());
    }
}

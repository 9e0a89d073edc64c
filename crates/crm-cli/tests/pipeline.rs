//! End-to-end tests for the import pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use crm_cli::pipeline::{ColumnOverride, execute_plan, load_table, plan_import, resolve_mappings};
use crm_import::{ActorId, DuplicatePolicy, ImportOptions, InMemoryStore, LookupCache};
use crm_ingest::template_csv;
use crm_map::MappingProfile;
use crm_model::{CanonicalField, MappingTarget, OrganizationType};
use crm_validate::ValidationOptions;

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn parses_column_overrides() {
    let parsed: ColumnOverride = "Booth Visitor=contact_name".parse().expect("parse override");
    assert_eq!(parsed.column, "Booth Visitor");
    assert_eq!(parsed.target, MappingTarget::Field(CanonicalField::ContactName));

    let skip: ColumnOverride = "Badge=skip".parse().expect("parse skip");
    assert_eq!(skip.target, MappingTarget::Skip);
    assert_eq!(skip.to_string(), "Badge=skip");

    assert!("Badge".parse::<ColumnOverride>().is_err());
    assert!("=skip".parse::<ColumnOverride>().is_err());
    assert!("Badge=shoe_size".parse::<ColumnOverride>().is_err());
}

#[tokio::test]
async fn template_imports_end_to_end() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let csv = template_csv().expect("render template");
    let path = write_csv(dir.path(), "template.csv", &csv);

    let table = load_table(&path, true).expect("load table");
    let state = resolve_mappings(&table.headers, None, &[]).expect("map headers");
    let plan = plan_import(&table, &state, ValidationOptions::default(), 5).expect("plan");
    assert_eq!(plan.preview.valid_count, 3);
    assert_eq!(plan.groups.len(), 2);
    assert_eq!(plan.contact_count(), 3);

    let mut store = InMemoryStore::new(ActorId::new("rep@example.com"));
    let mut percents = Vec::new();
    let result = execute_plan(
        plan,
        &mut store,
        ImportOptions::default(),
        None,
        |p| percents.push(p.percent),
    )
    .await;

    assert_eq!(percents, vec![100]);
    insta::assert_json_snapshot!(result, @r#"
    {
      "success": true,
      "organizations_created": 2,
      "organizations_skipped": 0,
      "organizations_failed": 0,
      "contacts_created": 3,
      "contacts_failed": 0,
      "failures": [],
      "batch_errors": [],
      "message": "Imported 2 organizations (3 contacts), 0 failed"
    }
    "#);

    let supplier = store
        .organizations()
        .iter()
        .find(|record| record.data.name() == "Northeast Foodservice Supply")
        .expect("supplier stored");
    assert_eq!(
        supplier.data.organization.organization_type,
        OrganizationType::Distributor
    );
}

#[tokio::test]
async fn second_import_skips_existing_organizations() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(
        dir.path(),
        "accounts.csv",
        "Company,Contact,Email\nAcme Foods,\"Doe, Jane\",jane@acme.com\nBeta Labs,Ann Lee,ann@beta.example\n",
    );
    let table = load_table(&path, false).expect("load table");
    let state = resolve_mappings(&table.headers, None, &[]).expect("map headers");

    let mut store = InMemoryStore::new(ActorId::new("rep"));
    let mut cache = LookupCache::default();
    let options = ImportOptions {
        batch_size: 1,
        duplicate_policy: DuplicatePolicy::PreFilter,
    };

    let first = plan_import(&table, &state, ValidationOptions::default(), 5).expect("plan");
    let result = execute_plan(first, &mut store, options, Some(&mut cache), |_| {}).await;
    assert_eq!(result.organizations_created, 2);

    let second = plan_import(&table, &state, ValidationOptions::default(), 5).expect("plan");
    let result = execute_plan(second, &mut store, options, Some(&mut cache), |_| {}).await;
    assert_eq!(result.organizations_created, 0);
    assert_eq!(result.organizations_skipped, 2);
    assert_eq!(store.organizations().len(), 2);
}

#[test]
fn missing_organization_column_blocks_the_import() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(
        dir.path(),
        "people.csv",
        "Contact,Email\nJane Doe,jane@acme.com\n",
    );
    let table = load_table(&path, false).expect("load table");
    let state = resolve_mappings(&table.headers, None, &[]).expect("map headers");

    let err = plan_import(&table, &state, ValidationOptions::default(), 5).unwrap_err();
    assert!(
        err.to_string().contains("Organization Name is required"),
        "{err}"
    );
}

#[test]
fn strict_template_requires_organizations_column() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(dir.path(), "accounts.csv", "Company\nAcme\n");
    assert!(load_table(&path, true).is_err());
    assert!(load_table(&path, false).is_ok());
}

#[test]
fn overrides_and_profiles_fix_unmatched_columns() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_csv(
        dir.path(),
        "booth.csv",
        "Company,Booth Visitor,Badge Id\nAcme Foods,Jane Doe,B-17\n",
    );
    let table = load_table(&path, false).expect("load table");

    let overrides: Vec<ColumnOverride> = vec![
        "Booth Visitor=contact_name".parse().expect("parse override"),
        "Badge Id=skip".parse().expect("parse override"),
    ];
    let state = resolve_mappings(&table.headers, None, &overrides).expect("map headers");
    let profile_path = dir.path().join("booth-profile.json");
    MappingProfile::from_state(&state)
        .save(&profile_path)
        .expect("save profile");

    let replayed =
        resolve_mappings(&table.headers, Some(&profile_path), &[]).expect("apply profile");
    assert_eq!(replayed.mappings(), state.mappings());

    let plan = plan_import(&table, &replayed, ValidationOptions::default(), 5).expect("plan");
    let group = &plan.groups[0];
    assert_eq!(group.contacts[0].first_name, "Jane");
    assert_eq!(
        group.organization.import_notes.as_deref(),
        Some("Booth Visitor: Jane Doe; Badge Id: B-17")
    );
}

#[test]
fn unknown_override_column_is_an_error() {
    let headers = vec!["Company".to_string()];
    let overrides = vec!["Nope=skip".parse::<ColumnOverride>().expect("parse override")];
    assert!(resolve_mappings(&headers, None, &overrides).is_err());
}

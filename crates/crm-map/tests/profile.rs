use crm_map::{MappingProfile, MappingState};
use crm_model::{CanonicalField, MappingTarget};

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn profile_save_and_load() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("trade_show.json");

    let mut state = MappingState::from_headers(&headers(&["Company", "Booth Visitor", "Badge Id"]));
    state.override_column_str("Booth Visitor", "contact_name").unwrap();
    state.skip_column("Badge Id").unwrap();

    let profile = MappingProfile::from_state(&state).with_description("Trade show export");
    profile.save(&path).expect("save profile");

    let loaded = MappingProfile::load(&path).expect("load profile");
    assert_eq!(loaded.version, "1.0");
    assert_eq!(loaded.description.as_deref(), Some("Trade show export"));
    assert!(loaded.saved_at.is_some());
    assert_eq!(loaded.overrides.len(), 2);
    assert_eq!(loaded.overrides.get("Booth Visitor").map(String::as_str), Some("contact_name"));
    assert_eq!(loaded.overrides.get("Badge Id").map(String::as_str), Some("skip"));
}

#[test]
fn profile_applies_to_new_state() {
    let mut profile = MappingProfile::default();
    profile
        .overrides
        .insert("Booth Visitor".to_string(), "contact_name".to_string());
    profile
        .overrides
        .insert("Not In File".to_string(), "notes".to_string());

    let mut state = MappingState::from_headers(&headers(&["Company", "Booth Visitor"]));
    let missing = profile.apply(&mut state).expect("apply profile");

    assert_eq!(missing, vec!["Not In File".to_string()]);
    let mapping = state.mapping_for_column("Booth Visitor").unwrap();
    assert_eq!(mapping.maps_to, MappingTarget::Field(CanonicalField::ContactName));
    assert!(mapping.user_overridden);
}

#[test]
fn profile_with_unknown_target_fails() {
    let mut profile = MappingProfile::default();
    profile
        .overrides
        .insert("Company".to_string(), "shoe_size".to_string());
    let mut state = MappingState::from_headers(&headers(&["Company"]));
    assert!(profile.apply(&mut state).is_err());
}

#[test]
fn load_missing_profile_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    assert!(MappingProfile::load(&dir.path().join("absent.json")).is_err());
}

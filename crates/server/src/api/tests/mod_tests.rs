use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("rewind_server_{name}_{suffix}.json"));
    fs::write(&path, contents).expect("write");
    path
}

#[test]
fn unfiltered_timeline_returns_all_entries_in_order() {
    let response = timeline(&ApiContext::seeded(), None);
    assert_eq!(response.status.as_deref(), Some("ok"));
    let ids: Vec<_> = response
        .items
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["evt_001", "evt_002"]);
}

#[test]
fn year_filter_matches_only_that_year() {
    let response = timeline(&ApiContext::seeded(), Some(2020));
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0]["title"], "Music Rewind Started");

    assert!(timeline(&ApiContext::seeded(), Some(1990)).items.is_empty());
}

#[test]
fn entries_with_unreadable_year_only_appear_unfiltered() {
    let ctx = ApiContext::new(vec![
        json!({ "id": "a", "year": "2019" }),
        json!({ "id": "b", "year": "later" }),
    ]);
    assert_eq!(timeline(&ctx, None).items.len(), 2);
    let filtered = timeline(&ctx, Some(2019));
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0]["id"], "a");
}

#[test]
fn year_param_parsing() {
    assert_eq!(parse_year_param(None).expect("none"), None);
    assert_eq!(parse_year_param(Some("")).expect("blank"), None);
    assert_eq!(parse_year_param(Some(" 2018 ")).expect("year"), Some(2018));
    let err = parse_year_param(Some("last-year")).expect_err("should fail");
    assert_eq!(err.code(), shared::error::ErrorCode::Validation);
    assert_eq!(err.to_string(), "year must be an integer, got 'last-year'");
}

#[test]
fn loads_bare_array_and_envelope_files() {
    let array = temp_file("array", r#"[{"id":"x","title":"T","artist":"A","year":2001}]"#);
    assert_eq!(load_entries(&array).expect("array").len(), 1);
    fs::remove_file(array).expect("cleanup");

    let envelope = temp_file("envelope", r#"{"status":"ok","items":[{"year":1},{"year":2}]}"#);
    assert_eq!(load_entries(&envelope).expect("envelope").len(), 2);
    fs::remove_file(envelope).expect("cleanup");
}

#[test]
fn rejects_files_without_an_item_list() {
    let scalar = temp_file("scalar", "42");
    assert!(load_entries(&scalar).is_err());
    fs::remove_file(scalar).expect("cleanup");

    let bad_items = temp_file("bad_items", r#"{"items":"none"}"#);
    assert!(load_entries(&bad_items).is_err());
    fs::remove_file(bad_items).expect("cleanup");

    assert!(load_entries(Path::new("/nonexistent/timeline.json")).is_err());
}

//! Duplicate membership repair when a hand-edited groups file is opened.

use groupie::store::{GroupDocument, GroupStore, StoreOptions};
use std::fs;
use tempfile::TempDir;

fn open_raw(raw: &str) -> (TempDir, StoreOptions, GroupStore) {
    let dir = TempDir::new().unwrap();
    let options = StoreOptions::new(dir.path().join("groups.json")).without_lock();
    fs::write(&options.groups_file, raw).unwrap();
    let store = GroupStore::open(&options).unwrap();
    (dir, options, store)
}

#[test]
fn test_first_group_in_file_order_keeps_the_member() {
    let (_dir, options, store) = open_raw(
        r#"{"zeta": ["/shared", "/z"], "alpha": ["/a", "/shared"], "mid": ["/shared"]}"#,
    );

    let groups = store.groups();
    assert_eq!(groups.get("zeta").unwrap().members, vec!["/shared", "/z"]);
    assert_eq!(groups.get("alpha").unwrap().members, vec!["/a"]);
    assert!(groups.get("mid").unwrap().members.is_empty());

    let removals = &store.repair_report().removals;
    assert_eq!(removals.len(), 2);
    assert!(removals.iter().all(|r| r.kept_by == "zeta"));

    let raw = fs::read_to_string(&options.groups_file).unwrap();
    let on_disk = GroupDocument::from_json(&raw, &options.groups_file).unwrap();
    let names: Vec<&str> = on_disk.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_clean_document_is_not_rewritten() {
    let raw = r#"{"a":["/x"],"b":["/y"]}"#;
    let (_dir, options, store) = open_raw(raw);
    assert!(!store.repair_report().changed());
    assert_eq!(fs::read_to_string(&options.groups_file).unwrap(), raw);
}

#[test]
fn test_repeat_within_one_group_collapses() {
    let (_dir, options, store) = open_raw(r#"{"a": ["/x", "/y", "/x"]}"#);
    assert_eq!(store.groups().get("a").unwrap().members, vec!["/x", "/y"]);
    assert_eq!(
        fs::read_to_string(&options.groups_file).unwrap(),
        "{\n  \"a\": [\n    \"/x\",\n    \"/y\"\n  ]\n}"
    );
}

#[test]
fn test_empty_object_loads_as_empty_store() {
    let (_dir, _options, store) = open_raw("{}");
    assert!(store.groups().is_empty());
}

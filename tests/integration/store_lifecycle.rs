//! Group store lifecycle through the library API.

use groupie::error::StoreError;
use groupie::store::{AddOutcome, GroupStore, StoreOptions};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, StoreOptions) {
    let dir = TempDir::new().unwrap();
    let root = dunce::canonicalize(dir.path()).unwrap();
    let options = StoreOptions::new(root.join("groups.json"));
    (dir, root, options)
}

#[test]
fn test_full_lifecycle_across_reopens() {
    let (_dir, root, options) = setup();
    let report = root.join("report.pdf");
    let notes = root.join("notes.txt");
    fs::write(&report, "pdf").unwrap();
    fs::write(&notes, "txt").unwrap();

    {
        let mut store = GroupStore::open(&options).unwrap();
        assert!(store.create_group("docs").unwrap());
        assert!(store.create_group("misc").unwrap());
        let outcome = store.add_files("docs", &[&report, &notes]).unwrap();
        assert_eq!(outcome, AddOutcome { added: 2, already_present: 0 });
    }

    {
        let mut store = GroupStore::open(&options).unwrap();
        store.add_files("misc", &[&notes]).unwrap();
    }

    fs::remove_file(&report).unwrap();
    let mut store = GroupStore::open(&options).unwrap();
    let listing = store.list_groups(false).unwrap();
    assert_eq!(listing[0].name, "docs");
    assert_eq!(listing[0].members.len(), 1);
    assert!(listing[0].members[0].missing);
    assert_eq!(listing[1].members[0].path, notes.to_str().unwrap());

    let cleaned = store.clean_groups().unwrap();
    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned[0].removed, vec![report.to_str().unwrap().to_string()]);
    drop(store);

    let raw = fs::read_to_string(&options.groups_file).unwrap();
    let expected = format!(
        "{{\n  \"docs\": [],\n  \"misc\": [\n    {}\n  ]\n}}",
        serde_json::to_string(notes.to_str().unwrap()).unwrap()
    );
    assert_eq!(raw, expected);
}

#[test]
fn test_failed_add_leaves_file_untouched() {
    let (_dir, root, options) = setup();
    let mut store = GroupStore::open(&options).unwrap();
    store.create_group("docs").unwrap();
    let before = fs::read_to_string(&options.groups_file).unwrap();

    let err = store.add_files("missing", &[root.join("a")]).unwrap_err();
    assert!(matches!(err, StoreError::GroupNotFound(_)));
    assert_eq!(fs::read_to_string(&options.groups_file).unwrap(), before);
}

#[test]
fn test_write_failure_surfaces_as_storage_error() {
    let (_dir, _root, options) = setup();
    let options = options.without_lock();
    let mut store = GroupStore::open(&options).unwrap();

    // Occupy the target with a non-empty directory so the final rename fails.
    fs::create_dir_all(options.groups_file.join("occupied")).unwrap();

    let err = store.create_group("docs").unwrap_err();
    assert!(matches!(err, StoreError::StorageWrite { .. }));
    assert!(options.groups_file.is_dir());
}

#[test]
fn test_lock_serializes_concurrent_writers() {
    let (_dir, _root, options) = setup();
    let options = Arc::new(options);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let options = Arc::clone(&options);
            thread::spawn(move || {
                let mut store = GroupStore::open(&options).unwrap();
                store.create_group(&format!("group-{}", i)).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let store = GroupStore::open(&options).unwrap();
    assert_eq!(store.groups().len(), 8);
    for i in 0..8 {
        assert!(store.groups().contains(&format!("group-{}", i)));
    }
}

//! End-to-end tests for the `gr` binary.

use super::test_utils::{member, stderr, stdout, GrSandbox};
use std::fs;

#[test]
fn test_create_then_duplicate() {
    let sb = GrSandbox::new();

    let output = sb.run(&["create", "docs"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "Group 'docs' created successfully");
    assert_eq!(sb.store_contents().unwrap(), "{\n  \"docs\": []\n}");

    let output = sb.run(&["create", "docs"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: Group 'docs' already exists");
}

#[test]
fn test_add_reports_counts_and_writes_absolute_paths() {
    let sb = GrSandbox::new();
    let a = sb.touch("a.txt");
    sb.touch("b.txt");
    sb.run(&["create", "docs"]);

    let output = sb.run(&["add", "docs", "a.txt", "b.txt"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "Added 2 file(s) to group 'docs'");

    let output = sb.run(&["add", "docs", "a.txt"]);
    assert_eq!(stdout(&output), "1 file(s) were already in group 'docs'");

    let json = sb.store_json();
    assert_eq!(json["docs"][0], member(&a));
    assert_eq!(json["docs"].as_array().unwrap().len(), 2);
}

#[test]
fn test_add_nonexistent_file_fails_without_mutation() {
    let sb = GrSandbox::new();
    sb.touch("a.txt");
    sb.run(&["create", "docs"]);
    let before = sb.store_contents().unwrap();

    let output = sb.run(&["add", "docs", "a.txt", "ghost.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ghost.txt"));
    assert_eq!(sb.store_contents().unwrap(), before);
}

#[test]
fn test_add_to_unknown_group() {
    let sb = GrSandbox::new();
    sb.touch("a.txt");

    let output = sb.run(&["add", "nope", "a.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: Group 'nope' does not exist");
}

#[test]
fn test_add_moves_file_between_groups() {
    let sb = GrSandbox::new();
    let f = sb.touch("f.txt");
    sb.run(&["create", "x"]);
    sb.run(&["create", "y"]);
    sb.run(&["add", "x", "f.txt"]);

    let output = sb.run(&["add", "y", "f.txt"]);
    assert_eq!(stdout(&output), "Added 1 file(s) to group 'y'");

    let json = sb.store_json();
    assert!(json["x"].as_array().unwrap().is_empty());
    assert_eq!(json["y"][0], member(&f));
}

#[test]
fn test_ls_then_clean_missing_files() {
    let sb = GrSandbox::new();
    sb.touch("a.txt");
    let b = sb.touch("b.txt");
    sb.touch("loose.md");
    sb.run(&["create", "docs"]);
    sb.run(&["add", "docs", "a.txt", "b.txt"]);
    fs::remove_file(&b).unwrap();

    let output = sb.run(&["ls"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "loose.md\n\nGroups:\n  docs:\n    a.txt b.txt*"
    );

    let output = sb.run(&["clean", "-y"]);
    assert_eq!(stdout(&output), "Removed 1 missing file(s) from 1 group(s)");
    assert_eq!(sb.store_json()["docs"].as_array().unwrap().len(), 1);

    let output = sb.run(&["clean", "-y"]);
    assert_eq!(stdout(&output), "No missing files found");
}

#[test]
fn test_ls_clean_flag() {
    let sb = GrSandbox::new();
    sb.touch("a.txt");
    let b = sb.touch("b.txt");
    sb.run(&["create", "docs"]);
    sb.run(&["add", "docs", "a.txt", "b.txt"]);
    fs::remove_file(&b).unwrap();

    let output = sb.run(&["ls", "-c", "-n"]);
    assert_eq!(
        stdout(&output),
        "Groups:\n  docs:\n    a.txt b.txt*\n\nRemoved 1 missing file(s)"
    );
    assert_eq!(sb.store_json()["docs"].as_array().unwrap().len(), 1);
}

#[test]
fn test_ls_json_format() {
    let sb = GrSandbox::new();
    let a = sb.touch("a.txt");
    sb.run(&["create", "docs"]);
    sb.run(&["add", "docs", "a.txt"]);
    fs::remove_file(&a).unwrap();

    let output = sb.run(&["ls", "--format", "json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["name"], "docs");
    assert_eq!(
        json[0]["members"][0]["path"],
        sb.work.join("a.txt").to_str().unwrap()
    );
    assert_eq!(json[0]["members"][0]["missing"], true);
}

#[test]
fn test_ls_empty_store_prints_nothing() {
    let sb = GrSandbox::new();
    let output = sb.run(&["ls"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert!(sb.store_contents().is_none());
}

#[test]
fn test_remove_file_and_group() {
    let sb = GrSandbox::new();
    sb.touch("a.txt");
    sb.run(&["create", "docs"]);
    sb.run(&["add", "docs", "a.txt"]);

    let output = sb.run(&["remove-file", "docs", "a.txt"]);
    assert_eq!(stdout(&output), "File removed from group 'docs'");

    let output = sb.run(&["remove-file", "docs", "a.txt"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: File not found in group 'docs'");

    let output = sb.run(&["remove-group", "docs"]);
    assert_eq!(stdout(&output), "Group 'docs' removed");
    assert_eq!(sb.store_contents().unwrap(), "{}");

    let output = sb.run(&["remove-group", "docs"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: Group 'docs' not found");
}

#[test]
fn test_corrupt_store_is_reported_and_preserved() {
    let sb = GrSandbox::new();
    fs::write(&sb.store, "[1, 2, 3]").unwrap();

    let output = sb.run(&["create", "docs"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error: Groups file"));
    assert_eq!(sb.store_contents().unwrap(), "[1, 2, 3]");
}

#[test]
fn test_default_store_lives_in_home() {
    let sb = GrSandbox::new();
    let output = sb
        .command()
        .args(["--quiet", "create", "docs"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(sb.home.join(".file_groups.json").exists());
}

#[test]
fn test_store_flag_overrides_environment() {
    let sb = GrSandbox::new();
    let env_store = sb.dir.path().join("env.json");
    let output = sb
        .command()
        .env("GROUPIE_STORAGE__GROUPS_FILE", &env_store)
        .args(["--quiet", "create", "from-env"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(env_store.exists());

    let output = sb
        .command()
        .env("GROUPIE_STORAGE__GROUPS_FILE", &env_store)
        .arg("--quiet")
        .arg("--store")
        .arg(&sb.store)
        .args(["create", "from-flag"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(sb.store_json().get("from-flag").is_some());
}

//! Configuration loading through the global file, explicit files and the CLI.

use super::test_utils::{stderr, stdout, with_xdg_env, GrSandbox};
use groupie::config::ConfigLoader;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_without_any_config_uses_home_default() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert!(config.storage.groups_file.is_none());
        assert_eq!(
            config.storage.resolve_groups_file().unwrap(),
            test_dir.path().join("home").join(".file_groups.json")
        );
    });
}

#[test]
fn test_global_config_file_is_read() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_dir = test_dir.path().join("config").join("groupie");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[storage]\ngroups_file = \"/srv/groups.json\"\n\n[display]\nshow_hidden = true\n",
        )
        .unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(
            config.storage.groups_file,
            Some(PathBuf::from("/srv/groups.json"))
        );
        assert!(config.display.show_hidden);
        assert!(config.storage.lock);
    });
}

#[test]
fn test_malformed_global_config_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_dir = test_dir.path().join("config").join("groupie");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "[storage\n").unwrap();

        assert!(ConfigLoader::load().is_err());
    });
}

#[test]
fn test_cli_config_flag_selects_store() {
    let sb = GrSandbox::new();
    let store = sb.dir.path().join("configured.json");
    let config_file = sb.dir.path().join("groupie.toml");
    fs::write(
        &config_file,
        format!(
            "[storage]\ngroups_file = {:?}\n",
            store.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = sb
        .command()
        .arg("--quiet")
        .arg("--config")
        .arg(&config_file)
        .args(["create", "docs"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "Group 'docs' created successfully");
    assert!(store.exists());
}

#[test]
fn test_cli_missing_config_file_fails() {
    let sb = GrSandbox::new();
    let output = sb
        .command()
        .arg("--quiet")
        .arg("--config")
        .arg(sb.dir.path().join("absent.toml"))
        .arg("ls")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Configuration file not found"));
}

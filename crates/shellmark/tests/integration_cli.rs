//! Integration tests for the shellmark binary

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const PLACES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xbel>
<xbel xmlns:bookmark="http://www.freedesktop.org/standards/desktop-bookmarks">
 <bookmark href="file:///home/u/music">
  <title>Music</title>
  <info>
   <metadata owner="http://freedesktop.org">
    <bookmark:icon name="folder-music"/>
   </metadata>
  </info>
 </bookmark>
</xbel>
"#;

/// Run the binary against an isolated home directory
fn shellmark(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("shellmark");
    cmd.env("SHELLMARK_HOME", home.path())
        .env_remove("SHELLMARK_NAUTILUS_BOOKMARKS")
        .env_remove("SHELLMARK_DOLPHIN_PLACES")
        .env_remove("SHELLMARK_OWNER")
        .env_remove("SHELLMARK_LOG");
    cmd
}

fn write_places(home: &TempDir) -> PathBuf {
    let path = home.path().join(".local/share/user-places.xbel");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, PLACES).unwrap();
    path
}

#[test]
fn test_add_and_remove_line_list_file() {
    let home = TempDir::new().unwrap();
    let bookmarks = home.path().join("bookmarks");
    fs::write(&bookmarks, "file:///a Alpha\n").unwrap();

    let output = shellmark(&home)
        .arg("add")
        .arg("/b")
        .arg("Beta")
        .arg("--file")
        .arg(&bookmarks)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        fs::read_to_string(&bookmarks).unwrap(),
        "file:///a Alpha\nfile:///b Beta\n"
    );

    let handle_file = home.path().join("handle.json");
    fs::write(&handle_file, &output).unwrap();

    shellmark(&home)
        .arg("remove")
        .arg("--handle-file")
        .arg(&handle_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    assert_eq!(fs::read_to_string(&bookmarks).unwrap(), "file:///a Alpha\n");
}

#[test]
fn test_add_and_remove_dolphin_places() {
    let home = TempDir::new().unwrap();
    let places = write_places(&home);

    let output = shellmark(&home)
        .args(["add", "/home/u/vault", "My Vault", "--shell", "dolphin", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let handle: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(handle["identity"]["kind"], "id");
    let id = handle["identity"]["value"].as_str().unwrap().to_string();

    let content = fs::read_to_string(&places).unwrap();
    assert!(content.contains("<bookmark href=\"file:///home/u/vault\">"));
    assert!(content.contains(&format!("<id>{id}</id>")));

    shellmark(&home)
        .arg("remove")
        .arg(handle.to_string())
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&places).unwrap(), PLACES);

    // Removing again is not an error
    shellmark(&home)
        .arg("remove")
        .arg(handle.to_string())
        .assert()
        .success();
}

#[test]
fn test_add_detects_dolphin_when_nautilus_is_absent() {
    let home = TempDir::new().unwrap();
    let places = write_places(&home);

    shellmark(&home)
        .env("PATH", "")
        .args(["add", "/home/u/vault", "My Vault"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KDE Dolphin Places"))
        .stdout(predicate::str::contains("Handle: {"));
    assert!(fs::read_to_string(&places).unwrap().contains("My Vault"));
}

#[test]
fn test_add_without_any_shell_fails() {
    let home = TempDir::new().unwrap();

    shellmark(&home)
        .env("PATH", "")
        .args(["add", "/home/u/vault", "My Vault"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: No supported file manager detected"));
}

#[test]
fn test_add_to_invalid_places_reports_and_keeps_file() {
    let home = TempDir::new().unwrap();
    let places = home.path().join("places.xbel");
    let broken = "<xbel><bookmark><title>no href</title></bookmark></xbel>";
    fs::write(&places, broken).unwrap();

    shellmark(&home)
        .arg("add")
        .arg("/b")
        .arg("Beta")
        .arg("--file")
        .arg(&places)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not add shortcut to KDE Dolphin Places"))
        .stderr(predicate::str::contains("requires attribute 'href'"));
    assert_eq!(fs::read_to_string(&places).unwrap(), broken);
}

#[test]
fn test_add_over_size_limit_fails() {
    let home = TempDir::new().unwrap();
    let bookmarks = home.path().join("bookmarks");
    fs::write(&bookmarks, "x".repeat(5000)).unwrap();

    shellmark(&home)
        .arg("add")
        .arg("/b")
        .arg("Beta")
        .arg("--shell")
        .arg("nautilus")
        .arg("--file")
        .arg(&bookmarks)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds size of 4096 bytes"));
}

#[test]
fn test_remove_rejects_malformed_handle() {
    let home = TempDir::new().unwrap();

    shellmark(&home)
        .args(["remove", "not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid handle"));
}

#[test]
fn test_remove_requires_a_handle() {
    let home = TempDir::new().unwrap();
    shellmark(&home).arg("remove").assert().failure();
}

#[test]
fn test_probe_json_lists_shells_by_priority() {
    let home = TempDir::new().unwrap();
    write_places(&home);

    let output = shellmark(&home)
        .env("PATH", "")
        .args(["probe", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let shells: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    assert_eq!(shells.len(), 2);
    assert_eq!(shells[0]["shell"], "nautilus");
    assert_eq!(shells[0]["supported"], false);
    assert_eq!(shells[1]["shell"], "dolphin");
    assert_eq!(shells[1]["supported"], true);
}

#[test]
fn test_config_reflects_file_and_env() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config/shellmark");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[core]\nicon = \"folder-lock\"\n[nautilus]\nmax_size = 8192\n",
    )
    .unwrap();

    let output = shellmark(&home)
        .env("SHELLMARK_OWNER", "urn:example")
        .args(["config", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(config["configFile"]["exists"], true);
    assert_eq!(config["owner"], "urn:example");
    assert_eq!(config["icon"], "folder-lock");
    assert_eq!(config["shells"]["nautilus"]["maxSize"], 8192);
    assert_eq!(config["shells"]["dolphin"]["maxSize"], 1048576);
}

#[test]
fn test_config_text_output() {
    let home = TempDir::new().unwrap();

    shellmark(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("(not found)"))
        .stdout(predicate::str::contains("owner: https://shellmark.dev"));
}

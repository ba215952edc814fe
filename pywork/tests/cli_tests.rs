//! Integration tests for pywork CLI commands.
//!
//! Only the filesystem-facing commands are exercised here; anything that
//! spawns the Python toolchain is covered by unit tests of the plumbing.

use pywork::commands::{clean, list, test as test_cmd};
use pywork::venv::{Venv, VenvState};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a package checkout with a pyproject manifest declaring `deps`.
fn make_package(workspace: &Path, name: &str, deps: &[&str]) -> PathBuf {
    let dir = workspace.join(name);
    fs::create_dir_all(&dir).unwrap();
    let dep_lines: String = deps
        .iter()
        .map(|d| format!("    \"{}>=0.1\",\n", d))
        .collect();
    fs::write(
        dir.join("pyproject.toml"),
        format!(
            "[project]\nname = \"{}\"\ndependencies = [\n{}]\n",
            name, dep_lines
        ),
    )
    .unwrap();
    dir
}

fn workspace() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

// ─── list ────────────────────────────────────────────────────────────────────

#[test]
fn test_list_resolves_closure() {
    let ws = workspace();
    make_package(ws.path(), "libdata", &[]);
    let app = make_package(ws.path(), "app", &["libdata", "requests"]);

    let result = list::cmd_list(app.to_str().unwrap(), false);
    assert!(result.is_ok());
    let json = list::cmd_list(app.to_str().unwrap(), true);
    assert!(json.is_ok());
}

#[test]
fn test_list_fails_without_manifest() {
    let ws = workspace();
    let bare = ws.path().join("bare");
    fs::create_dir_all(&bare).unwrap();

    assert!(list::cmd_list(bare.to_str().unwrap(), false).is_err());
}

// ─── clean ───────────────────────────────────────────────────────────────────

#[test]
fn test_clean_removes_metadata_across_closure() {
    let ws = workspace();
    let lib = make_package(ws.path(), "libdata", &[]);
    let app = make_package(ws.path(), "app", &["libdata"]);

    fs::create_dir_all(app.join("app.egg-info")).unwrap();
    fs::create_dir_all(app.join("src").join("__pycache__")).unwrap();
    fs::create_dir_all(lib.join("libdata.egg-info")).unwrap();
    fs::create_dir_all(lib.join(".pytest_cache")).unwrap();

    clean::cmd_clean(app.to_str().unwrap(), None, false, false, true).unwrap();

    assert!(!app.join("app.egg-info").exists());
    assert!(!app.join("src").join("__pycache__").exists());
    assert!(!lib.join("libdata.egg-info").exists());
    assert!(!lib.join(".pytest_cache").exists());
}

#[test]
fn test_clean_dry_run_removes_nothing() {
    let ws = workspace();
    let app = make_package(ws.path(), "app", &[]);
    fs::create_dir_all(app.join("app.egg-info")).unwrap();

    clean::cmd_clean(app.to_str().unwrap(), None, false, true, true).unwrap();

    assert!(app.join("app.egg-info").exists());
}

#[test]
fn test_clean_spares_the_venv_by_default() {
    let ws = workspace();
    let app = make_package(ws.path(), "app", &[]);
    fs::create_dir_all(app.join("venv").join("__pycache__")).unwrap();
    fs::create_dir_all(app.join("app.egg-info")).unwrap();

    clean::cmd_clean(app.to_str().unwrap(), None, false, false, true).unwrap();

    assert!(app.join("venv").join("__pycache__").exists());
    assert!(!app.join("app.egg-info").exists());
}

#[test]
fn test_clean_venv_flag_removes_environment() {
    let ws = workspace();
    let app = make_package(ws.path(), "app", &[]);
    let env = Venv::at(&app, "venv");
    fs::create_dir_all(env.root()).unwrap();
    env.write_state(&VenvState::new(None, "python3", "venv"))
        .unwrap();

    // --force skips the confirmation prompt.
    clean::cmd_clean(app.to_str().unwrap(), None, true, false, true).unwrap();

    assert!(!env.root().exists());
}

// ─── test ────────────────────────────────────────────────────────────────────

#[test]
fn test_test_requires_complete_venv() {
    let ws = workspace();
    let app = make_package(ws.path(), "app", &[]);

    let err = test_cmd::cmd_test(app.to_str().unwrap(), None, &[]).unwrap_err();
    assert!(err.to_string().contains("pywork install"));

    // A bare directory without the state file is still incomplete.
    fs::create_dir_all(app.join("venv")).unwrap();
    assert!(test_cmd::cmd_test(app.to_str().unwrap(), None, &[]).is_err());
}

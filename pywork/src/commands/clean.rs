//! `pywork clean` — strip generated metadata from a package and its local
//! dependency closure, top-down.
//!
//! Removes `*.egg-info`, `__pycache__` and `.pytest_cache` directories.
//! With `--venv` the virtual environment goes too.

use anyhow::{Context, Result};
use pywork_core::config::RuntimeConfig;
use pywork_core::package::DependencyClosure;
use std::fs;
use std::path::{Path, PathBuf};

use crate::venv::Venv;

/// Directory names removed wherever they appear in a checkout.
const METADATA_DIR_NAMES: &[&str] = &["__pycache__", ".pytest_cache"];

/// Remove `*.egg-info` directories from a checkout (top level and `src/`).
/// Returns how many were removed.
pub fn remove_egg_info(package_dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for dir in egg_info_dirs(package_dir) {
        fs::remove_dir_all(&dir)
            .with_context(|| format!("failed to remove {}", dir.display()))?;
        removed += 1;
    }
    Ok(removed)
}

fn egg_info_dirs(package_dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for base in [package_dir.to_path_buf(), package_dir.join("src")] {
        let Ok(entries) = fs::read_dir(&base) else {
            continue;
        };
        let mut children: Vec<_> = entries.flatten().collect();
        children.sort_by_key(|e| e.file_name());
        for entry in children {
            let p = entry.path();
            if p.is_dir() && entry.file_name().to_string_lossy().ends_with(".egg-info") {
                found.push(p);
            }
        }
    }
    found
}

/// Recursively collect metadata directories under `dir`, skipping the venv
/// directory and VCS internals. Matched directories are not descended into.
fn collect_metadata_dirs(dir: &Path, venv_name: &str, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut children: Vec<_> = entries.flatten().collect();
    children.sort_by_key(|e| e.file_name());
    for entry in children {
        let p = entry.path();
        if !p.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name == venv_name || name == ".git" {
            continue;
        }
        if name.ends_with(".egg-info") || METADATA_DIR_NAMES.contains(&name.as_str()) {
            out.push(p);
        } else {
            collect_metadata_dirs(&p, venv_name, out);
        }
    }
}

/// `pywork clean`
pub fn cmd_clean(
    path: &str,
    venv_dir: Option<&str>,
    remove_venv: bool,
    dry_run: bool,
    force: bool,
) -> Result<()> {
    let cfg = RuntimeConfig::from_env();
    let dir_name = venv_dir.unwrap_or(&cfg.venv_dir);

    let closure = DependencyClosure::resolve(Path::new(path))
        .with_context(|| format!("resolving local dependencies of {}", path))?;

    let mut targets: Vec<PathBuf> = Vec::new();
    for member in closure.clean_order() {
        collect_metadata_dirs(&member.root, dir_name, &mut targets);
    }

    let env = Venv::at(&closure.root().root, dir_name);
    if remove_venv && env.exists() {
        targets.push(env.root().to_path_buf());
    }

    if targets.is_empty() {
        eprintln!("Nothing to clean.");
        return Ok(());
    }

    let mut total_size: u64 = 0;
    eprintln!("🗂  Generated metadata in {} package(s):", closure.len());
    eprintln!();
    for target in &targets {
        let size = dir_size(target);
        total_size += size;
        eprintln!("  • {} ({})", target.display(), format_size(size));
    }
    eprintln!();
    eprintln!("Total: {} ({} directories)", format_size(total_size), targets.len());

    if dry_run {
        eprintln!();
        eprintln!("(Dry run — no files removed. Remove --dry-run to delete.)");
        return Ok(());
    }

    if remove_venv && !force {
        eprint!("\nAlso remove the virtual environment? [y/N] ");
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let mut removed = 0;
    let mut errors = 0;
    for target in &targets {
        match fs::remove_dir_all(target) {
            Ok(()) => removed += 1,
            Err(e) => {
                eprintln!("  ✗ Failed to remove {}: {}", target.display(), e);
                errors += 1;
            }
        }
    }

    eprintln!();
    if errors == 0 {
        eprintln!(
            "✓ Removed {} directory(ies), freed {}",
            removed,
            format_size(total_size)
        );
    } else {
        eprintln!("⚠ Removed {}/{} directories ({} errors)", removed, targets.len(), errors);
    }

    Ok(())
}

/// Compute total size of a directory recursively.
fn dir_size(path: &Path) -> u64 {
    let mut total: u64 = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                total += dir_size(&p);
            } else if let Ok(meta) = p.metadata() {
                total += meta.len();
            }
        }
    }
    total
}

/// Format byte size to human-readable string.
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

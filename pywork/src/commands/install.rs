//! `pywork install` — recursive editable install of a package and its local
//! sibling dependencies.
//!
//! The closure is installed bottom-up (dependencies first), then the
//! egg-info metadata the editable installs generate is stripped top-down.

use anyhow::{Context, Result};
use pywork_core::config::RuntimeConfig;
use pywork_core::package::DependencyClosure;
use std::fs;
use std::path::Path;

use super::clean;
use crate::venv::{self, VenvState};

/// `pywork install` (and, with `upgrade`, the install half of `pywork update`)
pub fn cmd_install(
    path: &str,
    python: Option<&str>,
    venv_dir: Option<&str>,
    upgrade: bool,
    force: bool,
) -> Result<()> {
    let cfg = RuntimeConfig::from_env();
    let python = python.unwrap_or(&cfg.python);
    let dir_name = venv_dir.unwrap_or(&cfg.venv_dir);

    let closure = DependencyClosure::resolve(Path::new(path))
        .with_context(|| format!("resolving local dependencies of {}", path))?;
    tracing::info!(packages = closure.len(), "resolved local dependency closure");

    let project = closure.root().root.clone();
    let (env, created) = venv::ensure_venv(&project, dir_name, python, false)?;

    let hash = closure.install_set_hash();
    if !force && !upgrade {
        if let Some(state) = env.state() {
            if state.install_hash.as_deref() == Some(hash.as_str()) {
                eprintln!(
                    "✓ Environment already up to date ({} package(s), use --force to reinstall)",
                    closure.len()
                );
                return Ok(());
            }
        }
    }

    for member in closure.install_order() {
        eprintln!("  • installing {} (editable)", member.name);
        if let Err(e) = venv::editable_install(&env, &member.root, upgrade, &member.name) {
            if created {
                // Remove the environment this run created; the next run
                // starts from scratch.
                let _ = fs::remove_dir_all(env.root());
            }
            return Err(e).with_context(|| format!("installing {}", member.name));
        }
    }

    // Editable installs leave egg-info behind; strip it top-down.
    for member in closure.clean_order() {
        let removed = clean::remove_egg_info(&member.root)?;
        if removed > 0 {
            tracing::debug!(package = %member.name, removed, "stripped egg-info");
        }
    }

    let operation = if upgrade { "update" } else { "install" };
    env.write_state(&VenvState::new(Some(hash), python, operation))?;

    eprintln!(
        "✓ Installed {} package(s) editable into {}",
        closure.len(),
        env.root().display()
    );
    Ok(())
}

//! `pywork venv` — ensure the project virtual environment exists.

use anyhow::{Context, Result};
use pywork_core::config::RuntimeConfig;
use std::path::Path;

use crate::venv;

/// `pywork venv`
pub fn cmd_venv(
    path: &str,
    python: Option<&str>,
    venv_dir: Option<&str>,
    clear: bool,
) -> Result<()> {
    let cfg = RuntimeConfig::from_env();
    let python = python.unwrap_or(&cfg.python);
    let dir_name = venv_dir.unwrap_or(&cfg.venv_dir);

    let project = Path::new(path)
        .canonicalize()
        .with_context(|| format!("no such package directory: {}", path))?;

    let (env, created) = venv::ensure_venv(&project, dir_name, python, clear)?;
    if created {
        eprintln!("✓ Created virtual environment at {}", env.root().display());
    } else {
        eprintln!(
            "✓ Virtual environment already present at {}",
            env.root().display()
        );
    }
    println!("{}", env.activate_hint());
    Ok(())
}

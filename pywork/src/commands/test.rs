//! `pywork test` — run pytest inside the project virtual environment.

use anyhow::{Context, Result};
use pywork_core::config::RuntimeConfig;
use std::path::Path;

use crate::venv::Venv;

/// `pywork test` — returns pytest's exit code.
pub fn cmd_test(path: &str, venv_dir: Option<&str>, args: &[String]) -> Result<i32> {
    let cfg = RuntimeConfig::from_env();
    let dir_name = venv_dir.unwrap_or(&cfg.venv_dir);

    let project = Path::new(path)
        .canonicalize()
        .with_context(|| format!("no such package directory: {}", path))?;

    let env = Venv::at(&project, dir_name);
    if !env.is_complete() {
        anyhow::bail!(
            "no virtual environment at {} — run `pywork install` first",
            env.root().display()
        );
    }

    crate::venv::run_pytest(&env, &project, args)
}

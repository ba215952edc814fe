//! `pywork update` — re-run the editable install with `--upgrade` so remote
//! requirements move to their newest allowed versions.

use anyhow::Result;

use super::install;

/// `pywork update`
pub fn cmd_update(path: &str, python: Option<&str>, venv_dir: Option<&str>) -> Result<()> {
    install::cmd_install(path, python, venv_dir, true, false)
}

//! Virtual environment lifecycle and Python toolchain invocation.
//!
//! A venv is *complete* only when its state file exists; the state file is
//! written last, so a directory without one is a partial creation and gets
//! removed before reuse.

use anyhow::{Context, Result};
use pywork_core::observability;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

/// State file inside the venv. Doubles as the completeness marker.
pub const STATE_FILE: &str = ".pywork-state.json";

/// Recorded after every successful venv operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenvState {
    /// Hash of the editable-install set; `None` until the first install.
    #[serde(default)]
    pub install_hash: Option<String>,
    /// Interpreter the environment was created with.
    pub python: String,
    pub written_at: String,
    /// Operation that wrote the state: "venv", "install" or "update".
    pub operation: String,
}

impl VenvState {
    pub fn new(install_hash: Option<String>, python: &str, operation: &str) -> Self {
        Self {
            install_hash,
            python: python.to_string(),
            written_at: chrono::Utc::now().to_rfc3339(),
            operation: operation.to_string(),
        }
    }
}

/// A project virtual environment directory.
#[derive(Debug, Clone)]
pub struct Venv {
    root: PathBuf,
}

impl Venv {
    pub fn at(project: &Path, dir_name: &str) -> Self {
        Self {
            root: project.join(dir_name),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// True when the environment exists and its state file was written.
    pub fn is_complete(&self) -> bool {
        self.exists() && self.root.join(STATE_FILE).is_file()
    }

    pub fn state(&self) -> Option<VenvState> {
        let content = fs::read_to_string(self.root.join(STATE_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn write_state(&self, state: &VenvState) -> Result<()> {
        let path = self.root.join(STATE_FILE);
        fs::write(&path, serde_json::to_string_pretty(state)? + "\n")
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Path to pip inside the environment.
    pub fn pip_path(&self) -> PathBuf {
        if cfg!(target_os = "windows") {
            self.root.join("Scripts").join("pip")
        } else {
            self.root.join("bin").join("pip")
        }
    }

    /// Path to python inside the environment.
    pub fn python_path(&self) -> PathBuf {
        if cfg!(target_os = "windows") {
            self.root.join("Scripts").join("python")
        } else {
            self.root.join("bin").join("python")
        }
    }

    /// Shell line that activates the environment.
    pub fn activate_hint(&self) -> String {
        if cfg!(target_os = "windows") {
            format!(r"{}\Scripts\activate", self.root.display())
        } else {
            format!("source {}/bin/activate", self.root.display())
        }
    }
}

/// Ensure the virtual environment for `project` exists and is complete.
///
/// An existing incomplete environment (no state file) is removed and
/// recreated; `clear` forces recreation either way. Returns the venv and
/// whether this call created it.
pub fn ensure_venv(
    project: &Path,
    dir_name: &str,
    python: &str,
    clear: bool,
) -> Result<(Venv, bool)> {
    let venv = Venv::at(project, dir_name);

    if venv.exists() {
        if !clear && venv.is_complete() {
            return Ok((venv, false));
        }
        if !venv.is_complete() {
            tracing::warn!(
                venv = %venv.root().display(),
                "removing incomplete virtual environment"
            );
        }
        fs::remove_dir_all(venv.root())
            .with_context(|| format!("failed to remove {}", venv.root().display()))?;
    }

    create_venv(&venv, python, project)?;
    venv.write_state(&VenvState::new(None, python, "venv"))?;
    Ok((venv, true))
}

fn create_venv(venv: &Venv, python: &str, project: &Path) -> Result<()> {
    let target = venv.root();
    let target_str = target.to_string_lossy();
    let project_name = dir_label(project);

    observability::audit_command_invoked(
        &project_name,
        python,
        &["-m", "venv", target_str.as_ref()],
        &project.to_string_lossy(),
    );
    let started = Instant::now();
    let output = Command::new(python)
        .args(["-m", "venv"])
        .arg(target)
        .output()
        .with_context(|| format!("failed to execute {} -m venv", python))?;
    observability::audit_command_completed(
        &project_name,
        python,
        output.status.code().unwrap_or(-1),
        started.elapsed().as_millis() as u64,
    );

    if !output.status.success() {
        // Remove the partially created environment before failing.
        if target.exists() {
            let _ = fs::remove_dir_all(target);
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("failed to create virtual environment: {}", stderr);
    }

    Ok(())
}

/// Install `package_dir` into the environment in editable mode.
pub fn editable_install(venv: &Venv, package_dir: &Path, upgrade: bool, label: &str) -> Result<()> {
    let pip = venv.pip_path();
    let mut args: Vec<&str> = vec!["install", "--disable-pip-version-check"];
    if upgrade {
        args.push("--upgrade");
    }
    args.push("-e");
    args.push(".");

    observability::audit_command_invoked(
        label,
        &pip.to_string_lossy(),
        &args,
        &package_dir.to_string_lossy(),
    );
    let started = Instant::now();
    let output = Command::new(&pip)
        .args(&args)
        .current_dir(package_dir)
        .output()
        .with_context(|| format!("failed to execute {}", pip.display()))?;
    observability::audit_command_completed(
        label,
        &pip.to_string_lossy(),
        output.status.code().unwrap_or(-1),
        started.elapsed().as_millis() as u64,
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("editable install of {} failed: {}", label, stderr);
    }

    Ok(())
}

/// Run pytest in `package_dir` with the environment's interpreter.
/// Output goes straight to the terminal; returns pytest's exit code.
pub fn run_pytest(venv: &Venv, package_dir: &Path, extra_args: &[String]) -> Result<i32> {
    let python = venv.python_path();
    let mut args: Vec<String> = vec!["-m".into(), "pytest".into()];
    args.extend(extra_args.iter().cloned());

    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let label = dir_label(package_dir);
    observability::audit_command_invoked(
        &label,
        &python.to_string_lossy(),
        &arg_refs,
        &package_dir.to_string_lossy(),
    );
    let started = Instant::now();
    let status = Command::new(&python)
        .args(&args)
        .current_dir(package_dir)
        .status()
        .with_context(|| format!("failed to execute {}", python.display()))?;
    let code = status.code().unwrap_or(1);
    observability::audit_command_completed(
        &label,
        &python.to_string_lossy(),
        code,
        started.elapsed().as_millis() as u64,
    );

    Ok(code)
}

fn dir_label(dir: &Path) -> String {
    dir.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let venv = Venv::at(tmp.path(), "venv");
        fs::create_dir_all(venv.root()).unwrap();

        assert!(!venv.is_complete());
        venv.write_state(&VenvState::new(Some("abc123".into()), "python3", "install"))
            .unwrap();
        assert!(venv.is_complete());

        let state = venv.state().unwrap();
        assert_eq!(state.install_hash.as_deref(), Some("abc123"));
        assert_eq!(state.operation, "install");
    }

    #[test]
    fn test_paths_inside_venv() {
        let venv = Venv::at(Path::new("/proj"), "venv");
        if cfg!(target_os = "windows") {
            assert!(venv.pip_path().ends_with("Scripts/pip"));
        } else {
            assert!(venv.pip_path().ends_with("bin/pip"));
            assert!(venv.python_path().ends_with("bin/python"));
        }
    }
}

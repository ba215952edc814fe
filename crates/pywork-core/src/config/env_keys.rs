//! Environment variable key constants.
//!
//! All `PYWORK_*` keys live here so business code never hardcodes a key string.

/// Python interpreter used to create virtual environments (default: `python3`).
pub const PYWORK_PYTHON: &str = "PYWORK_PYTHON";

/// Name of the virtual environment directory inside a project (default: `venv`).
pub const PYWORK_VENV_DIR: &str = "PYWORK_VENV_DIR";

/// Observability and logging.
pub mod observability {
    pub const PYWORK_QUIET: &str = "PYWORK_QUIET";

    pub const PYWORK_LOG_LEVEL: &str = "PYWORK_LOG_LEVEL";

    pub const PYWORK_LOG_JSON: &str = "PYWORK_LOG_JSON";

    /// JSONL file recording every external command invocation. Unset = disabled.
    pub const PYWORK_AUDIT_LOG: &str = "PYWORK_AUDIT_LOG";
}

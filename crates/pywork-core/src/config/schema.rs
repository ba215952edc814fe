//! Structured configuration read from the environment.

use super::env_keys;
use super::loader::{env_bool, env_optional, env_or};

/// Observability configuration (logging, audit trail).
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| {
            super::loader::load_dotenv();
            let quiet = env_bool(env_keys::observability::PYWORK_QUIET, false);
            let log_level = env_or(env_keys::observability::PYWORK_LOG_LEVEL, || {
                "pywork=info".to_string()
            });
            let log_json = env_bool(env_keys::observability::PYWORK_LOG_JSON, false);
            let audit_log = env_optional(env_keys::observability::PYWORK_AUDIT_LOG);
            Self {
                quiet,
                log_level,
                log_json,
                audit_log,
            }
        })
    }
}

/// Runtime defaults for the Python toolchain.
///
/// Not cached: CLI flags override these per invocation and tests mutate the
/// environment.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Interpreter used for `-m venv` (default `python3`).
    pub python: String,
    /// Virtual environment directory name inside a project (default `venv`).
    pub venv_dir: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        super::loader::load_dotenv();
        Self {
            python: env_or(env_keys::PYWORK_PYTHON, || "python3".to_string()),
            venv_dir: env_or(env_keys::PYWORK_VENV_DIR, || "venv".to_string()),
        }
    }
}

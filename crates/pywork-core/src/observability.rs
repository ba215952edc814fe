//! Observability: tracing init and the external-command audit log.
//!
//! Uses `config::ObservabilityConfig` for `PYWORK_QUIET`, `PYWORK_LOG_LEVEL`,
//! `PYWORK_AUDIT_LOG`, etc.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call at process startup.
/// When `PYWORK_QUIET=1`, only WARN and above are logged.
pub fn init_tracing() {
    let cfg = crate::config::ObservabilityConfig::from_env();
    let level: String = if cfg.quiet {
        "pywork=warn".to_string()
    } else {
        cfg.log_level.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

fn get_audit_path() -> Option<String> {
    let path = crate::config::ObservabilityConfig::from_env()
        .audit_log
        .clone()?;
    if path.is_empty() {
        return None;
    }
    // Ensure parent dir exists
    if let Some(parent) = Path::new(&path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    Some(path)
}

fn append_jsonl(path: &str, record: &serde_json::Value) {
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(path) {
        if let Ok(line) = serde_json::to_string(record) {
            let _ = writeln!(f, "{}", line);
        }
    }
}

/// Audit: command_invoked — right before an external tool is spawned.
pub fn audit_command_invoked(package: &str, cmd: &str, args: &[&str], cwd: &str) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "event": "command_invoked",
            "package": package,
            "cmd": cmd,
            "args": args,
            "cwd": cwd,
        });
        append_jsonl(&path, &record);
    }
}

/// Audit: command_completed — after the external tool returned.
pub fn audit_command_completed(package: &str, cmd: &str, exit_code: i32, duration_ms: u64) {
    if let Some(path) = get_audit_path() {
        let record = json!({
            "ts": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            "event": "command_completed",
            "package": package,
            "cmd": cmd,
            "exit_code": exit_code,
            "duration_ms": duration_ms,
            "success": exit_code == 0,
        });
        append_jsonl(&path, &record);
    }
}

//! Environment variable loading helpers.
//!
//! Fallback chains are maintained here so business code does not repeat
//! `or_else` calls against `std::env::var`.

use std::env;

/// Load `.env` from the current directory into the environment (existing
/// variables are never overridden). Runs at most once per process.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        if let Ok(content) = std::fs::read_to_string(&path) {
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some(eq_pos) = line.find('=') {
                    let key = line[..eq_pos].trim();
                    let mut value = line[eq_pos + 1..].trim();
                    // Strip inline comment (# not inside quotes)
                    if let Some(hash_pos) = value.find('#') {
                        let before_hash = value[..hash_pos].trim_end();
                        if !before_hash.contains('"') && !before_hash.contains('\'') {
                            value = before_hash;
                        }
                    }
                    if (value.starts_with('"') && value.ends_with('"'))
                        || (value.starts_with('\'') && value.ends_with('\''))
                    {
                        value = &value[1..value.len() - 1];
                    }
                    if !key.is_empty() && env::var(key).is_err() {
                        #[allow(unsafe_code)]
                        unsafe {
                            env::set_var(key, value);
                        }
                    }
                }
            }
        }
    });
}

/// Read an environment variable, falling back to `default` when unset or empty.
pub fn env_or<F>(key: &str, default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(key)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Read an optional environment variable; empty values count as unset.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a boolean environment variable ("1" / "true" are truthy).
pub fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => v == "1" || v.eq_ignore_ascii_case("true"),
        Err(_) => default,
    }
}

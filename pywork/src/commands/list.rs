//! `pywork list` — show the local dependency closure and install order.

use anyhow::{Context, Result};
use pywork_core::package::DependencyClosure;
use std::path::Path;

/// `pywork list`
pub fn cmd_list(path: &str, json_output: bool) -> Result<()> {
    let closure = DependencyClosure::resolve(Path::new(path))
        .with_context(|| format!("resolving local dependencies of {}", path))?;

    if json_output {
        let members: Vec<_> = closure.install_order().collect();
        println!("{}", serde_json::to_string_pretty(&members)?);
        return Ok(());
    }

    eprintln!("📦 {} package(s), install order (bottom-up):", closure.len());
    eprintln!();
    for (i, member) in closure.install_order().enumerate() {
        eprintln!("  {}. {}", i + 1, member.name);
        eprintln!("     path: {}", member.root.display());
        if !member.local_deps.is_empty() {
            eprintln!("     local:  {}", member.local_deps.join(", "));
        }
        if !member.remote_deps.is_empty() {
            eprintln!("     remote: {}", member.remote_deps.join(", "));
        }
        eprintln!();
    }

    Ok(())
}

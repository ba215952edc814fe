//! pywork CLI library — command implementations, shared with the
//! integration tests.

pub mod cli;
pub mod commands;
pub mod venv;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

/// Run the CLI — parses args and dispatches to command handlers.
pub fn run_cli() -> Result<()> {
    pywork_core::observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Venv {
            path,
            python,
            venv_dir,
            clear,
        } => commands::venv::cmd_venv(&path, python.as_deref(), venv_dir.as_deref(), clear),

        Commands::Install {
            path,
            python,
            venv_dir,
            force,
        } => commands::install::cmd_install(
            &path,
            python.as_deref(),
            venv_dir.as_deref(),
            false,
            force,
        ),

        Commands::Test {
            path,
            venv_dir,
            args,
        } => {
            let code = commands::test::cmd_test(&path, venv_dir.as_deref(), &args)?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }

        Commands::Update {
            path,
            python,
            venv_dir,
        } => commands::update::cmd_update(&path, python.as_deref(), venv_dir.as_deref()),

        Commands::Clean {
            path,
            venv_dir,
            venv,
            dry_run,
            force,
        } => commands::clean::cmd_clean(&path, venv_dir.as_deref(), venv, dry_run, force),

        Commands::List { path, json } => commands::list::cmd_list(&path, json),
    }
}

use clap::{Parser, Subcommand};

/// pywork — workspace helper for Python development
#[derive(Parser, Debug)]
#[command(name = "pywork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the project virtual environment and print how to activate it
    Venv {
        /// Path to the package directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: String,

        /// Python interpreter used to create the environment
        #[arg(long, env = "PYWORK_PYTHON")]
        python: Option<String>,

        /// Virtual environment directory name
        #[arg(long, env = "PYWORK_VENV_DIR")]
        venv_dir: Option<String>,

        /// Recreate the environment from scratch
        #[arg(long)]
        clear: bool,
    },

    /// Install a package and its local sibling dependencies in editable mode
    ///
    /// Dependencies declared in pyproject.toml / setup.cfg that exist as
    /// sibling checkouts are installed editable, bottom-up, before the
    /// package itself. Everything else is left to pip. Metadata directories
    /// generated by the editable installs are stripped afterwards.
    ///
    /// Examples:
    ///   pywork install
    ///   pywork install ../service-control --force
    Install {
        /// Path to the package directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: String,

        /// Python interpreter used to create the environment
        #[arg(long, env = "PYWORK_PYTHON")]
        python: Option<String>,

        /// Virtual environment directory name
        #[arg(long, env = "PYWORK_VENV_DIR")]
        venv_dir: Option<String>,

        /// Reinstall even when the environment already matches
        #[arg(long, short)]
        force: bool,
    },

    /// Run the package test suite inside the virtual environment
    ///
    /// Arguments after `--` are forwarded to pytest:
    ///   pywork test -- -k test_login -x
    Test {
        /// Path to the package directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: String,

        /// Virtual environment directory name
        #[arg(long, env = "PYWORK_VENV_DIR")]
        venv_dir: Option<String>,

        /// Arguments forwarded to pytest
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Re-run the editable install, upgrading remote requirements
    Update {
        /// Path to the package directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: String,

        /// Python interpreter used to create the environment
        #[arg(long, env = "PYWORK_PYTHON")]
        python: Option<String>,

        /// Virtual environment directory name
        #[arg(long, env = "PYWORK_VENV_DIR")]
        venv_dir: Option<String>,
    },

    /// Strip generated metadata from the package and its local dependencies
    ///
    /// Removes `*.egg-info`, `__pycache__` and `.pytest_cache` directories
    /// across the whole local closure, top-down.
    Clean {
        /// Path to the package directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: String,

        /// Virtual environment directory name
        #[arg(long, env = "PYWORK_VENV_DIR")]
        venv_dir: Option<String>,

        /// Also remove the virtual environment
        #[arg(long)]
        venv: bool,

        /// Show what would be removed without deleting
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Show the local dependency closure and install order
    #[command(name = "list", alias = "ls")]
    List {
        /// Path to the package directory (default: current directory)
        #[arg(value_name = "PATH", default_value = ".")]
        path: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

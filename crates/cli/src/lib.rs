//! hookstack CLI library
//!
//! All CLI logic lives here so the binary stays a thin wrapper and the
//! commands can be driven from tests.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hookstack_config::Config;
use hookstack_config::dirs::{default_global_hooks_dir, expand_tilde, home_dir};
use hookstack_core::error::EXIT_FAILURE;
use hookstack_engine::Identity;
use std::path::{Path, PathBuf};

use command::Command;
use common::RuntimeContext;
use error::CommandError;

/// hookstack - layered git hooks
#[derive(Parser, Debug)]
#[command(name = "hookstack")]
#[command(about = "Run per-user, per-project and global git hooks for every event")]
#[command(version)]
#[command(long_about = "Run per-user, per-project and global git hooks for every event

hookstack installs itself as the only hook git runs. When an event fires it
runs, in order, every executable script in:

  .hookstack/hooks/user/<you>/<event>/   your own hooks for this repository
  .hookstack/hooks/project/<event>/      hooks shared with the whole team
  ~/.hookstack/hooks/global/<event>/     your hooks for every repository

The first hook that fails stops the rest. Rename a script to end in
.disabled to skip it.")]
pub struct Cli {
    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "HOOKSTACK_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, env = "HOOKSTACK_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Root of the global hook tree (default: ~/.hookstack/hooks/global)
    #[arg(long, env = "HOOKSTACK_GLOBAL_DIR", value_name = "DIR")]
    pub global_dir: Option<PathBuf>,

    /// Kill hooks that run longer than this many seconds (0 = never)
    #[arg(long, env = "HOOKSTACK_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the hookstack CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every eligible hook, per source
    List(cmd::list::ListCommand),

    /// Set up hook directories and forwarding stubs in this repository
    #[command(long_about = "Set up hook directories and forwarding stubs in this repository

Creates .hookstack/hooks/user/<you>/ and .hookstack/hooks/project/ with one
folder per git event, moves existing git hooks into the project tree as
<event>.original, and points every git hook at hookstack.

Safe to run again: existing hooks are kept and the stubs are rewritten.")]
    Install(cmd::install::InstallCommand),

    /// Run all hooks for an event (called by the forwarding stubs)
    Run(cmd::run::RunCommand),
}

/// Main entry point for the CLI logic
///
/// Returns the process exit code: 0 on success, or the code of the first
/// failing hook for `run`.
pub fn run(cli: Cli) -> Result<i32> {
    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let log_file = cli.log_file.clone().or_else(|| config.log_file.clone());
    hookstack_config::logging::init(cli.verbose, log_file.as_deref())
        .context("Failed to initialize logging")?;

    let global_root = resolve_global_root(cli.global_dir.as_deref(), &config)?;
    let timeout = config.effective_timeout(cli.timeout);

    let context = RuntimeContext::new(Identity::resolve(), &global_root, timeout);
    tracing::debug!(
        repo = ?context.identity.repo_root(),
        user = ?context.identity.user,
        global = %global_root.display(),
        "Resolved runtime context"
    );

    execute_command(&cli.command, &context)
}

/// Execute a command with the runtime context
fn execute_command(command: &Commands, context: &RuntimeContext) -> Result<i32> {
    let result = match command {
        Commands::List(cmd) => cmd.execute(context).map(|()| 0),
        Commands::Install(cmd) => cmd.execute(context).map(|()| 0),
        Commands::Run(cmd) => cmd.execute(context),
    };
    result.map_err(anyhow::Error::from)
}

/// Global hook root: flag or environment, then config file, then `~/.hookstack/hooks/global`
fn resolve_global_root(flag: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let chosen = match flag.or(config.global_dir.as_deref()) {
        Some(path) => expand_tilde(path),
        None => {
            let home = home_dir().context("Cannot determine home directory for global hooks")?;
            default_global_hooks_dir(&home)
        }
    };

    if chosen.is_absolute() {
        Ok(chosen)
    } else {
        Ok(std::env::current_dir()
            .context("Failed to read current directory")?
            .join(chosen))
    }
}

/// Exit code for an error returned by [`run`]
#[must_use]
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(err) = error.downcast_ref::<CommandError>() {
        return err.exit_code();
    }
    if let Some(err) = error.downcast_ref::<hookstack_core::Error>() {
        return err.exit_code();
    }
    EXIT_FAILURE
}

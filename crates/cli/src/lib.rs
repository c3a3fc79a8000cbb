//! Implements the `skill-sync` command-line application.
//!
//! The `run` function parses arguments, installs logging, resolves settings
//! and dispatches to a command handler. Reports go to stdout; logs go to
//! stderr.

mod cli;
mod commands;
pub mod probe;

use crate::cli::{Cli, Commands, GlobalCommands};
use crate::commands::{
    handle_global_add_command, handle_global_install_command, handle_global_list_command,
    handle_init_command, handle_list_command, handle_mirror_command, handle_setup_command,
    handle_sync_command,
};
use crate::probe::PathProbe;
use anyhow::Result;
use clap::Parser;
use skill_sync_state::Settings;
use tracing_subscriber::EnvFilter;

/// Crates whose logs `--verbose` raises to `debug`.
const VERBOSE_FILTER: &str = "warn,skill_sync=debug,skill_sync_discovery=debug,skill_sync_cli=debug";

/// Parses the command line and runs the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.root.clone(), cli.global_dir.clone(), cli.verbose)?;
    init_tracing(settings.verbose);

    tracing::debug!(
        root = %settings.working_root.display(),
        global = %settings.global_root.display(),
        "Resolved settings"
    );
    let params = cli.transfer.params();

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => handle_sync_command(&settings, &params),
        Commands::Mirror { source, target } => {
            handle_mirror_command(&settings, &source, &target, &params)
        }
        Commands::List => handle_list_command(&settings),
        Commands::Init { tool } => handle_init_command(&settings, &tool, &params),
        Commands::Setup => handle_setup_command(&settings, &PathProbe::from_env(), &params),
        Commands::Global { command } => match command {
            GlobalCommands::List => handle_global_list_command(&settings),
            GlobalCommands::Add { name, source } => {
                handle_global_add_command(&settings, &name, source.as_deref(), &params)
            }
            GlobalCommands::Install { name, tool } => {
                handle_global_install_command(&settings, &name, tool.as_deref(), &params)
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

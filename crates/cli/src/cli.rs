use clap::{Args, Parser, Subcommand};
use skill_sync::SyncParams;
use skill_sync_state::{ENV_GLOBAL_DIR, ENV_ROOT};
use std::path::PathBuf;

/// Command-line interface for the `skill-sync` application.
#[derive(Debug, Parser)]
#[command(
    name = "skill-sync",
    version,
    about = "Mirror skills and subagents across AI coding tool directories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub transfer: TransferFlags,

    /// Enables debug logging on stderr (also `SKILL_SYNC_VERBOSE=1`).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Directory holding the `.<tool>` directories (default: current directory).
    #[arg(long, global = true, env = ENV_ROOT, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Global skill registry directory (default: `~/.skill-sync/global-skills`).
    #[arg(long, global = true, env = ENV_GLOBAL_DIR, value_name = "DIR")]
    pub global_dir: Option<PathBuf>,
}

/// Flags shared by every command that transfers entries.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct TransferFlags {
    /// Only transfer skills.
    #[arg(long, global = true, default_value_t = false)]
    pub skills_only: bool,
    /// Only transfer subagents.
    #[arg(long, global = true, default_value_t = false)]
    pub subagents_only: bool,
    /// Report what would happen without writing anything.
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,
    /// Replace entries that already exist in the target.
    #[arg(long, global = true, default_value_t = false)]
    pub force: bool,
}

impl TransferFlags {
    /// Engine parameters for these flags.
    pub fn params(&self) -> SyncParams {
        SyncParams {
            skills_only: self.skills_only,
            subagents_only: self.subagents_only,
            dry_run: self.dry_run,
            force: self.force,
        }
    }
}

/// Available `skill-sync` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Mirrors every detected tool into every other one (default).
    Sync,
    /// Mirrors one tool into another, initializing the target if absent.
    Mirror {
        /// Source tool id (e.g. `claude`).
        source: String,
        /// Target tool id (e.g. `cursor`).
        target: String,
    },
    /// Lists supported tools and the entries of each detected one.
    List,
    /// Creates a tool's directory skeleton and config file.
    Init {
        /// Tool id to initialize.
        tool: String,
    },
    /// Initializes every tool whose executable is found on `PATH`.
    Setup,
    /// Manages the global skill registry.
    Global {
        #[command(subcommand)]
        command: GlobalCommands,
    },
}

/// Subcommands of `skill-sync global`.
#[derive(Debug, Subcommand)]
pub enum GlobalCommands {
    /// Lists entries in the global registry.
    List,
    /// Copies a skill into the global registry.
    Add {
        /// Registry name for the skill.
        name: String,
        /// Skill file or directory; defaults to searching `.claude/skills` then `.cursor/skills`.
        source: Option<PathBuf>,
    },
    /// Installs a registry skill into one tool, or every detected tool.
    Install {
        /// Registry name (`.md`/`.json` suffix optional).
        name: String,
        /// Target tool id; omit to install into every detected tool.
        tool: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_sync_with_global_flags() {
        let cli = Cli::try_parse_from(["skill-sync", "--dry-run", "--skills-only"]).unwrap();
        assert!(cli.command.is_none());
        let params = cli.transfer.params();
        assert!(params.dry_run && params.skills_only);
        assert!(!params.force && !params.subagents_only);
    }

    #[test]
    fn flags_are_accepted_after_the_subcommand() {
        let cli =
            Cli::try_parse_from(["skill-sync", "mirror", "claude", "cursor", "--force", "-v"])
                .unwrap();
        assert!(cli.verbose);
        assert!(cli.transfer.force);
        match cli.command {
            Some(Commands::Mirror { source, target }) => {
                assert_eq!((source.as_str(), target.as_str()), ("claude", "cursor"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn mirror_requires_both_tools() {
        assert!(Cli::try_parse_from(["skill-sync", "mirror", "claude"]).is_err());
    }

    #[test]
    fn global_install_tool_is_optional() {
        let cli = Cli::try_parse_from(["skill-sync", "global", "install", "review"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Global {
                command: GlobalCommands::Install { tool: None, .. }
            })
        ));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["skill-sync", "frobnicate"]).is_err());
    }
}

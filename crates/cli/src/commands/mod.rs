//! CLI command handlers for the skill-sync application.

mod global;
mod init;
mod list;
mod setup;
mod sync;

pub(crate) use global::{
    handle_global_add_command, handle_global_install_command, handle_global_list_command,
};
pub(crate) use init::handle_init_command;
pub(crate) use list::handle_list_command;
pub(crate) use setup::handle_setup_command;
pub(crate) use sync::{handle_mirror_command, handle_sync_command};

use anyhow::{bail, Result};
use skill_sync::{MirrorReport, SyncParams};

pub(crate) const DRY_RUN_NOTICE: &str = "(dry run - no changes made)";

/// Prints a pair summary followed by any per-entry failures.
pub(crate) fn print_mirror_report(report: &MirrorReport) {
    println!("{}", report.format_summary());
    for result in report.results() {
        if let Err(err) = &result.outcome {
            println!("  - {} {}: {}", result.op.category, result.op.name, err);
        }
    }
}

pub(crate) fn print_dry_run_notice(params: &SyncParams) {
    if params.dry_run {
        println!("{DRY_RUN_NOTICE}");
    }
}

/// Commands that cannot preview their writes refuse `--dry-run` up front.
pub(crate) fn reject_dry_run(params: &SyncParams, command: &str) -> Result<()> {
    if params.dry_run {
        bail!("--dry-run is not supported by `{command}`");
    }
    Ok(())
}

use super::{print_dry_run_notice, print_mirror_report};
use anyhow::Result;
use skill_sync::{OpOutcome, SyncAllOutcome, SyncOrchestrator, SyncParams, Workspace};
use skill_sync_state::Settings;

/// Handle the `sync` command (also the default when no command is given).
pub(crate) fn handle_sync_command(settings: &Settings, params: &SyncParams) -> Result<()> {
    let workspace = Workspace::with_root(&settings.working_root);
    let report = SyncOrchestrator::new(&workspace).sync_all(params)?;

    match &report.outcome {
        SyncAllOutcome::InsufficientTools { detected } => {
            let found = if detected.is_empty() {
                "none".to_string()
            } else {
                detected.join(", ")
            };
            println!("Sync needs at least two tools; detected: {found}");
            println!("Run `skill-sync init <tool>` to add one.");
        }
        SyncAllOutcome::Completed(pairs) => {
            for pair in pairs {
                print_mirror_report(pair);
            }
            let (verb, counted): (&str, &[OpOutcome]) = if params.dry_run {
                (
                    "would write",
                    &[
                        OpOutcome::WouldCreate,
                        OpOutcome::WouldUpdate,
                        OpOutcome::WouldMerge,
                    ],
                )
            } else {
                (
                    "wrote",
                    &[OpOutcome::Created, OpOutcome::Updated, OpOutcome::Merged],
                )
            };
            let written: usize = counted.iter().map(|o| report.count(*o)).sum();
            println!(
                "sync complete: {} pairs, {verb} {written} entries, {} failed",
                pairs.len(),
                report.failed()
            );
        }
    }
    print_dry_run_notice(params);
    Ok(())
}

/// Handle the `mirror <source> <target>` command.
pub(crate) fn handle_mirror_command(
    settings: &Settings,
    source: &str,
    target: &str,
    params: &SyncParams,
) -> Result<()> {
    let workspace = Workspace::with_root(&settings.working_root);
    let report = workspace.mirror(source, target, params)?;
    print_mirror_report(&report);
    print_dry_run_notice(params);
    Ok(())
}

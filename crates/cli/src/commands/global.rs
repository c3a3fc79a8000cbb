use super::reject_dry_run;
use anyhow::{Context, Result};
use skill_sync::{AddOutcome, GlobalRegistry, InstallOutcome, SyncParams, Workspace};
use skill_sync_state::Settings;
use std::path::Path;

/// Handle `global list`.
pub(crate) fn handle_global_list_command(settings: &Settings) -> Result<()> {
    let registry = GlobalRegistry::new(&settings.global_root);
    let entries = registry.list()?;
    if entries.is_empty() {
        println!("No global skills in {}", registry.root().display());
        return Ok(());
    }
    println!("Global skills in {}:", registry.root().display());
    for entry in entries {
        println!("  {} ({})", entry.name, entry.kind);
    }
    Ok(())
}

/// Handle `global add <name> [source]`.
pub(crate) fn handle_global_add_command(
    settings: &Settings,
    name: &str,
    source: Option<&Path>,
    params: &SyncParams,
) -> Result<()> {
    reject_dry_run(params, "global add")?;
    let workspace = Workspace::with_root(&settings.working_root);
    let registry = GlobalRegistry::new(&settings.global_root);
    let outcome = registry
        .add(name, source, &workspace, params.force)
        .with_context(|| format!("Failed to add global skill '{name}'"))?;
    match &outcome {
        AddOutcome::Added(entry) => println!("Added {} to {}", entry.name, entry.path.display()),
        AddOutcome::Replaced(entry) => {
            println!("Replaced {} at {}", entry.name, entry.path.display())
        }
        AddOutcome::AlreadyExists(entry) => println!(
            "{} already exists at {} (use --force to replace)",
            entry.name,
            entry.path.display()
        ),
    }
    Ok(())
}

/// Handle `global install <name> [tool]`.
pub(crate) fn handle_global_install_command(
    settings: &Settings,
    name: &str,
    tool: Option<&str>,
    params: &SyncParams,
) -> Result<()> {
    reject_dry_run(params, "global install")?;
    let workspace = Workspace::with_root(&settings.working_root);
    let registry = GlobalRegistry::new(&settings.global_root);
    let report = registry.install(name, tool, &workspace)?;

    println!("Installing {}:", report.skill.name);
    let mut failed = 0;
    for install in &report.tools {
        match &install.outcome {
            Ok(outcome) => println!(
                "  {}: {} ({})",
                install.tool,
                outcome.label(),
                install.target_path.display()
            ),
            Err(err) => {
                failed += 1;
                println!("  {}: failed: {err}", install.tool);
            }
        }
    }
    println!(
        "{} installed, {} skipped, {failed} failed",
        report.count(InstallOutcome::Installed),
        report.count(InstallOutcome::SkippedExists) + report.count(InstallOutcome::SkippedNotDetected),
    );
    Ok(())
}

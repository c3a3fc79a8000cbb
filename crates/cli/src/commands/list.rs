use anyhow::Result;
use skill_sync::Workspace;
use skill_sync_discovery::{Category, EntryRef};
use skill_sync_state::Settings;

/// Handle the `list` command: every registered tool, detected or not.
pub(crate) fn handle_list_command(settings: &Settings) -> Result<()> {
    let workspace = Workspace::with_root(&settings.working_root);
    let detected = workspace.scan()?;

    for descriptor in workspace.tools().iter() {
        let Some(tool) = detected.get(descriptor.id) else {
            println!("{}: not initialized", descriptor.id);
            continue;
        };
        println!("{} ({})", tool.id(), tool.root_path.display());
        for category in Category::ALL {
            print_entries(category, tool.entries(category));
        }
    }
    println!("{} of {} tools detected", detected.len(), workspace.tools().len());
    Ok(())
}

fn print_entries(category: Category, entries: &[EntryRef]) {
    if entries.is_empty() {
        println!("  {}s: none", category.label());
        return;
    }
    println!("  {}s:", category.label());
    for entry in entries {
        println!("    {} ({})", entry.name, entry.kind);
    }
}

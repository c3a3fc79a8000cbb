use super::reject_dry_run;
use anyhow::Result;
use skill_sync::{InitReport, SyncParams, Workspace};
use skill_sync_state::Settings;

/// Handle the `init <tool>` command.
pub(crate) fn handle_init_command(settings: &Settings, tool: &str, params: &SyncParams) -> Result<()> {
    reject_dry_run(params, "init")?;
    let workspace = Workspace::with_root(&settings.working_root);
    let report = workspace.init_tool(tool)?;
    println!("{}", describe_init(&report));
    Ok(())
}

pub(crate) fn describe_init(report: &InitReport) -> String {
    let state = match (report.created_root, report.wrote_config) {
        (true, _) => "initialized",
        (false, true) => "completed",
        (false, false) => "already initialized",
    };
    format!("{}: {state} at {}", report.tool, report.root_path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(created_root: bool, wrote_config: bool) -> InitReport {
        InitReport {
            tool: "codex".into(),
            root_path: PathBuf::from("/work/.codex"),
            created_root,
            wrote_config,
        }
    }

    #[test]
    fn describes_each_init_state() {
        assert_eq!(
            describe_init(&report(true, true)),
            "codex: initialized at /work/.codex"
        );
        assert_eq!(
            describe_init(&report(false, true)),
            "codex: completed at /work/.codex"
        );
        assert_eq!(
            describe_init(&report(false, false)),
            "codex: already initialized at /work/.codex"
        );
    }
}

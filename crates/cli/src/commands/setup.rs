use super::init::describe_init;
use super::print_dry_run_notice;
use crate::probe::{detect_installed, ExecutableProbe};
use anyhow::Result;
use skill_sync::{SyncParams, Workspace};
use skill_sync_state::Settings;

/// Handle the `setup` command: initialize every tool found on `PATH`.
pub(crate) fn handle_setup_command(
    settings: &Settings,
    probe: &dyn ExecutableProbe,
    params: &SyncParams,
) -> Result<()> {
    let workspace = Workspace::with_root(&settings.working_root);
    let installed = detect_installed(workspace.tools(), probe);
    if installed.is_empty() {
        println!("No supported tools found on PATH.");
        return Ok(());
    }

    for descriptor in installed {
        if params.dry_run {
            let root = descriptor.root_in(workspace.root());
            let state = if root.exists() {
                "already present"
            } else {
                "would initialize"
            };
            println!("{}: {state} at {}", descriptor.id, root.display());
            continue;
        }
        let report = workspace.init_tool(descriptor.id)?;
        println!("{}", describe_init(&report));
    }
    print_dry_run_notice(params);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MockExecutableProbe;
    use skill_sync_test_utils::TestFixture;

    fn settings(fixture: &TestFixture) -> Settings {
        Settings {
            working_root: fixture.root.clone(),
            global_root: fixture.global.clone(),
            verbose: false,
        }
    }

    fn probe_finding(commands: &'static [&'static str]) -> MockExecutableProbe {
        let mut probe = MockExecutableProbe::new();
        probe
            .expect_is_installed()
            .returning(move |command| commands.iter().any(|c| *c == command));
        probe
    }

    #[test]
    fn initializes_only_installed_tools() {
        // GIVEN codex and gemini on PATH
        let fx = TestFixture::new().unwrap();
        let probe = probe_finding(&["codex", "gemini"]);

        // WHEN running setup
        handle_setup_command(&settings(&fx), &probe, &SyncParams::default()).unwrap();

        // THEN exactly those two tools are initialized
        assert!(fx.tool_dir("codex").join("codex.json").is_file());
        assert!(fx.tool_dir("gemini").join("skills").is_dir());
        assert!(!fx.tool_dir("claude").exists());
        assert!(!fx.tool_dir("cursor").exists());
    }

    #[test]
    fn dry_run_setup_writes_nothing() {
        let fx = TestFixture::new().unwrap();
        let probe = probe_finding(&["claude"]);
        let before = fx.snapshot();

        let params = SyncParams {
            dry_run: true,
            ..Default::default()
        };
        handle_setup_command(&settings(&fx), &probe, &params).unwrap();

        assert_eq!(before, fx.snapshot());
    }

    #[test]
    fn existing_config_is_kept() {
        let fx = TestFixture::new().unwrap();
        fx.create_tool("claude").unwrap();
        fx.write_file(".claude/claude.json", "{\"custom\":true}").unwrap();
        let probe = probe_finding(&["claude"]);

        handle_setup_command(&settings(&fx), &probe, &SyncParams::default()).unwrap();

        assert_eq!(fx.read(".claude/claude.json").unwrap(), "{\"custom\":true}");
        assert!(fx.tool_dir("claude").join("subagents").is_dir());
    }
}

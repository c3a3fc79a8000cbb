//! Behavioral properties of mirror and full-mesh sync.
//!
//! Each test builds a throwaway working root with `TestFixture` and checks
//! one property of the copy-if-absent / copy-if-forced policy.

use proptest::prelude::*;
use skill_sync::{
    MirrorOutcome, OpOutcome, SyncAllOutcome, SyncOrchestrator, SyncParams, TargetInit,
    Workspace,
};
use skill_sync_test_utils::{snapshot_tree, TestFixture};
use std::fs;

fn workspace(fixture: &TestFixture) -> Workspace {
    Workspace::with_root(&fixture.root)
}

#[test]
fn mirror_twice_without_force_is_idempotent() {
    // GIVEN a source tool with file and directory entries
    let fx = TestFixture::new().unwrap();
    fx.write_skill("claude", "review.md", "# Review").unwrap();
    fx.write_skill("claude", "deploy/SKILL.md", "# Deploy").unwrap();
    fx.write_skill("claude", "deploy/scripts/run.sh", "echo hi").unwrap();
    fx.write_subagent("claude", "planner.json", "{}").unwrap();
    fx.create_tool("cursor").unwrap();
    let ws = workspace(&fx);

    // WHEN mirroring twice without force
    let first = ws
        .mirror("claude", "cursor", &SyncParams::default())
        .unwrap();
    let after_first = snapshot_tree(&fx.tool_dir("cursor"));
    let second = ws
        .mirror("claude", "cursor", &SyncParams::default())
        .unwrap();

    // THEN the second run only skips and the target is unchanged
    assert_eq!(first.count(OpOutcome::Created), 3);
    assert_eq!(second.results().len(), 3);
    assert_eq!(second.count(OpOutcome::SkippedExists), 3);
    assert_eq!(after_first, snapshot_tree(&fx.tool_dir("cursor")));
}

#[test]
fn forced_full_mesh_converges_in_one_pass() {
    // GIVEN A={a.md} and B={b.md}
    let fx = TestFixture::new().unwrap();
    fx.write_skill("claude", "a.md", "a").unwrap();
    fx.write_skill("cursor", "b.md", "b").unwrap();
    let ws = workspace(&fx);

    // WHEN syncing everything with force
    let params = SyncParams {
        force: true,
        ..Default::default()
    };
    let report = SyncOrchestrator::new(&ws).sync_all(&params).unwrap();

    // THEN both tools hold both skills
    assert_eq!(report.pairs().len(), 2);
    assert_eq!(report.failed(), 0);
    for tool in ["claude", "cursor"] {
        assert_eq!(fx.read(&format!(".{tool}/skills/a.md")).unwrap(), "a");
        assert_eq!(fx.read(&format!(".{tool}/skills/b.md")).unwrap(), "b");
    }
}

#[test]
fn existing_directory_is_filled_not_overwritten() {
    // GIVEN source skill1/{x.md,y.md} and a stale target skill1/{x.md}
    let fx = TestFixture::new().unwrap();
    fx.write_skill("claude", "skill1/x.md", "x new").unwrap();
    fx.write_skill("claude", "skill1/y.md", "y new").unwrap();
    fx.write_skill("cursor", "skill1/x.md", "x old").unwrap();
    let ws = workspace(&fx);

    // WHEN mirroring without force
    let report = ws
        .mirror("claude", "cursor", &SyncParams::default())
        .unwrap();

    // THEN x.md keeps the old content and y.md is added
    assert_eq!(report.count(OpOutcome::Merged), 1);
    assert_eq!(fx.read(".cursor/skills/skill1/x.md").unwrap(), "x old");
    assert_eq!(fx.read(".cursor/skills/skill1/y.md").unwrap(), "y new");

    // AND a repeat run has nothing left to fill
    let again = ws
        .mirror("claude", "cursor", &SyncParams::default())
        .unwrap();
    assert_eq!(again.count(OpOutcome::SkippedExists), 1);
}

#[test]
fn dry_run_leaves_tree_byte_identical() {
    // GIVEN tools with overlapping and missing entries, and an absent third tool
    let fx = TestFixture::new().unwrap();
    fx.write_skill("claude", "a.md", "a").unwrap();
    fx.write_skill("claude", "dir/x.md", "x").unwrap();
    fx.write_skill("claude", "dir/y.md", "y").unwrap();
    fx.write_subagent("claude", "agent.md", "agent").unwrap();
    fx.write_skill("cursor", "a.md", "stale").unwrap();
    fx.write_skill("cursor", "dir/x.md", "stale").unwrap();
    let ws = workspace(&fx);
    let before = fx.snapshot();

    // WHEN previewing mirrors and a full sync, with and without force
    for force in [false, true] {
        let params = SyncParams {
            dry_run: true,
            force,
            ..Default::default()
        };
        ws.mirror("claude", "cursor", &params).unwrap();
        let report = ws.mirror("claude", "codex", &params).unwrap();
        assert_eq!(report.target_init, TargetInit::WouldInitialize);
        SyncOrchestrator::new(&ws).sync_all(&params).unwrap();
    }

    // THEN nothing on disk changed
    assert_eq!(before, fx.snapshot());
}

#[test]
fn both_filters_set_means_nothing_to_mirror() {
    // GIVEN a source with entries in both categories
    let fx = TestFixture::new().unwrap();
    fx.write_skill("claude", "a.md", "a").unwrap();
    fx.write_subagent("claude", "b.md", "b").unwrap();
    fx.create_tool("cursor").unwrap();
    let ws = workspace(&fx);
    let before = fx.snapshot();

    // WHEN both exclusive filters are set
    let params = SyncParams {
        skills_only: true,
        subagents_only: true,
        ..Default::default()
    };
    let report = ws.mirror("claude", "cursor", &params).unwrap();

    // AND against a target that does not exist yet
    let absent = ws.mirror("claude", "codex", &params).unwrap();

    // THEN the explicit no-op outcome is returned and nothing is written
    assert!(matches!(report.outcome, MirrorOutcome::NothingToMirror));
    assert!(matches!(absent.outcome, MirrorOutcome::NothingToMirror));
    assert_eq!(absent.target_init, TargetInit::LeftAbsent);
    assert_eq!(before, fx.snapshot());
}

#[test]
fn sync_with_one_tool_reports_insufficient_tools() {
    let fx = TestFixture::new().unwrap();
    fx.write_skill("claude", "a.md", "a").unwrap();
    let ws = workspace(&fx);

    let report = SyncOrchestrator::new(&ws)
        .sync_all(&SyncParams::default())
        .unwrap();
    assert!(matches!(
        report.outcome,
        SyncAllOutcome::InsufficientTools { .. }
    ));
}

#[test]
fn init_on_empty_root_writes_skeleton_and_config() {
    // GIVEN an empty working directory
    let fx = TestFixture::new().unwrap();
    let ws = workspace(&fx);

    // WHEN initializing claude
    let report = ws.init_tool("claude").unwrap();

    // THEN .claude/{skills/, subagents/, claude.json} exist
    assert!(report.created_root && report.wrote_config);
    let root = fx.tool_dir("claude");
    assert!(root.join("skills").is_dir());
    assert!(root.join("subagents").is_dir());
    let config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("claude.json")).unwrap()).unwrap();
    let keys: Vec<_> = config.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(config["name"], "claude");
    assert_eq!(config["version"], "1.0.0");
    assert!(config["created"].as_str().unwrap().contains('T'));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn skills_only_never_touches_target_subagents(
        skills in proptest::collection::btree_set("[a-z]{1,6}", 0..4),
        subagents in proptest::collection::btree_set("[a-z]{1,6}", 0..4),
        existing in proptest::collection::btree_set("[a-z]{1,6}", 0..3),
        as_dirs in any::<bool>(),
        target_present in any::<bool>(),
        force in any::<bool>(),
    ) {
        let fx = TestFixture::new().unwrap();
        fx.create_tool("claude").unwrap();
        for name in &skills {
            if as_dirs {
                fx.write_skill("claude", &format!("{name}/SKILL.md"), name).unwrap();
            } else {
                fx.write_skill("claude", &format!("{name}.md"), name).unwrap();
            }
        }
        for name in &subagents {
            fx.write_subagent("claude", &format!("{name}.md"), name).unwrap();
        }
        if target_present {
            fx.create_tool("cursor").unwrap();
            for name in &existing {
                fx.write_subagent("cursor", &format!("{name}.md"), "target").unwrap();
            }
        }
        let target_subagents = fx.tool_dir("cursor").join("subagents");
        let before = snapshot_tree(&target_subagents);

        let params = SyncParams { skills_only: true, force, ..Default::default() };
        let report = workspace(&fx).mirror("claude", "cursor", &params).unwrap();

        prop_assert_eq!(before, snapshot_tree(&target_subagents));
        prop_assert!(report
            .results()
            .iter()
            .all(|r| !r.op.target_path.starts_with(&target_subagents)));
    }
}

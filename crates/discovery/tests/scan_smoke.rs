use skill_sync_discovery::{scan, Category, EntryKind, ToolRegistry};
use std::fs;
use tempfile::tempdir;

#[test]
fn scans_skills_and_subagents_of_two_tools() {
    let tmp = tempdir().unwrap();
    let claude = tmp.path().join(".claude");
    fs::create_dir_all(claude.join("skills/reviewer")).unwrap();
    fs::write(claude.join("skills/reviewer/notes.txt"), "nested files are opaque").unwrap();
    fs::create_dir_all(claude.join("subagents")).unwrap();
    fs::write(claude.join("subagents/planner.md"), "# Planner").unwrap();
    fs::create_dir_all(tmp.path().join(".cursor/skills")).unwrap();
    fs::write(tmp.path().join(".cursor/skills/lint.json"), "{}").unwrap();

    let detected = scan(tmp.path(), &ToolRegistry::builtin()).unwrap();

    assert_eq!(detected.len(), 2);
    let claude = &detected["claude"];
    assert_eq!(claude.entries(Category::Skill).len(), 1);
    assert_eq!(claude.skills[0].name, "reviewer");
    assert_eq!(claude.skills[0].kind, EntryKind::Directory);
    assert_eq!(claude.subagents[0].name, "planner.md");
    assert_eq!(claude.subagents[0].kind, EntryKind::File);

    let cursor = &detected["cursor"];
    assert_eq!(cursor.skills[0].name, "lint.json");
    assert!(cursor.subagents.is_empty());
    assert_eq!(
        cursor.category_dir(Category::Subagent),
        tmp.path().join(".cursor/subagents")
    );
}

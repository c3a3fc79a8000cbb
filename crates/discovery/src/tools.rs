use crate::types::{Category, DiscoveryError};
use crate::Result;
use std::path::{Path, PathBuf};

/// Static on-disk layout of one supported tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Canonical lowercase identifier (e.g. "claude").
    pub id: &'static str,
    /// Directory under the working root (e.g. ".claude").
    pub root_dir_name: &'static str,
    /// Skills subdirectory under the tool root.
    pub skills_subdir: &'static str,
    /// Subagents subdirectory under the tool root.
    pub subagents_subdir: &'static str,
    /// JSON config stub written on initialization.
    pub config_file_name: &'static str,
    /// Executable names that indicate the tool is installed.
    pub commands: &'static [&'static str],
}

impl ToolDescriptor {
    /// Returns the subdirectory holding entries of `category`.
    pub fn subdir(&self, category: Category) -> &'static str {
        match category {
            Category::Skill => self.skills_subdir,
            Category::Subagent => self.subagents_subdir,
        }
    }

    /// Returns the tool root beneath `working_root`.
    pub fn root_in(&self, working_root: &Path) -> PathBuf {
        working_root.join(self.root_dir_name)
    }
}

const fn builtin(
    id: &'static str,
    root_dir_name: &'static str,
    config_file_name: &'static str,
    commands: &'static [&'static str],
) -> ToolDescriptor {
    ToolDescriptor {
        id,
        root_dir_name,
        skills_subdir: "skills",
        subagents_subdir: "subagents",
        config_file_name,
        commands,
    }
}

/// Tools known at build time, in registry order.
pub const BUILTIN_TOOLS: &[ToolDescriptor] = &[
    builtin("claude", ".claude", "claude.json", &["claude"]),
    builtin("cursor", ".cursor", "cursor.json", &["cursor", "cursor-agent"]),
    builtin("codex", ".codex", "codex.json", &["codex"]),
    builtin("gemini", ".gemini", "gemini.json", &["gemini"]),
    builtin("windsurf", ".windsurf", "windsurf.json", &["windsurf"]),
    builtin(
        "copilot",
        ".copilot",
        "copilot.json",
        &["copilot", "github-copilot-cli"],
    ),
];

/// Ordered table of tool descriptors.
///
/// The core never reads a global table; callers pass a registry in so tests
/// can work against a reduced or custom set.
///
/// ```
/// use skill_sync_discovery::ToolRegistry;
///
/// let registry = ToolRegistry::builtin();
/// assert_eq!(registry.lookup("claude").unwrap().root_dir_name, ".claude");
/// assert!(registry.lookup("vim").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToolRegistry {
    /// Registry with every built-in tool.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TOOLS.to_vec())
    }

    /// Registry over an explicit descriptor list. Order is preserved.
    pub fn new(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    /// Resolves a tool identifier.
    pub fn lookup(&self, id: &str) -> Result<&ToolDescriptor> {
        let wanted = id.trim();
        self.tools
            .iter()
            .find(|tool| tool.id == wanted)
            .ok_or_else(|| DiscoveryError::UnknownTool {
                id: id.to_string(),
                known: self.ids().join(", "),
            })
    }

    /// All registered identifiers in registry order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.id).collect()
    }

    /// Iterates descriptors in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// True when no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_in_registry_order() {
        let registry = ToolRegistry::builtin();
        assert_eq!(
            registry.ids(),
            vec!["claude", "cursor", "codex", "gemini", "windsurf", "copilot"]
        );
    }

    #[test]
    fn builtin_ids_are_unique() {
        let registry = ToolRegistry::builtin();
        let mut ids = registry.ids();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn lookup_trims_whitespace() {
        let registry = ToolRegistry::builtin();
        assert_eq!(registry.lookup(" cursor ").unwrap().id, "cursor");
    }

    #[test]
    fn lookup_unknown_reports_known_ids() {
        let registry = ToolRegistry::builtin();
        let err = registry.lookup("emacs").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("emacs"));
        assert!(msg.contains("claude, cursor, codex"));
    }

    #[test]
    fn subdir_per_category() {
        let registry = ToolRegistry::builtin();
        let claude = registry.lookup("claude").unwrap();
        assert_eq!(claude.subdir(Category::Skill), "skills");
        assert_eq!(claude.subdir(Category::Subagent), "subagents");
        assert_eq!(
            claude.root_in(Path::new("/work")),
            PathBuf::from("/work/.claude")
        );
    }

    #[test]
    fn custom_registry_preserves_order() {
        let registry = ToolRegistry::new(vec![BUILTIN_TOOLS[2], BUILTIN_TOOLS[0]]);
        assert_eq!(registry.ids(), vec!["codex", "claude"]);
        assert!(registry.lookup("cursor").is_err());
    }
}

//! Shared test utilities for skill-sync crates.
//!
//! This crate provides common test fixtures and utilities used across
//! multiple crates in the skill-sync workspace.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};
use walkdir::WalkDir;

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = skill_sync_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Content of every path under a root: `None` for directories, bytes for files.
pub type TreeSnapshot = BTreeMap<PathBuf, Option<Vec<u8>>>;

/// Captures a byte-level snapshot of the tree under `root`, keyed by relative path.
///
/// Two equal snapshots mean no file or directory was added, removed, or rewritten
/// with different content.
pub fn snapshot_tree(root: &Path) -> TreeSnapshot {
    let mut snapshot = TreeSnapshot::new();
    if !root.exists() {
        return snapshot;
    }
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.expect("walk test tree");
        let rel = entry
            .path()
            .strip_prefix(root)
            .expect("entry under root")
            .to_path_buf();
        let content = if entry.file_type().is_dir() {
            None
        } else {
            Some(std::fs::read(entry.path()).expect("read test file"))
        };
        snapshot.insert(rel, content);
    }
    snapshot
}

/// Standard test fixture: a temporary working root plus a separate global
/// registry directory.
///
/// The tempdir is automatically cleaned up when this struct is dropped.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// Working root holding the `.<tool>` directories.
    pub root: PathBuf,
    /// Global skill registry directory (not created up front).
    pub global: PathBuf,
}

impl TestFixture {
    /// Create a new fixture with an empty working root.
    ///
    /// Creates `<tmp>/work/`. The global registry at `<tmp>/global-skills`
    /// is left absent so `ensure()` behavior can be observed.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let root = tempdir.path().join("work");
        let global = tempdir.path().join("global-skills");
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            tempdir,
            root,
            global,
        })
    }

    /// Path of a tool root, e.g. `<root>/.claude`.
    pub fn tool_dir(&self, tool: &str) -> PathBuf {
        self.root.join(format!(".{tool}"))
    }

    /// Creates an empty tool root (no skills/subagents directories).
    pub fn create_tool(&self, tool: &str) -> std::io::Result<PathBuf> {
        let dir = self.tool_dir(tool);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Writes `<root>/.<tool>/skills/<rel>` and returns its path.
    ///
    /// `rel` may contain slashes to build directory skills.
    pub fn write_skill(&self, tool: &str, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        self.write_entry(tool, "skills", rel, content)
    }

    /// Writes `<root>/.<tool>/subagents/<rel>` and returns its path.
    pub fn write_subagent(
        &self,
        tool: &str,
        rel: &str,
        content: &str,
    ) -> std::io::Result<PathBuf> {
        self.write_entry(tool, "subagents", rel, content)
    }

    fn write_entry(
        &self,
        tool: &str,
        subdir: &str,
        rel: &str,
        content: &str,
    ) -> std::io::Result<PathBuf> {
        let path = self.tool_dir(tool).join(subdir).join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes a file somewhere under the working root (e.g. a skill source outside any tool).
    pub fn write_file(&self, rel: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Reads a file under the working root to a string.
    pub fn read(&self, rel: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.root.join(rel))
    }

    /// Snapshot of the whole temp directory (working root and global registry).
    pub fn snapshot(&self) -> TreeSnapshot {
        snapshot_tree(self.tempdir.path())
    }
}

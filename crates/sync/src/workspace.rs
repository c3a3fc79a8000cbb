//! The working root and tool table every core operation runs against.

use crate::init::{initialize_tool, InitReport};
use crate::Result;
use skill_sync_discovery::{scan, DetectedTools, ToolDescriptor, ToolRegistry};
use std::path::{Path, PathBuf};

/// A working root holding `.<tool>` directories, paired with the tool table.
///
/// Both are injected; nothing here reads the environment or the process cwd.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    tools: ToolRegistry,
}

impl Workspace {
    /// Creates a workspace over `root` using `tools`.
    pub fn new(root: impl Into<PathBuf>, tools: ToolRegistry) -> Self {
        Self {
            root: root.into(),
            tools,
        }
    }

    /// Creates a workspace over `root` with the built-in tools.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(root, ToolRegistry::builtin())
    }

    /// Working root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The tool table.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Resolves a tool id.
    pub fn lookup(&self, id: &str) -> Result<&ToolDescriptor> {
        Ok(self.tools.lookup(id)?)
    }

    /// Scans the working root afresh.
    pub fn scan(&self) -> Result<DetectedTools> {
        Ok(scan(&self.root, &self.tools)?)
    }

    /// Creates the directory skeleton and config stub for `id`.
    pub fn init_tool(&self, id: &str) -> Result<InitReport> {
        let descriptor = *self.lookup(id)?;
        initialize_tool(&self.root, &descriptor)
    }
}

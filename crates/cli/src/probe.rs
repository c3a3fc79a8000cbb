//! Installed-tool detection for `setup`.

use skill_sync_discovery::{ToolDescriptor, ToolRegistry};
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

/// Answers whether an executable can be found.
#[cfg_attr(test, automock)]
pub trait ExecutableProbe {
    /// True when `command` resolves to an executable.
    fn is_installed(&self, command: &str) -> bool;
}

/// Searches a list of directories the way a shell searches `PATH`.
#[derive(Debug, Clone, Default)]
pub struct PathProbe {
    dirs: Vec<PathBuf>,
}

impl PathProbe {
    /// Probe over an explicit directory list.
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// Probe over the current `PATH`.
    pub fn from_env() -> Self {
        let dirs = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self { dirs }
    }
}

impl ExecutableProbe for PathProbe {
    fn is_installed(&self, command: &str) -> bool {
        self.dirs.iter().any(|dir| {
            if is_executable(&dir.join(command)) {
                return true;
            }
            #[cfg(windows)]
            if is_executable(&dir.join(format!("{command}.exe"))) {
                return true;
            }
            false
        })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Registered tools with at least one probe command installed, in registry order.
pub fn detect_installed<'r>(
    registry: &'r ToolRegistry,
    probe: &dyn ExecutableProbe,
) -> Vec<&'r ToolDescriptor> {
    registry
        .iter()
        .filter(|descriptor| {
            let found = descriptor
                .commands
                .iter()
                .any(|command| probe.is_installed(command));
            tracing::debug!(tool = descriptor.id, found, "Probed for installed tool");
            found
        })
        .collect()
}

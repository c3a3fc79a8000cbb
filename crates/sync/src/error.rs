//! Error types for the sync core.

use skill_sync_discovery::DiscoveryError;
use std::path::{Path, PathBuf};

/// Errors produced by mirroring, initialization, and the global registry.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SyncError {
    /// Unknown tool id or a scan-time read failure.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// The mirror source tool has no directory under the working root.
    #[error("source tool '{tool}' not found (expected {})", path.display())]
    SourceNotFound {
        /// Source tool id.
        tool: String,
        /// Where the tool root was expected.
        path: PathBuf,
    },

    /// Source and target of a mirror are the same tool.
    #[error("cannot mirror tool '{0}' onto itself")]
    SameTool(String),

    /// A skill to add to the global registry could not be located.
    #[error("skill '{name}' not found (searched: {})", display_paths(.searched))]
    SkillNotFound {
        /// Requested skill name.
        name: String,
        /// Every path that was probed.
        searched: Vec<PathBuf>,
    },

    /// No entry with this name exists in the global registry.
    #[error("global skill '{name}' not found in {}", registry.display())]
    GlobalSkillNotFound {
        /// Requested skill name.
        name: String,
        /// Registry root that was searched.
        registry: PathBuf,
    },

    /// An install without an explicit tool found no tools to install into.
    #[error("no tools detected under {}", root.display())]
    NoToolsDetected {
        /// Working root that was scanned.
        root: PathBuf,
    },

    /// A registry name that would escape the registry directory.
    #[error("invalid skill name '{0}': must be a single, non-hidden path component")]
    InvalidName(String),

    /// A filesystem operation failed.
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The tool config stub could not be serialized.
    #[error("failed to serialize tool config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The creation timestamp could not be formatted.
    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

impl SyncError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        SyncError::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for an unregistered tool id.
    pub fn is_unknown_tool(&self) -> bool {
        matches!(
            self,
            SyncError::Discovery(DiscoveryError::UnknownTool { .. })
        )
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "nothing".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

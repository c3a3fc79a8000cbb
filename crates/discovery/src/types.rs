use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// File extensions recognized as single-file skills or subagents.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &["md", "json"];

/// Errors raised while resolving tools or reading tool directories.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DiscoveryError {
    /// The identifier is not present in the tool registry.
    #[error("unknown tool '{id}' (known tools: {known})")]
    UnknownTool {
        /// The identifier that failed to resolve.
        id: String,
        /// Comma-separated list of registered identifiers.
        known: String,
    },

    /// A directory exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Whether an entry is a single file or a directory tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A single `.md` or `.json` file.
    File,
    /// A directory, copied as a whole tree.
    Directory,
}

impl EntryKind {
    /// Classifies filesystem metadata. Anything that is not a directory is a file.
    pub fn from_metadata(meta: &fs::Metadata) -> Self {
        if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    /// Returns a stable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "dir",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two artifact categories a tool carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Entries under the tool's skills subdirectory.
    Skill,
    /// Entries under the tool's subagents subdirectory.
    Subagent,
}

impl Category {
    /// Both categories, skills first.
    pub const ALL: [Category; 2] = [Category::Skill, Category::Subagent];

    /// Returns a stable label for this category.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Skill => "skill",
            Category::Subagent => "subagent",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One skill or subagent found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRef {
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Base name, preserved verbatim when mirrored.
    pub name: String,
    /// File or directory.
    pub kind: EntryKind,
}

/// Returns true if the file name carries one of the recognized extensions.
///
/// ```
/// use skill_sync_discovery::has_recognized_extension;
///
/// assert!(has_recognized_extension("review.md"));
/// assert!(has_recognized_extension("agent.JSON"));
/// assert!(!has_recognized_extension("notes.txt"));
/// assert!(!has_recognized_extension("README"));
/// ```
pub fn has_recognized_extension(name: &str) -> bool {
    std::path::Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            RECOGNIZED_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

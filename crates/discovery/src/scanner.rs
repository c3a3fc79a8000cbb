use crate::tools::{ToolDescriptor, ToolRegistry};
use crate::types::{has_recognized_extension, Category, DiscoveryError, EntryKind, EntryRef};
use crate::Result;
use indexmap::IndexMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A registered tool whose root directory exists at scan time.
///
/// Never cached: every operation scans afresh.
#[derive(Debug, Clone)]
pub struct DetectedTool {
    /// Static layout of the tool.
    pub descriptor: ToolDescriptor,
    /// Absolute path of the tool root (e.g. `<root>/.claude`).
    pub root_path: PathBuf,
    /// Entries under the skills subdirectory, in listing order.
    pub skills: Vec<EntryRef>,
    /// Entries under the subagents subdirectory, in listing order.
    pub subagents: Vec<EntryRef>,
}

impl DetectedTool {
    /// Tool identifier.
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }

    /// Entries for one category.
    pub fn entries(&self, category: Category) -> &[EntryRef] {
        match category {
            Category::Skill => &self.skills,
            Category::Subagent => &self.subagents,
        }
    }

    /// Directory holding entries of `category`.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.root_path.join(self.descriptor.subdir(category))
    }
}

/// Detected tools keyed by id, in registry order.
pub type DetectedTools = IndexMap<&'static str, DetectedTool>;

/// Detects which registered tools exist under `root` and lists their entries.
///
/// Missing skills/subagents directories yield empty lists. Any other read
/// failure (e.g. permission denied) is returned.
pub fn scan(root: &Path, registry: &ToolRegistry) -> Result<DetectedTools> {
    let mut detected = DetectedTools::new();
    for descriptor in registry.iter() {
        if let Some(tool) = scan_tool(root, descriptor)? {
            detected.insert(descriptor.id, tool);
        }
    }
    tracing::debug!(
        root = %root.display(),
        detected = ?detected.keys().collect::<Vec<_>>(),
        "Scanned working root"
    );
    Ok(detected)
}

/// Scans a single tool. Returns `None` when its root directory is absent.
pub fn scan_tool(root: &Path, descriptor: &ToolDescriptor) -> Result<Option<DetectedTool>> {
    let root_path = descriptor.root_in(root);
    match fs::metadata(&root_path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            tracing::warn!(
                path = %root_path.display(),
                "Tool root exists but is not a directory; ignoring"
            );
            return Ok(None);
        }
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DiscoveryError::Io {
                path: root_path,
                source,
            })
        }
    }

    let skills = list_entries(&root_path.join(descriptor.skills_subdir))?;
    let subagents = list_entries(&root_path.join(descriptor.subagents_subdir))?;
    Ok(Some(DetectedTool {
        descriptor: *descriptor,
        root_path,
        skills,
        subagents,
    }))
}

/// Lists the skill or subagent entries directly under `dir`.
///
/// Directories are always included; files only with a recognized extension.
/// A missing `dir` is an empty listing.
pub fn list_entries(dir: &Path) -> Result<Vec<EntryRef>> {
    let read_dir = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(DiscoveryError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| DiscoveryError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        // Follow symlinks so a linked skill folder counts as a directory.
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Skipping dangling symlink");
                continue;
            }
            Err(source) => return Err(DiscoveryError::Io { path, source }),
        };

        let kind = EntryKind::from_metadata(&meta);
        if kind == EntryKind::File && !has_recognized_extension(&name) {
            continue;
        }
        entries.push(EntryRef { path, name, kind });
    }
    Ok(entries)
}

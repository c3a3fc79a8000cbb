//! Global skill registry: add a skill once, install it into many tools.
//!
//! The registry is a flat directory keyed by entry name. Installs are
//! conservative (never initialize a tool, never overwrite), unlike mirrors.

use crate::copier::copy_entry;
use crate::error::SyncError;
use crate::workspace::Workspace;
use crate::Result;
use serde::{Deserialize, Serialize};
use skill_sync_discovery::{has_recognized_extension, Category, EntryKind, EntryRef};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Tools whose skills directories are probed, in order, when `add` gets no source.
pub const FALLBACK_SOURCE_TOOLS: &[&str] = &["claude", "cursor"];

/// Result of adding a skill to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// New entry copied in.
    Added(EntryRef),
    /// Existing entry removed and replaced (force).
    Replaced(EntryRef),
    /// An entry with this name already exists; nothing was changed.
    AlreadyExists(EntryRef),
}

impl AddOutcome {
    /// The registry entry concerned.
    pub fn entry(&self) -> &EntryRef {
        match self {
            AddOutcome::Added(e) | AddOutcome::Replaced(e) | AddOutcome::AlreadyExists(e) => e,
        }
    }
}

/// Per-tool decision of an install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallOutcome {
    /// Copied into the tool's skills directory.
    Installed,
    /// Same-named entry already present in the tool's skills directory.
    SkippedExists,
    /// Tool is registered but has no directory under the working root.
    SkippedNotDetected,
}

impl InstallOutcome {
    /// Returns a stable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            InstallOutcome::Installed => "installed",
            InstallOutcome::SkippedExists => "skipped-exists",
            InstallOutcome::SkippedNotDetected => "skipped-not-detected",
        }
    }
}

/// Install result for one tool.
#[derive(Debug)]
pub struct ToolInstall {
    /// Tool id.
    pub tool: String,
    /// Where the entry was (or would have been) installed.
    pub target_path: PathBuf,
    /// Decision for this tool, or the copy failure.
    pub outcome: std::result::Result<InstallOutcome, SyncError>,
}

/// Report for installing one registry entry.
#[derive(Debug)]
pub struct InstallReport {
    /// Registry entry being installed.
    pub skill: EntryRef,
    /// Per-tool results, in registry order.
    pub tools: Vec<ToolInstall>,
}

impl InstallReport {
    /// Number of tools that ended with `outcome`.
    pub fn count(&self, outcome: InstallOutcome) -> usize {
        self.tools
            .iter()
            .filter(|t| matches!(t.outcome, Ok(o) if o == outcome))
            .count()
    }
}

/// Tool-independent staging directory for skills.
#[derive(Debug, Clone)]
pub struct GlobalRegistry {
    root: PathBuf,
}

impl GlobalRegistry {
    /// Registry rooted at `root` (e.g. `~/.skill-sync/global-skills`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Registry directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the registry directory if absent.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| SyncError::io(&self.root, e))
    }

    /// Entries directly under the registry, sorted by name. Dot-prefixed
    /// names are skipped.
    ///
    /// A registry that does not exist yet is empty.
    pub fn list(&self) -> Result<Vec<EntryRef>> {
        let read_dir = match fs::read_dir(&self.root) {
            Ok(rd) => rd,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(SyncError::io(&self.root, err)),
        };
        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| SyncError::io(&self.root, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Staging and backup copies from an in-flight replace.
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let meta = fs::metadata(&path).map_err(|e| SyncError::io(&path, e))?;
            entries.push(EntryRef {
                name,
                kind: EntryKind::from_metadata(&meta),
                path,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Copies a skill into the registry under `name`.
    ///
    /// Without `source`, the skills directories of [`FALLBACK_SOURCE_TOOLS`]
    /// under the workspace root are probed for `<name>` then `<name>.md`.
    /// A file source keeps its extension in the registry name.
    ///
    /// The registry holds one entry per name: `x`, `x.md` and `x.json` all
    /// count as `x`. An existing entry is left untouched unless `force` is
    /// set, in which case the new copy is staged first and only then swapped
    /// in, so a failed copy keeps the old entry.
    pub fn add(
        &self,
        name: &str,
        source: Option<&Path>,
        workspace: &Workspace,
        force: bool,
    ) -> Result<AddOutcome> {
        validate_name(name)?;
        let source = match source {
            Some(path) if path.exists() => path.to_path_buf(),
            Some(path) => {
                return Err(SyncError::SkillNotFound {
                    name: name.to_string(),
                    searched: vec![path.to_path_buf()],
                })
            }
            None => find_fallback_source(name, workspace)?,
        };
        let meta = fs::metadata(&source).map_err(|e| SyncError::io(&source, e))?;
        let kind = EntryKind::from_metadata(&meta);
        let entry_name = registry_name(name, &source, kind);
        let entry = EntryRef {
            path: self.root.join(&entry_name),
            name: entry_name,
            kind,
        };

        let existing = self.existing_entry(name, &entry.name)?;
        if let Some(existing) = existing.as_ref() {
            if !force {
                tracing::warn!(name = %existing.name, "Global skill already exists; use --force to replace");
                return Ok(AddOutcome::AlreadyExists(existing.clone()));
            }
            if same_file(&source, &existing.path) {
                tracing::info!(name = %existing.name, "Source is the registry entry itself; nothing to replace");
                return Ok(AddOutcome::AlreadyExists(existing.clone()));
            }
        }

        self.ensure()?;
        let staging = self.root.join(format!(".{}.staging", entry.name));
        if staging.exists() {
            remove_entry(&staging)?;
        }
        if let Err(err) = copy_entry(&source, &staging, true) {
            let _ = remove_entry(&staging);
            return Err(err);
        }
        match existing.as_ref() {
            Some(old) => replace_entry(&staging, &old.path, &entry.path)?,
            None => fs::rename(&staging, &entry.path).map_err(|e| SyncError::io(&entry.path, e))?,
        }
        tracing::info!(
            name = %entry.name,
            source = %source.display(),
            "Added global skill"
        );
        Ok(if existing.is_some() {
            AddOutcome::Replaced(entry)
        } else {
            AddOutcome::Added(entry)
        })
    }

    /// Finds a registry entry by exact name, then `<name>.md`, then `<name>.json`.
    pub fn resolve(&self, name: &str) -> Result<EntryRef> {
        validate_name(name)?;
        self.lookup(name)?
            .ok_or_else(|| SyncError::GlobalSkillNotFound {
                name: name.to_string(),
                registry: self.root.clone(),
            })
    }

    fn lookup(&self, name: &str) -> Result<Option<EntryRef>> {
        let candidates = [
            name.to_string(),
            format!("{name}.md"),
            format!("{name}.json"),
        ];
        for candidate in candidates {
            let path = self.root.join(&candidate);
            match fs::metadata(&path) {
                Ok(meta) => {
                    return Ok(Some(EntryRef {
                        path,
                        name: candidate,
                        kind: EntryKind::from_metadata(&meta),
                    }))
                }
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(SyncError::io(&path, err)),
            }
        }
        Ok(None)
    }

    /// Any entry that already answers to `name` (with or without a
    /// recognized extension) or occupies `entry_name`.
    fn existing_entry(&self, name: &str, entry_name: &str) -> Result<Option<EntryRef>> {
        if let Some(found) = self.lookup(strip_recognized_extension(name))? {
            return Ok(Some(found));
        }
        let path = self.root.join(entry_name);
        match fs::metadata(&path) {
            Ok(meta) => Ok(Some(EntryRef {
                path,
                name: entry_name.to_string(),
                kind: EntryKind::from_metadata(&meta),
            })),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SyncError::io(&path, err)),
        }
    }

    /// Installs a registry entry into one tool, or every detected tool.
    ///
    /// Tools that are registered but absent are skipped, never initialized.
    /// Existing same-named skills are skipped; there is no overwrite path.
    pub fn install(
        &self,
        name: &str,
        tool: Option<&str>,
        workspace: &Workspace,
    ) -> Result<InstallReport> {
        let skill = self.resolve(name)?;
        let detected = workspace.scan()?;

        let targets: Vec<&'static str> = match tool {
            Some(id) => vec![workspace.lookup(id)?.id],
            None if detected.is_empty() => {
                return Err(SyncError::NoToolsDetected {
                    root: workspace.root().to_path_buf(),
                })
            }
            None => detected.keys().copied().collect(),
        };

        let mut tools = Vec::with_capacity(targets.len());
        for id in targets {
            let Some(detected_tool) = detected.get(id) else {
                let descriptor = workspace.lookup(id)?;
                let target_path = descriptor
                    .root_in(workspace.root())
                    .join(descriptor.subdir(Category::Skill))
                    .join(&skill.name);
                tracing::warn!(tool = id, "Tool not initialized; skipping install");
                tools.push(ToolInstall {
                    tool: id.to_string(),
                    target_path,
                    outcome: Ok(InstallOutcome::SkippedNotDetected),
                });
                continue;
            };

            let target_path = detected_tool
                .category_dir(Category::Skill)
                .join(&skill.name);
            let outcome = install_one(&skill, &target_path);
            if let Err(err) = &outcome {
                tracing::warn!(tool = id, error = %err, "Install failed");
            }
            tools.push(ToolInstall {
                tool: id.to_string(),
                target_path,
                outcome,
            });
        }
        Ok(InstallReport { skill, tools })
    }
}

fn install_one(skill: &EntryRef, target_path: &Path) -> Result<InstallOutcome> {
    let exists = target_path
        .try_exists()
        .map_err(|e| SyncError::io(target_path, e))?;
    if exists {
        return Ok(InstallOutcome::SkippedExists);
    }
    copy_entry(&skill.path, target_path, false)?;
    Ok(InstallOutcome::Installed)
}

fn find_fallback_source(name: &str, workspace: &Workspace) -> Result<PathBuf> {
    let mut searched = Vec::new();
    for id in FALLBACK_SOURCE_TOOLS {
        let Ok(descriptor) = workspace.lookup(id) else {
            continue;
        };
        let skills_dir = descriptor
            .root_in(workspace.root())
            .join(descriptor.subdir(Category::Skill));
        for candidate in [skills_dir.join(name), skills_dir.join(format!("{name}.md"))] {
            if candidate.exists() {
                return Ok(candidate);
            }
            searched.push(candidate);
        }
    }
    Err(SyncError::SkillNotFound {
        name: name.to_string(),
        searched,
    })
}

/// Registry name for a source: `name`, plus the file's extension when missing.
fn registry_name(name: &str, source: &Path, kind: EntryKind) -> String {
    if kind == EntryKind::Directory {
        return name.to_string();
    }
    match source.extension() {
        Some(ext) if Path::new(name).extension() != Some(ext) => {
            format!("{name}.{}", ext.to_string_lossy())
        }
        _ => name.to_string(),
    }
}

/// `lint.md` and `lint.json` answer to `lint`; other names are returned as is.
fn strip_recognized_extension(name: &str) -> &str {
    match Path::new(name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if has_recognized_extension(name) && name.len() > ext.len() + 1 => {
            &name[..name.len() - ext.len() - 1]
        }
        _ => name,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Swaps `staged` in for `old`, which may live under a different name than
/// `target`. The old entry is moved aside first and restored if the swap fails.
fn replace_entry(staged: &Path, old: &Path, target: &Path) -> Result<()> {
    let backup = old.with_file_name(format!(
        ".{}.previous",
        old.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
    ));
    if backup.exists() {
        remove_entry(&backup)?;
    }
    fs::rename(old, &backup).map_err(|e| SyncError::io(old, e))?;
    if let Err(err) = fs::rename(staged, target) {
        let _ = fs::rename(&backup, old);
        let _ = remove_entry(staged);
        return Err(SyncError::io(target, err));
    }
    remove_entry(&backup)
}

fn validate_name(name: &str) -> Result<()> {
    let single_component =
        !name.is_empty() && !name.starts_with('.') && !name.contains(['/', '\\']);
    if single_component {
        Ok(())
    } else {
        Err(SyncError::InvalidName(name.to_string()))
    }
}

fn remove_entry(path: &Path) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| SyncError::io(path, e))?;
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| SyncError::io(path, e))
}

//! One-directional mirroring of skills and subagents between two tools.
//!
//! Presence is the only state consulted: no manifest, no checksums. A target
//! file edited independently of the source is never detected as stale.

use crate::copier::{copy_entry, missing_files};
use crate::error::SyncError;
use crate::init::initialize_tool;
use crate::report::{MirrorOutcome, MirrorReport, OpOutcome, OpResult, TargetInit};
use crate::workspace::Workspace;
use crate::Result;
use serde::{Deserialize, Serialize};
use skill_sync_discovery::{Category, DetectedTool, EntryKind, ToolDescriptor};
use std::path::{Path, PathBuf};

/// Filter and mode flags for mirror and sync runs.
///
/// ```
/// use skill_sync::SyncParams;
/// use skill_sync_discovery::Category;
///
/// let params = SyncParams { skills_only: true, ..Default::default() };
/// assert!(params.includes(Category::Skill));
/// assert!(!params.includes(Category::Subagent));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncParams {
    /// Only transfer skills.
    #[serde(default)]
    pub skills_only: bool,
    /// Only transfer subagents.
    #[serde(default)]
    pub subagents_only: bool,
    /// Preview only; no filesystem writes.
    #[serde(default)]
    pub dry_run: bool,
    /// Overwrite existing target entries.
    #[serde(default)]
    pub force: bool,
}

impl SyncParams {
    /// Whether entries of `category` pass the filter.
    ///
    /// Setting both `skills_only` and `subagents_only` excludes everything.
    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Skill => !self.subagents_only,
            Category::Subagent => !self.skills_only,
        }
    }
}

/// A single planned copy of one entry from source to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOp {
    /// Entry in the source tool.
    pub source_path: PathBuf,
    /// Always `<target root>/<category subdir>/<name>`.
    pub target_path: PathBuf,
    /// Skills or subagents.
    pub category: Category,
    /// Entry name, identical in source and target.
    pub name: String,
    /// File or directory, as seen in the source.
    pub source_kind: EntryKind,
}

/// Builds the transfer ops from `source` into the tool rooted at `target_root`.
///
/// Skills come first, then subagents, each in the source listing order.
pub fn plan_transfers(
    source: &DetectedTool,
    target: &ToolDescriptor,
    target_root: &Path,
    params: &SyncParams,
) -> Vec<TransferOp> {
    let mut ops = Vec::new();
    for category in Category::ALL {
        if !params.includes(category) {
            continue;
        }
        let target_dir = target_root.join(target.subdir(category));
        for entry in source.entries(category) {
            ops.push(TransferOp {
                source_path: entry.path.clone(),
                target_path: target_dir.join(&entry.name),
                category,
                name: entry.name.clone(),
                source_kind: entry.kind,
            });
        }
    }
    ops
}

/// Applies (or, in dry-run, simulates) each op in order.
///
/// A failing op is recorded and the remaining ops still run.
pub fn apply_transfers(ops: Vec<TransferOp>, params: &SyncParams) -> Vec<OpResult> {
    ops.into_iter()
        .map(|op| {
            let outcome = apply_one(&op, params);
            match &outcome {
                Ok(decision) => tracing::debug!(
                    category = %op.category,
                    name = %op.name,
                    outcome = %decision,
                    "Transfer op"
                ),
                Err(err) => tracing::warn!(
                    category = %op.category,
                    name = %op.name,
                    error = %err,
                    "Transfer op failed"
                ),
            }
            OpResult { op, outcome }
        })
        .collect()
}

fn apply_one(op: &TransferOp, params: &SyncParams) -> Result<OpOutcome> {
    let exists = op
        .target_path
        .try_exists()
        .map_err(|e| SyncError::io(&op.target_path, e))?;
    // An existing directory is merged rather than skipped: missing files are
    // filled in, existing files are kept.
    let mergeable =
        exists && op.source_kind == EntryKind::Directory && op.target_path.is_dir();

    if params.dry_run {
        return Ok(match (exists, params.force) {
            (false, _) => OpOutcome::WouldCreate,
            (true, true) => OpOutcome::WouldUpdate,
            (true, false) if mergeable && missing_files(&op.source_path, &op.target_path)? > 0 => {
                OpOutcome::WouldMerge
            }
            (true, false) => OpOutcome::WouldSkip,
        });
    }

    if exists && !params.force {
        if !mergeable {
            return Ok(OpOutcome::SkippedExists);
        }
        let stats = copy_entry(&op.source_path, &op.target_path, false)?;
        return Ok(if stats.written > 0 {
            OpOutcome::Merged
        } else {
            OpOutcome::SkippedExists
        });
    }

    copy_entry(&op.source_path, &op.target_path, params.force)?;
    Ok(if exists {
        OpOutcome::Updated
    } else {
        OpOutcome::Created
    })
}

impl Workspace {
    /// Mirrors skills and subagents from `source_id` into `target_id`.
    ///
    /// An absent target tool is initialized first (skeleton plus config stub),
    /// except in dry-run where the report only notes that it would be. When
    /// the category filter excludes everything, nothing is written at all.
    pub fn mirror(
        &self,
        source_id: &str,
        target_id: &str,
        params: &SyncParams,
    ) -> Result<MirrorReport> {
        let source_desc = *self.lookup(source_id)?;
        let target_desc = *self.lookup(target_id)?;
        if source_desc.id == target_desc.id {
            return Err(SyncError::SameTool(source_desc.id.to_string()));
        }

        let source_missing = || SyncError::SourceNotFound {
            tool: source_desc.id.to_string(),
            path: source_desc.root_in(self.root()),
        };

        let mut detected = self.scan()?;
        if !detected.contains_key(source_desc.id) {
            return Err(source_missing());
        }

        let nothing_selected = Category::ALL.iter().all(|c| !params.includes(*c));
        let mut target_init = TargetInit::Existing;
        if nothing_selected {
            if !detected.contains_key(target_desc.id) {
                target_init = TargetInit::LeftAbsent;
            }
        } else if !detected.contains_key(target_desc.id) {
            if params.dry_run {
                target_init = TargetInit::WouldInitialize;
            } else {
                initialize_tool(self.root(), &target_desc)?;
                target_init = TargetInit::Initialized;
                detected = self.scan()?;
            }
        }

        let source = detected.get(source_desc.id).ok_or_else(source_missing)?;
        let target_root = target_desc.root_in(self.root());
        let ops = plan_transfers(source, &target_desc, &target_root, params);

        let outcome = if ops.is_empty() {
            MirrorOutcome::NothingToMirror
        } else {
            MirrorOutcome::Applied(apply_transfers(ops, params))
        };
        let report = MirrorReport {
            source: source_desc.id.to_string(),
            target: target_desc.id.to_string(),
            dry_run: params.dry_run,
            target_init,
            outcome,
        };
        tracing::info!(summary = %report.format_summary(), "Mirror finished");
        Ok(report)
    }
}

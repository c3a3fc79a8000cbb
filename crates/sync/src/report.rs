//! Reporting types for mirror and sync runs.

use crate::error::SyncError;
use crate::mirror::TransferOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision recorded for one transfer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpOutcome {
    /// Dry run: target absent, would be copied.
    WouldCreate,
    /// Dry run: target present, would be overwritten (force).
    WouldUpdate,
    /// Dry run: target directory present, missing files would be filled in.
    WouldMerge,
    /// Dry run: target present, would be left alone.
    WouldSkip,
    /// Target was absent and has been copied.
    Created,
    /// Target was present and has been overwritten (force).
    Updated,
    /// Target directory was present; missing files were filled in.
    Merged,
    /// Target was present and left alone.
    SkippedExists,
}

impl OpOutcome {
    /// Every outcome, in display order.
    pub const ALL: [OpOutcome; 8] = [
        OpOutcome::WouldCreate,
        OpOutcome::WouldUpdate,
        OpOutcome::WouldMerge,
        OpOutcome::WouldSkip,
        OpOutcome::Created,
        OpOutcome::Updated,
        OpOutcome::Merged,
        OpOutcome::SkippedExists,
    ];

    /// Returns a stable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::WouldCreate => "would-create",
            Self::WouldUpdate => "would-update",
            Self::WouldMerge => "would-merge",
            Self::WouldSkip => "would-skip",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Merged => "merged",
            Self::SkippedExists => "skipped-exists",
        }
    }

    /// True for outcomes that changed the target.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created | Self::Updated | Self::Merged)
    }
}

impl fmt::Display for OpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one transfer operation. Failures stay per-op.
#[derive(Debug)]
pub struct OpResult {
    /// The planned transfer.
    pub op: TransferOp,
    /// What happened, or why it failed.
    pub outcome: std::result::Result<OpOutcome, SyncError>,
}

/// State of the mirror target's directory before the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetInit {
    /// Target tool was already present.
    Existing,
    /// Target tool was absent and its skeleton was created.
    Initialized,
    /// Dry run: target tool is absent and would be initialized.
    WouldInitialize,
    /// Target tool is absent and was not created: the filter selected nothing.
    LeftAbsent,
}

/// What a mirror run did.
#[derive(Debug)]
pub enum MirrorOutcome {
    /// The category filter left no entries to transfer.
    NothingToMirror,
    /// Per-op results, in op order.
    Applied(Vec<OpResult>),
}

/// Report for a single `source → target` mirror.
#[derive(Debug)]
pub struct MirrorReport {
    /// Source tool id.
    pub source: String,
    /// Target tool id.
    pub target: String,
    /// Whether this was a preview.
    pub dry_run: bool,
    /// State of the target tool before the run.
    pub target_init: TargetInit,
    /// Per-op results or the no-op marker.
    pub outcome: MirrorOutcome,
}

impl MirrorReport {
    /// Per-op results; empty when there was nothing to mirror.
    pub fn results(&self) -> &[OpResult] {
        match &self.outcome {
            MirrorOutcome::NothingToMirror => &[],
            MirrorOutcome::Applied(results) => results,
        }
    }

    /// True when the filter produced no operations.
    pub fn is_nothing_to_mirror(&self) -> bool {
        matches!(self.outcome, MirrorOutcome::NothingToMirror)
    }

    /// Number of ops that ended with `outcome`.
    pub fn count(&self, outcome: OpOutcome) -> usize {
        self.results()
            .iter()
            .filter(|r| matches!(r.outcome, Ok(o) if o == outcome))
            .count()
    }

    /// Number of ops that failed.
    pub fn failed(&self) -> usize {
        self.results().iter().filter(|r| r.outcome.is_err()).count()
    }

    /// One-line summary, e.g. `claude → cursor: 2 created, 1 skipped-exists`.
    pub fn format_summary(&self) -> String {
        let mut out = format!("{} → {}", self.source, self.target);
        match self.target_init {
            TargetInit::Existing => {}
            TargetInit::Initialized => out.push_str(" (initialized target)"),
            TargetInit::WouldInitialize => out.push_str(" (would initialize target)"),
            TargetInit::LeftAbsent => out.push_str(" (target absent)"),
        }
        if self.is_nothing_to_mirror() {
            out.push_str(": nothing to mirror");
            return out;
        }
        let mut parts: Vec<String> = OpOutcome::ALL
            .iter()
            .filter_map(|o| {
                let n = self.count(*o);
                (n > 0).then(|| format!("{n} {o}"))
            })
            .collect();
        let failed = self.failed();
        if failed > 0 {
            parts.push(format!("{failed} failed"));
        }
        out.push_str(": ");
        out.push_str(&parts.join(", "));
        out
    }
}

/// What a full-mesh sync did.
#[derive(Debug)]
pub enum SyncAllOutcome {
    /// Fewer than two tools were detected; nothing was mirrored.
    InsufficientTools {
        /// Ids of the tools that were detected.
        detected: Vec<String>,
    },
    /// One report per ordered pair, in run order.
    Completed(Vec<MirrorReport>),
}

/// Report for a full-mesh sync.
#[derive(Debug)]
pub struct SyncAllReport {
    /// Pair reports, or why none ran.
    pub outcome: SyncAllOutcome,
}

impl SyncAllReport {
    /// Pair reports; empty when too few tools were detected.
    pub fn pairs(&self) -> &[MirrorReport] {
        match &self.outcome {
            SyncAllOutcome::InsufficientTools { .. } => &[],
            SyncAllOutcome::Completed(pairs) => pairs,
        }
    }

    /// Sum of `outcome` across all pairs.
    pub fn count(&self, outcome: OpOutcome) -> usize {
        self.pairs().iter().map(|p| p.count(outcome)).sum()
    }

    /// Failed ops across all pairs.
    pub fn failed(&self) -> usize {
        self.pairs().iter().map(MirrorReport::failed).sum()
    }
}

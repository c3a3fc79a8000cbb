//! Full-mesh sync across every detected tool.

use crate::mirror::SyncParams;
use crate::report::{SyncAllOutcome, SyncAllReport};
use crate::workspace::Workspace;
use crate::Result;

/// Runs the mirror engine over every ordered pair of detected tools.
///
/// The detected set is taken once at the start. Each pair then goes through
/// [`Workspace::mirror`], which scans again, so entries created by an earlier
/// pair are visible to later pairs in the same run. With `force`, one pass
/// leaves every tool holding the union of all entries.
pub struct SyncOrchestrator<'a> {
    workspace: &'a Workspace,
}

impl<'a> SyncOrchestrator<'a> {
    /// Creates an orchestrator over `workspace`.
    pub fn new(workspace: &'a Workspace) -> Self {
        Self { workspace }
    }

    /// Performs the full-mesh sync.
    ///
    /// Fewer than two detected tools is not an error: the report carries an
    /// `InsufficientTools` outcome. Per-op failures are kept in the pair
    /// reports; pair-level errors (e.g. a failed scan) abort the run.
    pub fn sync_all(&self, params: &SyncParams) -> Result<SyncAllReport> {
        let detected = self.workspace.scan()?;
        let ids: Vec<&'static str> = detected.keys().copied().collect();
        if ids.len() < 2 {
            tracing::info!(detected = ?ids, "Fewer than two tools detected; nothing to sync");
            return Ok(SyncAllReport {
                outcome: SyncAllOutcome::InsufficientTools {
                    detected: ids.iter().map(|id| id.to_string()).collect(),
                },
            });
        }

        let mut pairs = Vec::with_capacity(ids.len() * (ids.len() - 1));
        for source in &ids {
            for target in &ids {
                if source == target {
                    continue;
                }
                pairs.push(self.workspace.mirror(source, target, params)?);
            }
        }
        Ok(SyncAllReport {
            outcome: SyncAllOutcome::Completed(pairs),
        })
    }
}

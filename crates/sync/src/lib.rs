//! Skill and subagent mirroring across AI coding tool directories.
//!
//! Mirrors entries between tools (`.claude`, `.cursor`, ...) under one
//! working root, runs full-mesh syncs across every detected tool, and keeps
//! a global registry for adding a skill once and installing it everywhere.
//!
//! Synchronization is copy-if-absent or copy-if-forced: there is no diffing,
//! no merge of file contents, and no record of earlier runs.
//!
//! # Examples
//!
//! ```
//! use skill_sync::{OpOutcome, SyncOrchestrator, SyncParams, Workspace};
//! use tempfile::tempdir;
//!
//! let tmp = tempdir().unwrap();
//! std::fs::create_dir_all(tmp.path().join(".claude/skills")).unwrap();
//! std::fs::create_dir_all(tmp.path().join(".cursor/subagents")).unwrap();
//! std::fs::write(tmp.path().join(".claude/skills/review.md"), "# Review").unwrap();
//! std::fs::write(tmp.path().join(".cursor/subagents/planner.md"), "# Planner").unwrap();
//!
//! let workspace = Workspace::with_root(tmp.path());
//! let report = SyncOrchestrator::new(&workspace)
//!     .sync_all(&SyncParams::default())
//!     .unwrap();
//! assert_eq!(report.count(OpOutcome::Created), 2);
//! assert!(tmp.path().join(".cursor/skills/review.md").exists());
//! assert!(tmp.path().join(".claude/subagents/planner.md").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod copier;
pub mod error;
pub mod global;
pub mod init;
pub mod mirror;
pub mod orchestrator;
pub mod report;
pub mod workspace;

/// Result type for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

pub use copier::{copy_entry, CopyStats};
pub use error::SyncError;
pub use global::{
    AddOutcome, GlobalRegistry, InstallOutcome, InstallReport, ToolInstall,
    FALLBACK_SOURCE_TOOLS,
};
pub use init::{initialize_tool, InitReport, ToolConfig, CONFIG_VERSION};
pub use mirror::{apply_transfers, plan_transfers, SyncParams, TransferOp};
pub use orchestrator::SyncOrchestrator;
pub use report::{
    MirrorOutcome, MirrorReport, OpOutcome, OpResult, SyncAllOutcome, SyncAllReport, TargetInit,
};
pub use workspace::Workspace;

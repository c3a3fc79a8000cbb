//! Tool registry and directory scanning for skill-sync.
//!
//! This crate provides:
//! - The static table of supported tools and their on-disk layout.
//! - Detection of which tools are present under a working root.
//! - Enumeration of each tool's skill and subagent entries.
//!
//! # Examples
//!
//! ```
//! use skill_sync_discovery::{scan, EntryKind, ToolRegistry};
//! use tempfile::tempdir;
//!
//! let temp = tempdir().unwrap();
//! let skills = temp.path().join(".claude/skills");
//! std::fs::create_dir_all(skills.join("alpha")).unwrap();
//! std::fs::write(skills.join("beta.md"), "# Beta").unwrap();
//!
//! let detected = scan(temp.path(), &ToolRegistry::builtin()).unwrap();
//! let claude = &detected["claude"];
//! assert_eq!(claude.skills.len(), 2);
//! assert!(claude.skills.iter().any(|e| e.kind == EntryKind::Directory));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Result type for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Tool detection and entry listing.
pub mod scanner;
/// Static tool descriptors.
pub mod tools;
/// Entry, category, and error types.
pub mod types;

pub use scanner::{list_entries, scan, scan_tool, DetectedTool, DetectedTools};
pub use tools::{ToolDescriptor, ToolRegistry, BUILTIN_TOOLS};
pub use types::{
    has_recognized_extension, Category, DiscoveryError, EntryKind, EntryRef,
    RECOGNIZED_EXTENSIONS,
};

//! Tool directory initialization: skeleton plus JSON config stub.

use crate::error::SyncError;
use crate::Result;
use serde::{Deserialize, Serialize};
use skill_sync_discovery::{Category, ToolDescriptor};
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Version recorded in freshly written config stubs.
pub const CONFIG_VERSION: &str = "1.0.0";

/// Contents of `<tool>/<config-file>`. Written on initialization, never read by sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Tool id.
    pub name: String,
    /// Config format version, always [`CONFIG_VERSION`] when written.
    pub version: String,
    /// RFC 3339 creation timestamp (UTC).
    pub created: String,
}

impl ToolConfig {
    /// Stub for `descriptor`, stamped with the current time.
    pub fn new(descriptor: &ToolDescriptor) -> Result<Self> {
        Ok(Self {
            name: descriptor.id.to_string(),
            version: CONFIG_VERSION.to_string(),
            created: OffsetDateTime::now_utc().format(&Rfc3339)?,
        })
    }
}

/// What initialization did for one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Tool id.
    pub tool: String,
    /// Tool root under the working root.
    pub root_path: PathBuf,
    /// The tool root did not exist before.
    pub created_root: bool,
    /// A config stub was written (false when one already existed).
    pub wrote_config: bool,
}

/// Creates `<working_root>/<root_dir>/{skills,subagents}` and the config stub.
///
/// Idempotent: existing directories and an existing config file are left as is.
pub fn initialize_tool(working_root: &Path, descriptor: &ToolDescriptor) -> Result<InitReport> {
    let root_path = descriptor.root_in(working_root);
    let created_root = !root_path.exists();

    for category in Category::ALL {
        let dir = root_path.join(descriptor.subdir(category));
        fs::create_dir_all(&dir).map_err(|e| SyncError::io(&dir, e))?;
    }

    let config_path = root_path.join(descriptor.config_file_name);
    let wrote_config = if config_path.exists() {
        false
    } else {
        let config = ToolConfig::new(descriptor)?;
        let text = serde_json::to_string_pretty(&config)?;
        fs::write(&config_path, text).map_err(|e| SyncError::io(&config_path, e))?;
        true
    };

    tracing::info!(
        tool = descriptor.id,
        root = %root_path.display(),
        created_root,
        wrote_config,
        "Initialized tool directory"
    );

    Ok(InitReport {
        tool: descriptor.id.to_string(),
        root_path,
        created_root,
        wrote_config,
    })
}

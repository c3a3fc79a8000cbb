use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Overrides the working root that holds the tool directories.
pub const ENV_ROOT: &str = "SKILL_SYNC_ROOT";
/// Overrides the global skill registry directory.
pub const ENV_GLOBAL_DIR: &str = "SKILL_SYNC_GLOBAL_DIR";
/// Enables debug logging when set to `1` or `true`.
pub const ENV_VERBOSE: &str = "SKILL_SYNC_VERBOSE";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the working root from `SKILL_SYNC_ROOT`, if set and non-empty.
pub fn working_root_from_env() -> Option<PathBuf> {
    non_empty_var(ENV_ROOT).map(PathBuf::from)
}

/// Returns the global registry directory from `SKILL_SYNC_GLOBAL_DIR`, if set and non-empty.
pub fn global_dir_from_env() -> Option<PathBuf> {
    non_empty_var(ENV_GLOBAL_DIR).map(PathBuf::from)
}

/// Default global registry location under `home`.
///
/// ```
/// use std::path::Path;
///
/// let dir = skill_sync_state::default_global_dir(Path::new("/home/dev"));
/// assert_eq!(dir, Path::new("/home/dev/.skill-sync/global-skills"));
/// ```
pub fn default_global_dir(home: &Path) -> PathBuf {
    home.join(".skill-sync").join("global-skills")
}

/// Checks if `SKILL_SYNC_VERBOSE` is set to true.
pub fn env_verbose() -> bool {
    std::env::var(ENV_VERBOSE)
        .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Fully resolved configuration for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory containing the `.<tool>` directories.
    pub working_root: PathBuf,
    /// Directory of the global skill registry.
    pub global_root: PathBuf,
    /// Debug logging requested.
    pub verbose: bool,
}

impl Settings {
    /// Resolves settings from explicit flags, falling back to the environment.
    pub fn resolve(
        root_flag: Option<PathBuf>,
        global_flag: Option<PathBuf>,
        verbose_flag: bool,
    ) -> Result<Self> {
        let working_root = match root_flag.or_else(working_root_from_env) {
            Some(root) => root,
            None => std::env::current_dir().context("failed to determine current directory")?,
        };
        let global_root = match global_flag.or_else(global_dir_from_env) {
            Some(dir) => dir,
            None => default_global_dir(&home_dir()?),
        };
        Ok(Self {
            working_root,
            global_root,
            verbose: verbose_flag || env_verbose(),
        })
    }
}

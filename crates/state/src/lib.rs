//! Resolves skill-sync configuration from flags, environment, and defaults.
//!
//! Precedence is always: explicit flag, then environment variable, then the
//! built-in default. The resolved [`Settings`] value is what gets injected
//! into the sync core; nothing downstream reads the environment again.

pub mod env;

pub use env::{
    default_global_dir, env_verbose, global_dir_from_env, home_dir, working_root_from_env,
    Settings, ENV_GLOBAL_DIR, ENV_ROOT, ENV_VERBOSE,
};

//! Command-line entry point for `skill-sync`.
//!
//! All behavior lives in the `skill_sync_cli` library so it can be tested
//! without spawning the binary.

fn main() -> anyhow::Result<()> {
    skill_sync_cli::run()
}

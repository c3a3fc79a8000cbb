//! Recursive file and directory copying with an overwrite policy.
//!
//! Only leaf file writes are gated by `overwrite`. Directories are always
//! created, so copying a directory onto an existing one with
//! `overwrite = false` fills in missing files and leaves existing ones
//! untouched. The result can mix old and new files inside one tree; repeated
//! syncs rely on that merge behavior.

use crate::error::SyncError;
use crate::Result;
use skill_sync_discovery::EntryKind;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Leaf file counts for one copy call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    /// Files whose bytes were written.
    pub written: usize,
    /// Files left alone because the target existed and overwrite was off.
    pub skipped: usize,
}

/// Copies a file or directory tree from `source` to `target`.
pub fn copy_entry(source: &Path, target: &Path, overwrite: bool) -> Result<CopyStats> {
    let meta = fs::metadata(source).map_err(|e| SyncError::io(source, e))?;
    let mut stats = CopyStats::default();
    match EntryKind::from_metadata(&meta) {
        EntryKind::File => copy_file(source, target, overwrite, &mut stats)?,
        EntryKind::Directory => copy_dir(source, target, overwrite, &mut stats)?,
    }
    Ok(stats)
}

fn copy_file(source: &Path, target: &Path, overwrite: bool, stats: &mut CopyStats) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
    }
    if !overwrite && target.exists() {
        tracing::debug!(target = %target.display(), "Keeping existing file");
        stats.skipped += 1;
        return Ok(());
    }
    fs::copy(source, target).map_err(|e| SyncError::io(target, e))?;
    tracing::debug!(
        source = %source.display(),
        target = %target.display(),
        "Copied file"
    );
    stats.written += 1;
    Ok(())
}

fn copy_dir(source: &Path, target: &Path, overwrite: bool, stats: &mut CopyStats) -> Result<()> {
    fs::create_dir_all(target).map_err(|e| SyncError::io(target, e))?;
    for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(source, e))?;
        let Ok(rel) = entry.path().strip_prefix(source) else {
            continue;
        };
        let dest = target.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|e| SyncError::io(&dest, e))?;
        } else {
            copy_file(entry.path(), &dest, overwrite, stats)?;
        }
    }
    Ok(())
}

/// Counts leaf files under `source` that have no counterpart under `target`.
///
/// Read-only; used to preview a fill-in merge. A file source counts as one
/// missing file when `target` does not exist.
pub fn missing_files(source: &Path, target: &Path) -> Result<usize> {
    let meta = fs::metadata(source).map_err(|e| SyncError::io(source, e))?;
    if EntryKind::from_metadata(&meta) == EntryKind::File {
        return Ok(usize::from(!target.exists()));
    }
    let mut missing = 0;
    for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(source, e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(source) else {
            continue;
        };
        if !target.join(rel).exists() {
            missing += 1;
        }
    }
    Ok(missing)
}

fn walk_error(root: &Path, err: walkdir::Error) -> SyncError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    SyncError::Filesystem {
        path,
        source: err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_file_and_creates_parents() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("a.md");
        fs::write(&src, "# a").unwrap();
        let dst = tmp.path().join("deep/nested/a.md");

        let stats = copy_entry(&src, &dst, false).unwrap();
        assert_eq!(stats.written, 1);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "# a");
    }

    #[test]
    fn existing_file_is_kept_without_overwrite() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("a.md");
        let dst = tmp.path().join("b.md");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        let stats = copy_entry(&src, &dst, false).unwrap();
        assert_eq!(stats, CopyStats { written: 0, skipped: 1 });
        assert_eq!(fs::read_to_string(&dst).unwrap(), "old");

        let stats = copy_entry(&src, &dst, true).unwrap();
        assert_eq!(stats.written, 1);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn directory_copy_fills_gaps_only() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src/skill1");
        fs::create_dir_all(src.join("refs")).unwrap();
        fs::write(src.join("x.md"), "x new").unwrap();
        fs::write(src.join("y.md"), "y new").unwrap();
        fs::write(src.join("refs/z.md"), "z new").unwrap();

        let dst = tmp.path().join("dst/skill1");
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("x.md"), "x old").unwrap();

        assert_eq!(missing_files(&src, &dst).unwrap(), 2);
        let stats = copy_entry(&src, &dst, false).unwrap();
        assert_eq!(stats, CopyStats { written: 2, skipped: 1 });
        assert_eq!(fs::read_to_string(dst.join("x.md")).unwrap(), "x old");
        assert_eq!(fs::read_to_string(dst.join("y.md")).unwrap(), "y new");
        assert_eq!(fs::read_to_string(dst.join("refs/z.md")).unwrap(), "z new");
        assert_eq!(missing_files(&src, &dst).unwrap(), 0);
    }

    #[test]
    fn directory_copy_with_overwrite_replaces_leaves() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("x.md"), "x new").unwrap();
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("x.md"), "x old").unwrap();
        fs::write(dst.join("extra.md"), "kept").unwrap();

        copy_entry(&src, &dst, true).unwrap();
        assert_eq!(fs::read_to_string(dst.join("x.md")).unwrap(), "x new");
        // Copying never deletes target-only files.
        assert_eq!(fs::read_to_string(dst.join("extra.md")).unwrap(), "kept");
    }

    #[test]
    fn empty_subdirectories_are_created() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("empty/inner")).unwrap();
        let dst = tmp.path().join("dst");

        let stats = copy_entry(&src, &dst, false).unwrap();
        assert_eq!(stats.written, 0);
        assert!(dst.join("empty/inner").is_dir());
    }

    #[test]
    fn missing_source_is_a_filesystem_error() {
        let tmp = tempdir().unwrap();
        let err = copy_entry(&tmp.path().join("nope"), &tmp.path().join("dst"), false)
            .unwrap_err();
        assert!(matches!(err, SyncError::Filesystem { .. }));
    }
}

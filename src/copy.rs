//! Best-effort copies for the configuration snapshot.
//!
//! A backup run must not stop because one file is unreadable, so the public
//! functions report success as a `bool` and log the reason at debug level.
//! The strict helpers underneath use `anyhow` like everything else.

use anyhow::{Context, Result};
use std::fs::{self, File, FileTimes};
use std::path::Path;
use walkdir::WalkDir;

/// Copy a regular file to `dst`, creating parent directories and keeping the
/// source's permissions and timestamps.
///
/// Returns `false` (and creates nothing) when `src` is missing or not a
/// regular file. Any I/O error also yields `false`.
pub fn safe_copy_file(src: &Path, dst: &Path) -> bool {
    if !src.is_file() {
        tracing::debug!(src = %src.display(), "not a regular file, skipping copy");
        return false;
    }
    match copy_file_preserving(src, dst) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(src = %src.display(), error = %format!("{err:#}"), "file copy failed");
            false
        }
    }
}

/// Copy the directory tree at `src` to `dst`.
///
/// Whatever already exists at `dst` is removed first, so the result mirrors
/// `src` exactly. Symlinks are recreated, not followed.
pub fn safe_copy_dir(src: &Path, dst: &Path) -> bool {
    if !src.is_dir() {
        tracing::debug!(src = %src.display(), "not a directory, skipping copy");
        return false;
    }
    match replace_dir(src, dst) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(src = %src.display(), error = %format!("{err:#}"), "directory copy failed");
            false
        }
    }
}

fn copy_file_preserving(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    // A read-only copy left by an earlier run would make fs::copy fail.
    if dst.is_symlink() || dst.exists() {
        fs::remove_file(dst)
            .with_context(|| format!("Failed to remove existing {}", dst.display()))?;
    }
    fs::copy(src, dst).with_context(|| {
        format!("Failed to copy {} to {}", src.display(), dst.display())
    })?;

    let meta = fs::metadata(src)
        .with_context(|| format!("Failed to read metadata: {}", src.display()))?;
    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    File::open(dst)
        .and_then(|file| file.set_times(times))
        .with_context(|| format!("Failed to set timestamps: {}", dst.display()))?;
    Ok(())
}

fn replace_dir(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    if dst.is_symlink() || dst.is_file() {
        fs::remove_file(dst)
            .with_context(|| format!("Failed to remove existing {}", dst.display()))?;
    } else if dst.exists() {
        fs::remove_dir_all(dst)
            .with_context(|| format!("Failed to remove existing {}", dst.display()))?;
    }

    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create directory: {}", target.display()))?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())?;
            std::os::unix::fs::symlink(&link, &target)
                .with_context(|| format!("Failed to create symlink: {}", target.display()))?;
        } else {
            copy_file_preserving(entry.path(), &target)?;
        }
    }

    Ok(())
}

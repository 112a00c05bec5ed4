//! Recursive directory copy with all-or-nothing visibility

use crate::{Result, UniverseError};
use std::path::Path;
use walkdir::WalkDir;

/// Copy the tree at `source` to `dest`.
///
/// The copy is staged in a hidden sibling of `dest` and renamed into place
/// once complete. On failure the staging directory is removed, so `dest`
/// either does not exist or holds the full copy. Fails if `dest` exists.
pub fn copy_dir_atomic(source: &Path, dest: &Path) -> Result<()> {
    let clone_err = |source_err: std::io::Error| UniverseError::Clone {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: source_err,
    };

    if dest.exists() {
        return Err(clone_err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    let parent = dest.parent().ok_or_else(|| {
        clone_err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "destination has no parent directory",
        ))
    })?;

    // Dropped (and deleted) on any early return
    let staging = tempfile::Builder::new()
        .prefix(".clone-")
        .tempdir_in(parent)
        .map_err(clone_err)?;

    copy_tree(source, staging.path()).map_err(clone_err)?;

    // Re-check right before publishing the copy
    if dest.exists() {
        return Err(clone_err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    let staged = staging.into_path();
    if let Err(e) = std::fs::rename(&staged, dest) {
        std::fs::remove_dir_all(&staged).ok();
        return Err(clone_err(e));
    }

    tracing::info!(
        from = %source.display(),
        to = %dest.display(),
        "Cloned version directory"
    );
    Ok(())
}

fn copy_tree(source: &Path, target: &Path) -> std::io::Result<()> {
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(std::io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(std::io::Error::other)?;
        let out = target.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            std::fs::create_dir_all(&out)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &out)?;
        } else {
            std::fs::copy(entry.path(), &out)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, out: &Path) -> std::io::Result<()> {
    let target = std::fs::read_link(link)?;
    std::os::unix::fs::symlink(target, out)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, out: &Path) -> std::io::Result<()> {
    std::fs::copy(link, out).map(|_| ())
}

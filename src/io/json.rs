//! JSON descriptor reading and durable pretty writing

use crate::{Result, UniverseError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Read and parse a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| UniverseError::MalformedDescriptor {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Render a value as pretty JSON: 2-space indent and a trailing newline.
///
/// `serde_json::Value` maps are ordered by key, so documents read through
/// `Value` come out with sorted keys.
pub fn to_pretty_string<T: Serialize>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write pretty JSON to `path`, returning only once the bytes and the rename
/// are on disk.
///
/// The content goes to a temporary file next to the target, is fsynced, then
/// renamed over the target so readers never observe a partial document. An
/// existing target keeps its permissions.
pub fn write_pretty_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let rendered = to_pretty_string(value)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".universe-")
        .suffix(".json.tmp")
        .tempfile_in(parent)?;
    tmp.write_all(rendered.as_bytes())?;
    tmp.flush()?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file().set_permissions(existing.permissions())?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| UniverseError::Io(e.error))?;
    sync_dir(parent)?;

    tracing::debug!(path = %path.display(), bytes = rendered.len(), "Wrote JSON");
    Ok(())
}

/// Flush a directory entry change (the rename) to disk
#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    std::fs::File::open(dir)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

use std::fmt;
use std::path::{Path, PathBuf};

/// One version directory of a package, named by a non-negative integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDir {
    /// Numeric directory name
    pub id: u64,
    /// Full path of the directory
    pub path: PathBuf,
}

impl VersionDir {
    pub fn new(id: u64, path: PathBuf) -> Self {
        Self { id, path }
    }

    /// Directory name as stored on disk
    pub fn name(&self) -> String {
        self.id.to_string()
    }

    /// The slot right after this one, in the same package directory
    pub fn successor(&self) -> Option<VersionDir> {
        let next = self.id.checked_add(1)?;
        let parent = self.path.parent()?;
        Some(VersionDir::new(next, parent.join(next.to_string())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for VersionDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Parse a version directory name.
///
/// Only canonical decimal names are accepted: ASCII digits with no sign,
/// whitespace or leading zero (except "0" itself). Returns `None` otherwise.
pub fn parse_version_name(name: &str) -> Option<u64> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.len() > 1 && name.starts_with('0') {
        return None;
    }
    name.parse().ok()
}

//! Package descriptor (package.json)

use crate::io::json::read_json;
use crate::{Result, UniverseError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Package descriptor file name
pub const PACKAGE_FILE: &str = "package.json";

/// The fields of `package.json` that the catalog reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Human-facing version string (e.g. "2.3.0-1.1.0")
    pub version: String,

    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether the package is a framework
    #[serde(default)]
    pub framework: bool,

    /// Whether the package is featured
    #[serde(default)]
    pub selected: bool,

    /// Everything else in the file
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageDescriptor {
    /// Load `package.json` from a version directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(PACKAGE_FILE);
        if !path.is_file() {
            return Err(UniverseError::MissingDescriptor(path));
        }
        read_json(&path)
    }
}

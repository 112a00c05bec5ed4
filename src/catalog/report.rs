//! Catalog report types
//!
//! The JSON form keys packages by name; each package maps `default_version`
//! and then every version directory name to its record:
//!
//! ```json
//! {
//!   "kafka": {
//!     "default_version": {"12": "2.3.0-1.1.0"},
//!     "11": {"version": "...", "resource": [{"uris": [...]}, {"docker": [...]}, {"cli": [...]}]},
//!     "12": {...}
//!   }
//! }
//! ```

use crate::descriptor::ResourceDocument;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// The aggregated view of a store
#[derive(Debug, Clone, Default)]
pub struct CatalogReport {
    /// Retained packages, sorted by bucket then name
    pub packages: Vec<PackageEntry>,
    /// Requested names that are not in the store
    pub missing: Vec<String>,
    /// Package directories that hold no version directory
    pub empty: Vec<String>,
}

impl CatalogReport {
    pub fn get(&self, name: &str) -> Option<&PackageEntry> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn package_names(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn version_count(&self) -> usize {
        self.packages.iter().map(|p| p.versions.len()).sum()
    }
}

impl Serialize for CatalogReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.packages.len()))?;
        for package in &self.packages {
            map.serialize_entry(&package.name, package)?;
        }
        map.end()
    }
}

/// One package and all of its versions
#[derive(Debug, Clone)]
pub struct PackageEntry {
    pub name: String,
    /// Current version directory name
    pub default_dir: String,
    /// Descriptor version of the current version
    pub default_version: String,
    /// Every version, ascending by directory id
    pub versions: Vec<VersionRecord>,
}

impl PackageEntry {
    pub fn version(&self, dir: &str) -> Option<&VersionRecord> {
        self.versions.iter().find(|v| v.dir == dir)
    }
}

impl Serialize for PackageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.versions.len() + 1))?;
        map.serialize_entry(
            "default_version",
            &SingleEntry(&self.default_dir, &self.default_version),
        )?;
        for record in &self.versions {
            map.serialize_entry(&record.dir, record)?;
        }
        map.end()
    }
}

/// Metadata of one version directory
#[derive(Debug, Clone, Serialize)]
pub struct VersionRecord {
    #[serde(skip)]
    pub dir: String,
    pub version: String,
    pub description: String,
    pub framework: bool,
    pub tags: Vec<String>,
    pub selected: bool,
    pub resource: ResourceSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Value>,
}

impl VersionRecord {
    pub fn from_document(dir: String, doc: &ResourceDocument) -> Self {
        let package = doc.package();
        Self {
            dir,
            version: package.version.clone(),
            description: package.description.clone(),
            framework: package.framework,
            tags: package.tags.clone(),
            selected: package.selected,
            resource: ResourceSummary::from_resource(doc.resource()),
            command: doc.command().cloned(),
        }
    }
}

/// The three resource collections of a version.
///
/// Serialized as `[{"uris": [[k, v], ...]}, {"docker": [...]}, {"cli": [...]}]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSummary {
    pub uris: Vec<(String, Value)>,
    pub docker: Vec<(String, Value)>,
    pub cli: Vec<(String, Value)>,
}

impl ResourceSummary {
    /// Collect the sections, treating any missing one as empty
    pub fn from_resource(resource: &Value) -> Self {
        Self {
            uris: entries_at(resource, &["assets", "uris"]),
            docker: entries_at(resource, &["assets", "container", "docker"]),
            cli: entries_at(resource, &["cli", "binaries"]),
        }
    }
}

impl Serialize for ResourceSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&SingleEntry("uris", &self.uris))?;
        seq.serialize_element(&SingleEntry("docker", &self.docker))?;
        seq.serialize_element(&SingleEntry("cli", &self.cli))?;
        seq.end()
    }
}

/// A one-entry JSON object
struct SingleEntry<'a, V: ?Sized>(&'a str, &'a V);

impl<V: Serialize + ?Sized> Serialize for SingleEntry<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, self.1)?;
        map.end()
    }
}

fn entries_at(resource: &Value, path: &[&str]) -> Vec<(String, Value)> {
    path.iter()
        .try_fold(resource, |node, key| node.get(*key))
        .and_then(Value::as_object)
        .map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

//! Version directory resolution over the on-disk store
//!
//! The directory tree is the only source of truth: nothing is cached, every
//! call re-reads the directories it needs.

use super::version::{parse_version_name, VersionDir};
use crate::descriptor::PackageDescriptor;
use crate::io::fs::copy_dir_atomic;
use crate::io::UniversePaths;
use crate::{Result, UniverseError};
use std::path::{Path, PathBuf};

/// A package directory found while walking the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDir {
    /// Bucket letter the package lives under
    pub bucket: String,
    /// Package name
    pub name: String,
    pub path: PathBuf,
}

/// Result of looking a version up by its descriptor version string
#[derive(Debug, Clone)]
pub struct VersionMatch {
    /// Every version directory whose descriptor reports the version, ascending
    pub matches: Vec<VersionDir>,
    /// The match with the largest directory id
    pub chosen: VersionDir,
}

impl VersionMatch {
    /// More than one directory claims the same version string
    pub fn is_ambiguous(&self) -> bool {
        self.matches.len() > 1
    }
}

/// Where a clone of the current version would go
#[derive(Debug, Clone)]
pub struct NextSlot {
    /// All version directories, ascending
    pub versions: Vec<VersionDir>,
    /// The current version, default clone source
    pub source: VersionDir,
    /// `source.id + 1`; not created
    pub destination: VersionDir,
}

/// Read access to a package store plus version cloning
#[derive(Debug, Clone)]
pub struct PackageStore {
    paths: UniversePaths,
}

impl PackageStore {
    pub fn new(paths: UniversePaths) -> Self {
        Self { paths }
    }

    /// Open a store directory directly
    pub fn open(store_dir: &Path) -> Self {
        Self::new(UniversePaths::for_store(store_dir))
    }

    pub fn root(&self) -> &Path {
        &self.paths.store_dir
    }

    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.paths.package_dir(package)
    }

    /// True iff the package directory exists and is non-empty
    pub fn exists(&self, package: &str) -> bool {
        if package.is_empty() {
            return false;
        }
        std::fs::read_dir(self.package_dir(package))
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
    }

    /// All version directories of a package, sorted by id.
    ///
    /// Hidden entries (such as an interrupted clone's staging directory) and
    /// plain files are ignored. Symlinks to directories count as versions.
    /// Any other name that is not a canonical non-negative integer makes the
    /// store malformed.
    pub fn list_versions(&self, package: &str) -> Result<Vec<VersionDir>> {
        let dir = self.package_dir(package);
        if package.is_empty() || !dir.is_dir() {
            return Err(UniverseError::NotFound(package.to_string()));
        }

        let mut versions = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !entry.path().is_dir() {
                continue;
            }

            let id = parse_version_name(&name).ok_or_else(|| {
                UniverseError::MalformedStore(format!(
                    "version directory '{}' of package '{}' is not a canonical integer",
                    name, package
                ))
            })?;
            versions.push(VersionDir::new(id, entry.path()));
        }

        versions.sort_by_key(|v| v.id);
        Ok(versions)
    }

    /// The version directory with the largest numeric name
    pub fn current_version(&self, package: &str) -> Result<VersionDir> {
        self.list_versions(package)?
            .pop()
            .ok_or_else(|| UniverseError::NotFound(package.to_string()))
    }

    /// Find the version directories whose `package.json` reports `version`.
    ///
    /// The match with the largest directory id wins.
    pub fn resolve_by_version_string(&self, package: &str, version: &str) -> Result<VersionMatch> {
        let mut matches = Vec::new();
        for dir in self.list_versions(package)? {
            let descriptor = PackageDescriptor::from_dir(&dir.path)?;
            if descriptor.version == version {
                matches.push(dir);
            }
        }

        let chosen = matches
            .last()
            .cloned()
            .ok_or_else(|| UniverseError::VersionNotFound {
                package: package.to_string(),
                version: version.to_string(),
            })?;

        if matches.len() > 1 {
            tracing::warn!(
                package,
                version,
                dirs = ?matches.iter().map(VersionDir::name).collect::<Vec<_>>(),
                chosen = %chosen,
                "Several version directories report the same version"
            );
        }

        Ok(VersionMatch { matches, chosen })
    }

    /// The slot a clone of the current version would occupy
    pub fn next_slot(&self, package: &str) -> Result<NextSlot> {
        let versions = self.list_versions(package)?;
        let source = versions
            .last()
            .cloned()
            .ok_or_else(|| UniverseError::NotFound(package.to_string()))?;
        let destination = source.successor().ok_or_else(|| {
            UniverseError::MalformedStore(format!(
                "package '{}' has no version slot after {}",
                package, source
            ))
        })?;

        Ok(NextSlot {
            versions,
            source,
            destination,
        })
    }

    /// Copy a version directory tree into a new slot
    pub fn clone_version(&self, source: &VersionDir, destination: &VersionDir) -> Result<()> {
        copy_dir_atomic(&source.path, &destination.path)
    }

    /// Every package directory in the store, sorted by bucket then name.
    ///
    /// Bucket directories must be named by a single uppercase letter and only
    /// hold packages starting with that letter.
    pub fn list_packages(&self) -> Result<Vec<PackageDir>> {
        let root = self.root();
        if !root.is_dir() {
            return Err(UniverseError::MalformedStore(format!(
                "store directory {} does not exist",
                root.display()
            )));
        }

        let mut packages = Vec::new();
        for bucket_entry in std::fs::read_dir(root)? {
            let bucket_entry = bucket_entry?;
            let bucket = bucket_entry.file_name().to_string_lossy().into_owned();
            if bucket.starts_with('.') || !bucket_entry.file_type()?.is_dir() {
                continue;
            }
            if !is_bucket_name(&bucket) {
                return Err(UniverseError::MalformedStore(format!(
                    "bucket directory '{}' is not a single uppercase letter",
                    bucket
                )));
            }

            for package_entry in std::fs::read_dir(bucket_entry.path())? {
                let package_entry = package_entry?;
                let name = package_entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') || !package_entry.file_type()?.is_dir() {
                    continue;
                }
                if UniversePaths::bucket_name(&name).as_deref() != Some(bucket.as_str()) {
                    return Err(UniverseError::MalformedStore(format!(
                        "package '{}' does not belong in bucket '{}'",
                        name, bucket
                    )));
                }

                packages.push(PackageDir {
                    bucket: bucket.clone(),
                    name,
                    path: package_entry.path(),
                });
            }
        }

        packages.sort_by(|a, b| (&a.bucket, &a.name).cmp(&(&b.bucket, &b.name)));
        tracing::debug!(store = %root.display(), count = packages.len(), "Listed packages");
        Ok(packages)
    }
}

fn is_bucket_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

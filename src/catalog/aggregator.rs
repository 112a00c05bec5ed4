use super::report::{CatalogReport, PackageEntry, VersionRecord};
use crate::descriptor::ResourceDocument;
use crate::store::PackageStore;
use crate::Result;
use std::collections::BTreeSet;

/// Walk the store and describe every package in `filter` (all when empty).
///
/// Malformed buckets and version names, and missing descriptors, abort the
/// walk. Requested packages that are absent are listed in
/// [`CatalogReport::missing`] instead of failing.
pub fn build_catalog(store: &PackageStore, filter: &BTreeSet<String>) -> Result<CatalogReport> {
    let all_packages = store.list_packages()?;
    let mut report = CatalogReport::default();

    for package in &all_packages {
        if !filter.is_empty() && !filter.contains(&package.name) {
            continue;
        }

        let versions = store.list_versions(&package.name)?;
        let Some(current) = versions.last() else {
            tracing::warn!(package = %package.name, "Package has no version directories");
            report.empty.push(package.name.clone());
            continue;
        };

        let mut records = Vec::with_capacity(versions.len());
        for version in &versions {
            let doc = ResourceDocument::load(&version.path)?;
            records.push(VersionRecord::from_document(version.name(), &doc));
        }

        let default_dir = current.name();
        let default_version = records
            .iter()
            .find(|r| r.dir == default_dir)
            .map(|r| r.version.clone())
            .unwrap_or_default();

        tracing::debug!(
            package = %package.name,
            versions = records.len(),
            current = %default_dir,
            "Catalogued package"
        );

        report.packages.push(PackageEntry {
            name: package.name.clone(),
            default_dir,
            default_version,
            versions: records,
        });
    }

    let found: BTreeSet<String> = all_packages.into_iter().map(|p| p.name).collect();
    report.missing = missing_packages(filter, &found);
    Ok(report)
}

/// Requested names absent from the store
pub fn missing_packages(requested: &BTreeSet<String>, found: &BTreeSet<String>) -> Vec<String> {
    requested.difference(found).cloned().collect()
}

//! Catalog aggregation
//!
//! Builds a report of every package version in a store: the current
//! version, each version's package metadata, its resource URIs, docker
//! images and CLI binaries, and its command descriptor when there is one.

mod aggregator;
mod report;

pub use aggregator::{build_catalog, missing_packages};
pub use report::{CatalogReport, PackageEntry, ResourceSummary, VersionRecord};

#[cfg(test)]
mod tests;

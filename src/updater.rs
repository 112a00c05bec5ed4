//! Update orchestration
//!
//! Runs an [`UpdateConfig`] against a store, one package at a time. Problems
//! that only concern one package (it is missing, its requested version is
//! missing, its clone failed) are recorded in the [`UpdateReport`] and the
//! run moves on. Problems that make the store untrustworthy abort the run.

use crate::config::{PackageUpdate, RuleKind, UpdateConfig};
use crate::descriptor::ResourceDocument;
use crate::mutator::apply_rules;
use crate::store::{PackageStore, VersionDir};
use crate::{Result, UniverseError};
use serde::Serialize;
use std::fmt;

/// A non-fatal finding for one configured package
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Problem {
    /// The package is not in the store
    PackageMissing { package: String },
    /// No version directory reports the requested version
    VersionMissing { package: String, version: String },
    /// Several version directories report the requested version; the one
    /// with the largest id was used
    DuplicateVersion {
        package: String,
        version: String,
        dirs: Vec<String>,
        chosen: String,
    },
    /// Processing the package failed; later packages still ran
    Failed { package: String, error: String },
}

impl Problem {
    pub fn package(&self) -> &str {
        match self {
            Problem::PackageMissing { package }
            | Problem::VersionMissing { package, .. }
            | Problem::DuplicateVersion { package, .. }
            | Problem::Failed { package, .. } => package,
        }
    }

    /// Whether the package was left unchanged because of this problem
    pub fn skipped_package(&self) -> bool {
        !matches!(self, Problem::DuplicateVersion { .. })
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::PackageMissing { package } => write!(f, "{} does not exist", package),
            Problem::VersionMissing { package, version } => {
                write!(f, "{}:{} does not exist", package, version)
            }
            Problem::DuplicateVersion {
                package,
                version,
                dirs,
                chosen,
            } => write!(
                f,
                "{}:{} is reported by versions [{}]; using {}",
                package,
                version,
                dirs.join(", "),
                chosen
            ),
            Problem::Failed { package, error } => write!(f, "{}: {}", package, error),
        }
    }
}

/// What happened to one package
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageOutcome {
    pub package: String,
    /// Version directory the selection resolved to
    pub source: String,
    /// Version directory the rules ran against
    pub working: String,
    /// Whether `working` was cloned from `source` in this run
    pub created: bool,
    /// Rules that rewrote a descriptor (or would have, in a dry run)
    pub rules: Vec<RuleKind>,
    pub dry_run: bool,
}

/// Result of an update run
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateReport {
    pub updated: Vec<PackageOutcome>,
    pub problems: Vec<Problem>,
}

impl UpdateReport {
    pub fn outcome(&self, package: &str) -> Option<&PackageOutcome> {
        self.updated.iter().find(|o| o.package == package)
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    fn record(&mut self, problem: Problem) {
        tracing::warn!(package = problem.package(), "{}", problem);
        self.problems.push(problem);
    }
}

/// Applies update configurations to a store
#[derive(Debug, Clone)]
pub struct Updater<'a> {
    store: &'a PackageStore,
    dry_run: bool,
}

impl<'a> Updater<'a> {
    pub fn new(store: &'a PackageStore) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// Resolve and validate without cloning or writing anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every configured package in configuration order
    pub fn run(&self, config: &UpdateConfig) -> Result<UpdateReport> {
        let mut report = UpdateReport::default();

        for (package, update) in &config.packages {
            let _span = tracing::info_span!("update", package = %package).entered();

            match self.update_package(package, update, &mut report) {
                Ok(Some(outcome)) => report.updated.push(outcome),
                Ok(None) => {}
                Err(e) if e.is_package_scoped() => report.record(Problem::Failed {
                    package: package.clone(),
                    error: e.to_string(),
                }),
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            updated = report.updated.len(),
            problems = report.problems.len(),
            dry_run = self.dry_run,
            "Update run finished"
        );
        Ok(report)
    }

    /// Update one package. `Ok(None)` means it was skipped and the reason
    /// was recorded in `report`.
    pub fn update_package(
        &self,
        package: &str,
        update: &PackageUpdate,
        report: &mut UpdateReport,
    ) -> Result<Option<PackageOutcome>> {
        if !self.store.exists(package) {
            report.record(Problem::PackageMissing {
                package: package.to_string(),
            });
            return Ok(None);
        }

        // A package dir holding no version directory counts as missing
        let slot = match self.store.next_slot(package) {
            Ok(slot) => slot,
            Err(UniverseError::NotFound(_)) => {
                report.record(Problem::PackageMissing {
                    package: package.to_string(),
                });
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        let mut source = slot.source;

        if let Some(version) = &update.version {
            let found = match self.store.resolve_by_version_string(package, version) {
                Ok(found) => found,
                Err(UniverseError::VersionNotFound { .. }) => {
                    report.record(Problem::VersionMissing {
                        package: package.to_string(),
                        version: version.clone(),
                    });
                    return Ok(None);
                }
                Err(e) => return Err(e),
            };

            if found.is_ambiguous() {
                report.record(Problem::DuplicateVersion {
                    package: package.to_string(),
                    version: version.clone(),
                    dirs: found.matches.iter().map(VersionDir::name).collect(),
                    chosen: found.chosen.name(),
                });
            }
            source = found.chosen;
        }

        let working = if update.create {
            if !self.dry_run {
                self.store.clone_version(&source, &slot.destination)?;
            }
            slot.destination
        } else {
            source.clone()
        };

        let rules = if self.dry_run {
            // A planned clone does not exist yet; its descriptors are the source's
            let doc = ResourceDocument::load(&source.path)?;
            update
                .rules()
                .into_iter()
                .filter(|kind| *kind != RuleKind::Command || doc.has_command())
                .collect()
        } else if update.rules().is_empty() {
            Vec::new()
        } else {
            let mut doc = ResourceDocument::load(&working.path)?;
            apply_rules(&mut doc, update)?
        };

        Ok(Some(PackageOutcome {
            package: package.to_string(),
            source: source.name(),
            working: working.name(),
            created: update.create,
            rules,
            dry_run: self.dry_run,
        }))
    }
}

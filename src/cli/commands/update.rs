use super::CommandHandler;
use crate::config::UpdateConfig;
use crate::io::json::to_pretty_string;
use crate::io::UniversePaths;
use crate::store::PackageStore;
use crate::updater::{PackageOutcome, Problem, UpdateReport, Updater};
use crate::Result;
use std::path::PathBuf;

/// Handler for the `update` command
pub struct UpdateCommand {
    pub paths: UniversePaths,
    pub file: PathBuf,
    pub dry_run: bool,
    pub json: bool,
}

impl CommandHandler for UpdateCommand {
    fn execute(&self) -> Result<()> {
        let config = UpdateConfig::from_file(&self.file)?;
        let store = PackageStore::new(self.paths.clone());

        let report = Updater::new(&store)
            .with_dry_run(self.dry_run)
            .run(&config)?;

        if self.json {
            print!("{}", to_pretty_string(&report)?);
        } else {
            self.print_summary(&report);
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "update"
    }
}

impl UpdateCommand {
    pub fn new(paths: UniversePaths, file: PathBuf, dry_run: bool, json: bool) -> Self {
        Self {
            paths,
            file,
            dry_run,
            json,
        }
    }

    fn print_summary(&self, report: &UpdateReport) {
        if self.dry_run {
            println!("Dry run: no files were changed\n");
        }

        for outcome in &report.updated {
            println!("{}", format_outcome(outcome));
        }

        for problem in &report.problems {
            println!("{}", format_problem(problem));
        }
    }
}

/// Problems that left the package unchanged are marked as skipped
pub fn format_problem(problem: &Problem) -> String {
    if problem.skipped_package() {
        format!("Skipped: {}", problem)
    } else {
        format!("Warning: {}", problem)
    }
}

/// One summary line, e.g. `kafka: 12 -> 13 (cloned) [uri, cli]`
pub fn format_outcome(outcome: &PackageOutcome) -> String {
    let target = if outcome.created {
        format!("{} -> {} (cloned)", outcome.source, outcome.working)
    } else {
        outcome.working.clone()
    };

    let rules = if outcome.rules.is_empty() {
        "no rules applied".to_string()
    } else {
        outcome
            .rules
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!("{}: {} [{}]", outcome.package, target, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleKind;

    #[test]
    fn test_format_outcome() {
        let cloned = PackageOutcome {
            package: "kafka".to_string(),
            source: "12".to_string(),
            working: "13".to_string(),
            created: true,
            rules: vec![RuleKind::Uri, RuleKind::Cli],
            dry_run: false,
        };
        assert_eq!(format_outcome(&cloned), "kafka: 12 -> 13 (cloned) [uri, cli]");

        let in_place = PackageOutcome {
            package: "spark".to_string(),
            source: "4".to_string(),
            working: "4".to_string(),
            created: false,
            rules: vec![],
            dry_run: false,
        };
        assert_eq!(format_outcome(&in_place), "spark: 4 [no rules applied]");
    }

    #[test]
    fn test_format_problem_marks_skipped_packages() {
        let missing = Problem::PackageMissing {
            package: "cassandra".to_string(),
        };
        assert_eq!(format_problem(&missing), "Skipped: cassandra does not exist");

        let duplicate = Problem::DuplicateVersion {
            package: "spark".to_string(),
            version: "1.2.3".to_string(),
            dirs: vec!["2".to_string(), "5".to_string()],
            chosen: "5".to_string(),
        };
        assert_eq!(
            format_problem(&duplicate),
            "Warning: spark:1.2.3 is reported by versions [2, 5]; using 5"
        );
    }
}

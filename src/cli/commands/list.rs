use super::CommandHandler;
use crate::catalog::{build_catalog, CatalogReport};
use crate::io::json::{to_pretty_string, write_pretty_json};
use crate::io::UniversePaths;
use crate::store::PackageStore;
use crate::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// Handler for the `list` command
pub struct ListCommand {
    pub paths: UniversePaths,
    pub packages: Vec<String>,
    pub output: Option<PathBuf>,
    pub table: bool,
}

/// Table row for the catalog summary
#[derive(Tabled)]
struct CatalogRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Versions")]
    versions: usize,
    #[tabled(rename = "Framework")]
    framework: String,
}

impl CommandHandler for ListCommand {
    fn execute(&self) -> Result<()> {
        let store = PackageStore::new(self.paths.clone());
        let filter: BTreeSet<String> = self
            .packages
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        let report = build_catalog(&store, &filter)?;

        if self.table {
            self.print_table(&report);
        } else if let Some(output) = &self.output {
            write_pretty_json(output, &report)?;
            println!(
                "Wrote {} package(s) to {}",
                report.packages.len(),
                output.display()
            );
        } else {
            print!("{}", to_pretty_string(&report)?);
        }

        if !report.missing.is_empty() {
            eprintln!("Warning: {} do(es) not exist", report.missing.join(", "));
        }
        if !report.empty.is_empty() {
            eprintln!(
                "Warning: {} ha(s|ve) no version directories",
                report.empty.join(", ")
            );
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl ListCommand {
    pub fn new(
        paths: UniversePaths,
        packages: Vec<String>,
        output: Option<PathBuf>,
        table: bool,
    ) -> Self {
        Self {
            paths,
            packages,
            output,
            table,
        }
    }

    fn print_table(&self, report: &CatalogReport) {
        if report.packages.is_empty() {
            println!("No packages found.");
            return;
        }

        let rows: Vec<CatalogRow> = report
            .packages
            .iter()
            .map(|entry| {
                let framework = entry
                    .version(&entry.default_dir)
                    .map(|v| if v.framework { "yes" } else { "no" })
                    .unwrap_or("-");
                CatalogRow {
                    package: entry.name.clone(),
                    current: entry.default_dir.clone(),
                    version: entry.default_version.clone(),
                    versions: entry.versions.len(),
                    framework: framework.to_string(),
                }
            })
            .collect();

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("{table}");
        println!(
            "\nTotal: {} packages, {} versions",
            report.packages.len(),
            report.version_count()
        );
    }
}

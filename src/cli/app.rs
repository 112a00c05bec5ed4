use crate::io::{UniversePaths, DEFAULT_CONFIG_FILE};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// universe-pkg: inspect and rewrite versioned packages in a package universe
#[derive(Parser, Debug)]
#[command(name = "universe-pkg")]
#[command(version)]
#[command(about = "List package info and update uri/docker/cli/command for specific packages")]
#[command(
    long_about = "Lists every version of the packages in a universe store, and applies a YAML update configuration that rewrites download URIs, docker images, CLI binary URLs and install commands, optionally cloning the version into a new slot first."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Universe checkout root; packages live under <universe>/repo/packages
    #[arg(long, global = true, default_value = ".")]
    pub universe: PathBuf,

    /// Package store directory (overrides --universe)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Set log level
    #[arg(long, global = true, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

impl Cli {
    /// Store location from --store or --universe
    pub fn paths(&self) -> UniversePaths {
        match &self.store {
            Some(store) => UniversePaths::for_store(store),
            None => UniversePaths::for_universe(&self.universe),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List package info
    List {
        /// Packages to list, e.g. cassandra,kafka,spark (all when omitted)
        #[arg(short, long, value_delimiter = ',')]
        package: Vec<String>,

        /// Write the catalog JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a summary table instead of JSON
        #[arg(long, conflicts_with = "output")]
        table: bool,
    },

    /// Update packages from a YAML configuration
    Update {
        /// Input YAML config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        file: PathBuf,

        /// Show what would change without cloning or writing
        #[arg(long)]
        dry_run: bool,

        /// Print the update report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List { .. } => "list",
            Commands::Update { .. } => "update",
        }
    }

    /// Check if this command modifies files in the store
    pub fn modifies_store(&self) -> bool {
        matches!(self, Commands::Update { dry_run: false, .. })
    }
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use universe_pkg::cli::{
    commands::{list::ListCommand, update::UpdateCommand, CommandHandler},
    Cli, Commands, LogLevel,
};

/// Configures logging from --log-level and --log-json.
///
/// RUST_LOG wins over --log-level when set. Logs always go to stderr so the
/// catalog JSON on stdout stays clean.
fn initialize_tracing(log_level: LogLevel, log_json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    if log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(cli.log_level, cli.log_json);

    let paths = cli.paths();
    debug!(
        command = cli.command.name(),
        store = %paths.store_dir.display(),
        modifies_store = cli.command.modifies_store(),
        "Starting"
    );

    let handler: Box<dyn CommandHandler> = match cli.command {
        Commands::List {
            package,
            output,
            table,
        } => Box::new(ListCommand::new(paths, package, output, table)),
        Commands::Update {
            file,
            dry_run,
            json,
        } => Box::new(UpdateCommand::new(paths, file, dry_run, json)),
    };

    handler
        .execute()
        .with_context(|| format!("{} failed", handler.name()))?;

    Ok(())
}

pub mod list;
pub mod update;

use crate::Result;

/// A subcommand bound to its parsed arguments and store location
pub trait CommandHandler {
    /// Run against the store, printing results to stdout
    fn execute(&self) -> Result<()>;

    /// Subcommand name, used in error context
    fn name(&self) -> &'static str;
}

//! Command dispatch logic extracted from the binary.

use super::args::Commands;
use super::handlers::{handle_config, handle_log, handle_run};
use crate::exit::TidyExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<TidyExit> {
    match command {
        Commands::Run(args) => handle_run(&args),
        Commands::Log {
            file,
            details,
            json,
            fail_on_findings,
        } => handle_log(&file, details, json, fail_on_findings),
        Commands::Config => handle_config(),
    }
}

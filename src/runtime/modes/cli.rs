//! CLI mode
//!
//! Delegates to the CLI command implementations.

use crate::cli::Commands;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run CLI mode
pub fn run_cli(command: Commands) -> Result<(), CliError> {
    run_cli_command(command)
}

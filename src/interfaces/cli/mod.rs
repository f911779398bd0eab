//! CLI interface module
//!
//! Offline conversion and configuration helpers.

pub mod commands;

use crate::cli::Commands;
use commands::{config_generate, convert_file};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    ConvertError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ConvertError(msg) => format!("Convert error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::ConvertError(msg) => {
                format!("{} {}", "Convert error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::FlattenerError> for CliError {
    fn from(err: crate::errors::FlattenerError) -> Self {
        match err {
            crate::errors::FlattenerError::XmlParse(_) => CliError::ParseError(err.to_string()),
            _ => CliError::ConvertError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is handled by the server mode and is rejected here.
pub fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Convert {
            input,
            output,
            force,
        } => convert_file(&input, output.as_deref(), force).map(|_| ()),
        Commands::GenerateConfig { output_path, force } => config_generate(output_path, force),
        Commands::Serve => Err(CliError::CommandError(
            "serve is not a CLI command".to_string(),
        )),
    }
}

//! Mode routing
//!
//! - Server mode (HTTP upload form)
//! - CLI mode (offline conversion, config generation)

#[cfg(feature = "server")]
pub mod server;

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "server")]
pub use server::{build_app, run_server};

#[cfg(feature = "cli")]
pub use cli::run_cli;

use crate::cli::Commands;

/// Mode detection result
#[derive(Debug, PartialEq)]
pub enum Mode {
    #[cfg(feature = "server")]
    Server,
    #[cfg(feature = "cli")]
    Cli,
    Unknown,
}

/// Detect which mode to run for the parsed subcommand
///
/// No subcommand or `serve` -> Server, anything else -> CLI.
pub fn detect_mode(command: Option<&Commands>) -> Mode {
    let wants_server = matches!(command, None | Some(Commands::Serve));

    #[cfg(feature = "server")]
    if wants_server {
        return Mode::Server;
    }

    #[cfg(feature = "cli")]
    if !wants_server {
        return Mode::Cli;
    }

    let _ = wants_server;
    Mode::Unknown
}

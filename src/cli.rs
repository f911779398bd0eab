//! Command-line interface definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// visit-flattener - analytics XML export to Excel converter
#[derive(Parser)]
#[command(name = "visit-flattener")]
#[command(version)]
#[command(about = "Flattens analytics visit exports into one-row-per-action spreadsheets", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the upload form HTTP server (default)
    Serve,

    /// Convert an XML export file to xlsx without starting the server
    Convert {
        /// Input XML file
        input: PathBuf,

        /// Output xlsx path (default: export_xml_cleaned.xlsx next to the input)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Overwrite the output file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Generate example configuration file
    GenerateConfig {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },
}

//! visit-flattener - analytics XML export to spreadsheet converter
//!
//! Parses an analytics export (visits with nested action records), emits one
//! row per (visit, action) pair in a fixed 13-column schema, and serializes
//! the rows as an xlsx workbook. Exposed through a single-page upload form
//! and an offline CLI.
//!
//! # Features
//! - **server**: HTTP upload form (default)
//! - **cli**: Offline `convert` and `generate-config` commands (default)
//!
//! # Architecture
//! - `flatten`: XML parsing and the visit × action flattening
//! - `export`: xlsx serialization
//! - `services`: Conversion service shared by HTTP and CLI
//! - `api`: HTTP services and middleware
//! - `interfaces`: CLI commands
//! - `config`: Configuration management
//! - `runtime`: Execution modes
//! - `system`: Logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod flatten;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod system;

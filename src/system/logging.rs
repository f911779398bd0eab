//! Logging system initialization
//!
//! Builds the tracing subscriber from the `[logging]` section of the
//! static configuration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;

const DEFAULT_LOG_FILENAME: &str = "visit-flattener.log";

/// Initialize logging system based on configuration
///
/// Must be called once at startup, after the configuration is loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   so that buffered log lines are flushed on exit
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let writer = build_writer(config)?;

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level filter '{}'", config.level))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(logs_to_console(config));

    let init_result = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    init_result.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

fn logs_to_console(config: &LoggingConfig) -> bool {
    config.file.as_ref().is_none_or(|f| f.is_empty())
}

fn build_writer(config: &LoggingConfig) -> Result<Box<dyn std::io::Write + Send + Sync>> {
    let log_file = match config.file.as_deref() {
        Some(file) if !file.is_empty() => file,
        // Output to console
        _ => return Ok(Box::new(std::io::stdout())),
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or(DEFAULT_LOG_FILENAME);

        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(filename.trim_end_matches(".log"))
            .filename_suffix("log")
            .max_log_files(config.max_backups as usize)
            .build(dir)
            .context("Failed to create rolling log appender")?;
        Ok(Box::new(appender))
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_console_detection() {
        let mut config = LoggingConfig::default();
        assert!(logs_to_console(&config));

        config.file = Some(String::new());
        assert!(logs_to_console(&config));

        config.file = Some("app.log".to_string());
        assert!(!logs_to_console(&config));
    }

    #[test]
    fn test_plain_file_writer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().into_owned()),
            enable_rotation: false,
            ..Default::default()
        };

        let mut writer = build_writer(&config).unwrap();
        writer.write_all(b"hello\n").unwrap();
        drop(writer);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}

//! Offline conversion command

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::info;

use crate::export::EXPORT_FILENAME;
use crate::interfaces::cli::CliError;
use crate::services::ConvertService;

/// `export_xml_cleaned.xlsx` in the input file's directory
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(EXPORT_FILENAME),
        _ => PathBuf::from(EXPORT_FILENAME),
    }
}

/// Convert one XML file; returns the path that was written
pub fn convert_file(
    input: &Path,
    output: Option<&Path>,
    force: bool,
) -> Result<PathBuf, CliError> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input));

    if !force && output.exists() {
        return Err(CliError::CommandError(format!(
            "Output file already exists: {} (use --force to overwrite)",
            output.display()
        )));
    }

    let data = std::fs::read(input).map_err(|e| {
        CliError::ConvertError(format!("Failed to read {}: {}", input.display(), e))
    })?;

    info!("Converting {} ({} bytes)", input.display(), data.len());
    let conversion = ConvertService::new().convert(&data)?;

    std::fs::write(&output, &conversion.workbook).map_err(|e| {
        CliError::ConvertError(format!("Failed to write {}: {}", output.display(), e))
    })?;

    println!(
        "{} {} {} {} {}",
        "Converted".green(),
        conversion.visits.to_string().bold(),
        "visits into".green(),
        conversion.row_count().to_string().bold(),
        "rows".green()
    );
    println!("  {} {}", "Saved to".green(), output.display().to_string().blue());

    Ok(output)
}

//! File naming and saving for exported images.

use super::types::{CaptureScope, ExportError};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Generate the download name for an export taken at `timestamp`.
///
/// `screenshot-{visible|full}-{ISO-8601 UTC}.png`, with every `:` and `.` of
/// the timestamp replaced by `-`.
pub fn export_filename(scope: CaptureScope, timestamp: DateTime<Utc>) -> String {
    let stamp = timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("screenshot-{}-{}.png", scope.as_str(), stamp)
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save PNG bytes as `directory/filename`.
///
/// # Returns
/// Path to the saved file
pub fn save_png(png: &[u8], directory: &Path, filename: &str) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(directory)?;
    let file_path = directory.join(filename);

    log::info!(
        "Saving export to: {} ({} bytes)",
        file_path.display(),
        png.len()
    );

    fs::write(&file_path, png)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

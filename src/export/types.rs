//! Data types for page export.

use std::path::PathBuf;
use thiserror::Error;

/// Which part of the page to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureScope {
    /// Only what is currently visible in the viewport.
    Visible,
    /// The whole scrollable document.
    Full,
}

impl CaptureScope {
    /// Name used in export filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            CaptureScope::Visible => "visible",
            CaptureScope::Full => "full",
        }
    }
}

/// Page bitmap produced by a [`PageCapture`](super::PageCapture).
#[derive(Debug, Clone)]
pub struct CapturedPage {
    /// PNG-encoded page pixels.
    pub png: Vec<u8>,
    /// Document position of the bitmap's top-left pixel (the scroll offset
    /// for viewport captures, zero for full-page ones).
    pub origin_x: f64,
    pub origin_y: f64,
}

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Suggested download name, see [`export_filename`](super::file::export_filename).
    pub filename: String,
    /// PNG with the annotations burnt in.
    pub png: Vec<u8>,
    /// Path where the image was saved (if saved).
    pub saved_path: Option<PathBuf>,
}

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Page capture failed: {0}")]
    Capture(String),

    #[error("Image processing error: {0}")]
    Image(#[from] cairo::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to save image: {0}")]
    Save(#[from] std::io::Error),

    #[error("Export task failed: {0}")]
    Task(String),
}

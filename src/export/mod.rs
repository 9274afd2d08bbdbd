//! PNG export of the annotated page.
//!
//! A [`PageCapture`] supplies a bitmap of the page (the visible viewport or
//! the whole document); the pipeline draws the annotation log onto it with
//! the export render pass and optionally saves it under a timestamped name.

pub mod compose;
pub mod dependencies;
pub mod file;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod tests;

pub use dependencies::{ExportDependencies, ExportSaver, FileCapture, PageCapture};
pub use pipeline::{ExportRequest, perform_export};
pub use types::{CaptureScope, CapturedPage, ExportError, ExportResult};

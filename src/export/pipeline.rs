use std::{path::PathBuf, sync::Arc};

use chrono::Utc;
use tokio::task;

use crate::draw::Operation;
use crate::export::{
    compose::compose,
    dependencies::{ExportDependencies, ExportSaver},
    file::export_filename,
    types::{CaptureScope, ExportError, ExportResult},
};

/// What to export and where to put it.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub scope: CaptureScope,
    /// Directory to save into; `None` only returns the PNG bytes
    pub save_directory: Option<PathBuf>,
}

pub async fn perform_export(
    request: ExportRequest,
    operations: Vec<Operation>,
    dependencies: Arc<ExportDependencies>,
) -> Result<ExportResult, ExportError> {
    log::info!("Starting export: {:?}", request.scope);

    let page = dependencies.capture.capture(request.scope).await?;
    log::info!("Obtained page bitmap ({} bytes)", page.png.len());

    let scope = request.scope;
    let png = task::spawn_blocking(move || compose(&page, &operations, scope))
        .await
        .map_err(|e| ExportError::Task(format!("Compose task failed: {}", e)))??;

    let filename = export_filename(scope, Utc::now());

    let saved_path = match request.save_directory {
        Some(directory) if !directory.as_os_str().is_empty() => Some(
            save_image(
                Arc::clone(&dependencies.saver),
                png.clone(),
                directory,
                filename.clone(),
            )
            .await?,
        ),
        _ => None,
    };

    Ok(ExportResult {
        filename,
        png,
        saved_path,
    })
}

async fn save_image(
    saver: Arc<dyn ExportSaver>,
    png: Vec<u8>,
    directory: PathBuf,
    filename: String,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || saver.save(&png, &directory, &filename))
        .await
        .map_err(|e| ExportError::Task(format!("Save task failed: {}", e)))?
}

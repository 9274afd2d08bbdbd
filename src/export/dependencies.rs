use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;

use crate::export::{
    file,
    types::{CaptureScope, CapturedPage, ExportError},
};

/// Abstraction over rendering the page to a bitmap for the different scopes.
#[async_trait]
pub trait PageCapture: Send + Sync {
    async fn capture(&self, scope: CaptureScope) -> Result<CapturedPage, ExportError>;
}

/// Abstraction over writing exported images.
pub trait ExportSaver: Send + Sync {
    fn save(&self, png: &[u8], directory: &Path, filename: &str) -> Result<PathBuf, ExportError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub capture: Arc<dyn PageCapture>,
    pub saver: Arc<dyn ExportSaver>,
}

impl ExportDependencies {
    /// Uses `capture` for page bitmaps and writes files to disk.
    pub fn new(capture: Arc<dyn PageCapture>) -> Self {
        Self {
            capture,
            saver: Arc::new(FileSaver),
        }
    }
}

/// Page capture backed by a PNG already on disk, or by a blank transparent
/// page when no background is given.
#[derive(Debug, Clone)]
pub struct FileCapture {
    pub background: Option<PathBuf>,
    /// Size of the blank page in pixels
    pub width: i32,
    pub height: i32,
    /// Document position of the image's top-left pixel
    pub origin_x: f64,
    pub origin_y: f64,
}

#[async_trait]
impl PageCapture for FileCapture {
    async fn capture(&self, scope: CaptureScope) -> Result<CapturedPage, ExportError> {
        let png = match &self.background {
            Some(path) => {
                log::debug!("Reading page bitmap from {}", path.display());
                std::fs::read(path).map_err(|e| {
                    ExportError::Capture(format!("cannot read {}: {}", path.display(), e))
                })?
            }
            None => blank_page(self.width, self.height)?,
        };
        let (origin_x, origin_y) = match scope {
            CaptureScope::Full => (0.0, 0.0),
            CaptureScope::Visible => (self.origin_x, self.origin_y),
        };
        Ok(CapturedPage {
            png,
            origin_x,
            origin_y,
        })
    }
}

fn blank_page(width: i32, height: i32) -> Result<Vec<u8>, ExportError> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))?;
    let mut png = Vec::new();
    surface.write_to_png(&mut png)?;
    Ok(png)
}

struct FileSaver;

impl ExportSaver for FileSaver {
    fn save(&self, png: &[u8], directory: &Path, filename: &str) -> Result<PathBuf, ExportError> {
        file::save_png(png, directory, filename)
    }
}

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use super::{
    dependencies::{ExportDependencies, ExportSaver, FileCapture, PageCapture},
    pipeline::{ExportRequest, perform_export},
    types::{CaptureScope, CapturedPage, ExportError},
};
use crate::draw::canvas::pixel_alpha;
use crate::draw::{Operation, Point, Segment, color::RED};

#[derive(Clone)]
struct MockCapture {
    origin: (f64, f64),
    fail: bool,
    scopes: Arc<Mutex<Vec<CaptureScope>>>,
}

#[async_trait]
impl PageCapture for MockCapture {
    async fn capture(&self, scope: CaptureScope) -> Result<CapturedPage, ExportError> {
        self.scopes.lock().unwrap().push(scope);
        if self.fail {
            return Err(ExportError::Capture("renderer crashed".to_string()));
        }
        Ok(CapturedPage {
            png: blank_png(100, 100),
            origin_x: self.origin.0,
            origin_y: self.origin.1,
        })
    }
}

#[derive(Clone, Default)]
struct MockSaver {
    saved: Arc<Mutex<Vec<(PathBuf, String)>>>,
}

impl ExportSaver for MockSaver {
    fn save(&self, _png: &[u8], directory: &Path, filename: &str) -> Result<PathBuf, ExportError> {
        self.saved
            .lock()
            .unwrap()
            .push((directory.to_path_buf(), filename.to_string()));
        Ok(directory.join(filename))
    }
}

fn blank_png(width: i32, height: i32) -> Vec<u8> {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
    let mut png = Vec::new();
    surface.write_to_png(&mut png).unwrap();
    png
}

fn decode(png: &[u8]) -> cairo::ImageSurface {
    cairo::ImageSurface::create_from_png(&mut std::io::Cursor::new(png)).unwrap()
}

/// Horizontal line across the page at document row `y`.
fn line_at(y: f64) -> Operation {
    Operation::Line(Segment {
        color: RED,
        line_width: 4.0,
        start: Point::new(0.0, y),
        end: Point::new(100.0, y),
    })
}

fn dependencies(capture: MockCapture, saver: MockSaver) -> Arc<ExportDependencies> {
    Arc::new(ExportDependencies {
        capture: Arc::new(capture),
        saver: Arc::new(saver),
    })
}

fn capture_at(origin: (f64, f64)) -> MockCapture {
    MockCapture {
        origin,
        fail: false,
        scopes: Arc::new(Mutex::new(Vec::new())),
    }
}

#[test]
fn test_blank_png_signature() {
    let png = blank_png(10, 10);
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[tokio::test]
async fn visible_export_offsets_by_capture_origin() {
    let capture = capture_at((0.0, 500.0));
    let scopes = Arc::clone(&capture.scopes);
    let request = ExportRequest {
        scope: CaptureScope::Visible,
        save_directory: None,
    };

    let result = perform_export(request, vec![line_at(520.0)], dependencies(capture, MockSaver::default()))
        .await
        .unwrap();

    assert_eq!(*scopes.lock().unwrap(), vec![CaptureScope::Visible]);
    assert!(result.filename.starts_with("screenshot-visible-"));
    assert!(result.filename.ends_with(".png"));
    assert!(result.saved_path.is_none());

    let image = decode(&result.png);
    assert_eq!(pixel_alpha(&image, 50, 20), 255);
}

#[tokio::test]
async fn full_export_draws_at_document_coordinates() {
    let capture = capture_at((0.0, 500.0));
    let request = ExportRequest {
        scope: CaptureScope::Full,
        save_directory: None,
    };

    let result = perform_export(request, vec![line_at(20.0)], dependencies(capture, MockSaver::default()))
        .await
        .unwrap();

    assert!(result.filename.starts_with("screenshot-full-"));
    let image = decode(&result.png);
    assert_eq!(pixel_alpha(&image, 50, 20), 255);
}

#[tokio::test]
async fn export_saves_when_directory_given() {
    let saver = MockSaver::default();
    let saved = Arc::clone(&saver.saved);
    let request = ExportRequest {
        scope: CaptureScope::Full,
        save_directory: Some(PathBuf::from("/tmp/pagemark-exports")),
    };

    let result = perform_export(request, vec![], dependencies(capture_at((0.0, 0.0)), saver))
        .await
        .unwrap();

    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, PathBuf::from("/tmp/pagemark-exports"));
    assert_eq!(saved[0].1, result.filename);
    assert_eq!(
        result.saved_path,
        Some(PathBuf::from("/tmp/pagemark-exports").join(&result.filename))
    );
}

#[tokio::test]
async fn capture_failure_propagates() {
    let mut capture = capture_at((0.0, 0.0));
    capture.fail = true;
    let saver = MockSaver::default();
    let saved = Arc::clone(&saver.saved);
    let request = ExportRequest {
        scope: CaptureScope::Visible,
        save_directory: Some(PathBuf::from("/tmp/unused")),
    };

    let err = perform_export(request, vec![line_at(1.0)], dependencies(capture, saver))
        .await
        .unwrap_err();

    assert!(matches!(err, ExportError::Capture(_)));
    assert_eq!(err.to_string(), "Page capture failed: renderer crashed");
    assert!(saved.lock().unwrap().is_empty());
}

#[tokio::test]
async fn file_capture_writes_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let capture = FileCapture {
        background: None,
        width: 64,
        height: 48,
        origin_x: 0.0,
        origin_y: 0.0,
    };
    let request = ExportRequest {
        scope: CaptureScope::Full,
        save_directory: Some(dir.path().to_path_buf()),
    };

    let result = perform_export(
        request,
        vec![line_at(10.0)],
        Arc::new(ExportDependencies::new(Arc::new(capture))),
    )
    .await
    .unwrap();

    let path = result.saved_path.unwrap();
    assert!(path.exists());
    let image = decode(&std::fs::read(path).unwrap());
    assert_eq!((image.width(), image.height()), (64, 48));
}

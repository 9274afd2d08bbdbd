use std::io::Cursor;

use crate::draw::{Operation, RenderPass, render};
use crate::export::types::{CaptureScope, CapturedPage, ExportError};

/// Burns `operations` into a captured page and re-encodes it as PNG.
///
/// Full-page captures start at the document origin, so operations are drawn
/// unshifted; viewport captures are offset by the recorded scroll position.
pub fn compose(
    page: &CapturedPage,
    operations: &[Operation],
    scope: CaptureScope,
) -> Result<Vec<u8>, ExportError> {
    let surface = cairo::ImageSurface::create_from_png(&mut Cursor::new(&page.png))?;
    let (offset_x, offset_y) = match scope {
        CaptureScope::Full => (0.0, 0.0),
        CaptureScope::Visible => (page.origin_x, page.origin_y),
    };
    log::debug!(
        "Compositing {} operations onto {}x{} capture at offset ({}, {})",
        operations.len(),
        surface.width(),
        surface.height(),
        offset_x,
        offset_y
    );

    {
        let ctx = cairo::Context::new(&surface)?;
        render::render_operations(&ctx, operations, offset_x, offset_y, RenderPass::Export);
    }

    let mut png = Vec::new();
    surface.write_to_png(&mut png)?;
    Ok(png)
}

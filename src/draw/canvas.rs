//! Viewport-sized raster surface backing the live annotation layer.

use super::operation::Operation;
use super::render::{self, RenderPass};

/// On-screen drawing surface.
///
/// Holds an ARGB32 image the size of the viewport. While a shape is being
/// dragged the pixels from gesture start are kept in a snapshot so each
/// pointer move can restore them before drawing the provisional outline;
/// the annotation log is never touched by a drag in progress.
pub struct Canvas {
    surface: cairo::ImageSurface,
    snapshot: Option<cairo::ImageSurface>,
}

impl Canvas {
    /// Creates a transparent canvas of the given size in pixels.
    pub fn new(width: i32, height: i32) -> Result<Self, cairo::Error> {
        Ok(Self {
            surface: create_surface(width, height)?,
            snapshot: None,
        })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Reallocates the surface for a new viewport size. Contents and any
    /// pending preview snapshot are dropped; callers redraw afterwards.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), cairo::Error> {
        if width == self.width() && height == self.height() {
            return Ok(());
        }
        self.surface = create_surface(width, height)?;
        self.snapshot = None;
        Ok(())
    }

    pub fn context(&self) -> Result<cairo::Context, cairo::Error> {
        cairo::Context::new(&self.surface)
    }

    /// Makes every pixel transparent.
    pub fn clear(&self) -> Result<(), cairo::Error> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()
    }

    /// Clears the canvas and paints `operations` shifted by the scroll offset.
    pub fn redraw(
        &self,
        operations: &[Operation],
        scroll_x: f64,
        scroll_y: f64,
    ) -> Result<(), cairo::Error> {
        self.clear()?;
        let ctx = self.context()?;
        render::render_operations(&ctx, operations, scroll_x, scroll_y, RenderPass::Live);
        Ok(())
    }

    /// Copies the current pixels aside at the start of a drag.
    pub fn begin_preview(&mut self) -> Result<(), cairo::Error> {
        let copy = create_surface(self.width(), self.height())?;
        let ctx = cairo::Context::new(&copy)?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        ctx.paint()?;
        drop(ctx);
        self.snapshot = Some(copy);
        Ok(())
    }

    pub fn has_preview(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Puts the snapshot pixels back, erasing the provisional outline.
    pub fn restore_preview(&self) -> Result<(), cairo::Error> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(snapshot, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Restores and drops the snapshot, ending the preview.
    pub fn end_preview(&mut self) -> Result<(), cairo::Error> {
        self.restore_preview()?;
        self.snapshot = None;
        Ok(())
    }

    /// Encodes the current canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, cairo::IoError> {
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }
}

fn create_surface(width: i32, height: i32) -> Result<cairo::ImageSurface, cairo::Error> {
    cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))
}

/// Reads the alpha channel of one pixel of an ARGB32 surface.
#[cfg(test)]
pub(crate) fn pixel_alpha(surface: &cairo::ImageSurface, x: i32, y: i32) -> u8 {
    let stride = surface.stride() as usize;
    let mut alpha = 0;
    surface
        .with_data(|data| {
            let offset = y as usize * stride + x as usize * 4;
            let pixel = u32::from_ne_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
            alpha = (pixel >> 24) as u8;
        })
        .expect("surface data readable");
    alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::operation::{Point, Segment};

    fn line(y: f64) -> Operation {
        Operation::Line(Segment {
            color: RED,
            line_width: 4.0,
            start: Point::new(0.0, y),
            end: Point::new(100.0, y),
        })
    }

    #[test]
    fn redraw_replaces_previous_contents() {
        let canvas = Canvas::new(100, 100).unwrap();
        canvas.redraw(&[line(20.0)], 0.0, 0.0).unwrap();
        assert_eq!(pixel_alpha(canvas.surface(), 50, 20), 255);

        canvas.redraw(&[line(60.0)], 0.0, 0.0).unwrap();
        assert_eq!(pixel_alpha(canvas.surface(), 50, 20), 0);
        assert_eq!(pixel_alpha(canvas.surface(), 50, 60), 255);
    }

    #[test]
    fn redraw_applies_scroll_offset() {
        let canvas = Canvas::new(100, 100).unwrap();
        canvas.redraw(&[line(520.0)], 0.0, 500.0).unwrap();
        assert_eq!(pixel_alpha(canvas.surface(), 50, 20), 255);
    }

    #[test]
    fn preview_restores_snapshot_pixels() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.redraw(&[line(20.0)], 0.0, 0.0).unwrap();
        canvas.begin_preview().unwrap();

        {
            let ctx = canvas.context().unwrap();
            render::render_operations(&ctx, &[line(70.0)], 0.0, 0.0, RenderPass::Live);
        }
        assert_eq!(pixel_alpha(canvas.surface(), 50, 70), 255);

        canvas.restore_preview().unwrap();
        assert_eq!(pixel_alpha(canvas.surface(), 50, 70), 0);
        assert_eq!(pixel_alpha(canvas.surface(), 50, 20), 255);

        canvas.end_preview().unwrap();
        assert!(!canvas.has_preview());
    }

    #[test]
    fn resize_reallocates_and_png_encodes() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.resize(40, 30).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (40, 30));

        let png = canvas.to_png().unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}

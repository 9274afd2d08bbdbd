//! Cairo-based rendering of annotation logs.
//!
//! The same pipeline serves two targets: the on-screen canvas, redrawn with
//! the current scroll position as offset, and captured page bitmaps, which
//! get the annotations burnt in for export.

use super::color::Color;
use super::operation::{CircleShape, FreehandStroke, Operation, Segment, StrokeKind, TextLabel};

/// Alpha forced onto highlighter strokes.
pub const HIGHLIGHT_ALPHA: f64 = 0.4;
/// Minimum highlighter stroke width in pixels.
pub const HIGHLIGHT_MIN_WIDTH: f64 = 8.0;

/// Which target the operations are painted for.
///
/// Only text placement differs: the live canvas anchors labels at their top
/// edge and adds a light halo, the export pass puts the alphabetic baseline
/// one font size below the stored position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    Live,
    Export,
}

/// Renders operations onto a surface, if both are present.
///
/// Every document coordinate is shifted by `(-offset_x, -offset_y)`.
/// A missing surface or operation list is a no-op.
pub fn render(
    surface: Option<&cairo::Context>,
    operations: Option<&[Operation]>,
    offset_x: f64,
    offset_y: f64,
    pass: RenderPass,
) {
    if let (Some(ctx), Some(operations)) = (surface, operations) {
        render_operations(ctx, operations, offset_x, offset_y, pass);
    }
}

/// Paints all operations in order (first = bottom layer).
///
/// The compositing operator is reset to source-over once the pass is done,
/// whatever the last operation used.
pub fn render_operations(
    ctx: &cairo::Context,
    operations: &[Operation],
    offset_x: f64,
    offset_y: f64,
    pass: RenderPass,
) {
    for operation in operations {
        ctx.new_path();
        ctx.set_operator(cairo::Operator::Over);
        match operation {
            Operation::Freehand(stroke) => render_freehand(ctx, stroke, offset_x, offset_y),
            Operation::Rectangle(seg) => render_rect(ctx, seg, offset_x, offset_y),
            Operation::Line(seg) => render_line(ctx, seg, offset_x, offset_y),
            Operation::Circle(circle) => render_circle(ctx, circle, offset_x, offset_y),
            Operation::Text(label) => match pass {
                RenderPass::Live => render_text_live(ctx, label, offset_x, offset_y),
                RenderPass::Export => render_text_export(ctx, label, offset_x, offset_y),
            },
            Operation::Unsupported { .. } => {}
        }
    }
    ctx.new_path();
    ctx.set_operator(cairo::Operator::Over);
}

fn set_source(ctx: &cairo::Context, color: Color) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
}

/// Render freehand stroke (polyline through points)
fn render_freehand(ctx: &cairo::Context, stroke: &FreehandStroke, offset_x: f64, offset_y: f64) {
    let Some((first, rest)) = stroke.points.split_first() else {
        return;
    };

    let (color, width, operator) = match stroke.kind {
        StrokeKind::Highlight => (
            stroke.color.with_alpha(HIGHLIGHT_ALPHA),
            stroke.line_width.max(HIGHLIGHT_MIN_WIDTH),
            stroke.composite.to_cairo(),
        ),
        StrokeKind::Eraser => (stroke.color, stroke.line_width, cairo::Operator::DestOut),
        StrokeKind::Pen => (stroke.color, stroke.line_width, stroke.composite.to_cairo()),
    };

    ctx.set_operator(operator);
    set_source(ctx, color);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x - offset_x, first.y - offset_y);
    for point in rest {
        ctx.line_to(point.x - offset_x, point.y - offset_y);
    }
    let _ = ctx.stroke();
}

/// Render a rectangle outline; the end corner may lie above/left of the start
fn render_rect(ctx: &cairo::Context, seg: &Segment, offset_x: f64, offset_y: f64) {
    set_source(ctx, seg.color);
    ctx.set_line_width(seg.line_width);
    ctx.set_line_join(cairo::LineJoin::Miter);

    ctx.rectangle(
        seg.start.x - offset_x,
        seg.start.y - offset_y,
        seg.end.x - seg.start.x,
        seg.end.y - seg.start.y,
    );
    let _ = ctx.stroke();
}

/// Render a straight line
fn render_line(ctx: &cairo::Context, seg: &Segment, offset_x: f64, offset_y: f64) {
    set_source(ctx, seg.color);
    ctx.set_line_width(seg.line_width);
    ctx.set_line_cap(cairo::LineCap::Butt);

    ctx.move_to(seg.start.x - offset_x, seg.start.y - offset_y);
    ctx.line_to(seg.end.x - offset_x, seg.end.y - offset_y);
    let _ = ctx.stroke();
}

fn render_circle(ctx: &cairo::Context, circle: &CircleShape, offset_x: f64, offset_y: f64) {
    if !(circle.radius.is_finite() && circle.radius > 0.0) {
        return;
    }

    set_source(ctx, circle.color);
    ctx.set_line_width(circle.line_width);
    ctx.arc(
        circle.center.x - offset_x,
        circle.center.y - offset_y,
        circle.radius,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    let _ = ctx.stroke();
}

fn text_layout(ctx: &cairo::Context, label: &TextLabel) -> pango::Layout {
    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&label.font.to_pango()));
    layout.set_text(&label.text);
    layout
}

/// Live canvas text: top-anchored, with a soft white halo so labels stay
/// readable on busy pages.
fn render_text_live(ctx: &cairo::Context, label: &TextLabel, offset_x: f64, offset_y: f64) {
    if label.text.is_empty() {
        return;
    }
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = text_layout(ctx, label);
    let x = label.position.x - offset_x;
    let y = label.position.y - offset_y;

    ctx.move_to(x, y);
    pangocairo::functions::layout_path(ctx, &layout);
    ctx.set_source_rgba(1.0, 1.0, 1.0, 0.7);
    ctx.set_line_width(3.0);
    ctx.set_line_join(cairo::LineJoin::Round);
    let _ = ctx.stroke();

    ctx.move_to(x, y);
    set_source(ctx, label.color);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

/// Export text: alphabetic baseline at `y + font size`, no halo.
fn render_text_export(ctx: &cairo::Context, label: &TextLabel, offset_x: f64, offset_y: f64) {
    if label.text.is_empty() {
        return;
    }
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = text_layout(ctx, label);
    let baseline = layout.baseline() as f64 / pango::SCALE as f64;
    let baseline_y = label.position.y - offset_y + label.font.size;

    ctx.move_to(label.position.x - offset_x, baseline_y - baseline);
    set_source(ctx, label.color);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
}

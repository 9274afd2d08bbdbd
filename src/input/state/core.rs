//! Drawing state machine and session state.

use crate::config::Config;
use crate::draw::{
    Annotations, Canvas, Color, CompositeMode, FontDescriptor, FreehandStroke, Operation, Point,
    RenderPass, Segment, StrokeKind, render,
};
use crate::input::tool::Tool;
use crate::share::Dialog;
use crate::toolbar::Toolbar;
use crate::util::Viewport;
use std::time::Instant;

/// Minimum eraser width in pixels.
pub(crate) const ERASER_MIN_WIDTH: f64 = 5.0;

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle, dragging out a mark, or entering text.
/// State transitions occur based on pointer and keyboard events.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Not actively drawing - waiting for user input
    Idle,
    /// Pointer held down with a drawing tool
    Drawing {
        /// Which tool is being used for this gesture
        tool: Tool,
        /// Document position where the pointer was pressed
        start: Point,
        /// Latest document position of the pointer
        current: Point,
        /// Accumulated points for freehand tools (empty for shapes)
        points: Vec<Point>,
    },
    /// A text input is open at `anchor`
    TextInput {
        /// Document position of the first line's top-left corner
        anchor: Point,
        /// Text typed so far; may contain line breaks
        buffer: String,
        /// Commit time scheduled by a blur, if the input lost focus
        blur_deadline: Option<Instant>,
    },
}

/// One annotation session: the log, the live canvas and the tool settings.
///
/// Created when the overlay is injected into a page and dropped on
/// navigation. Every mutation of the log repaints the canvas (when one is
/// attached) and sets [`Session::needs_redraw`] so the host presents it.
pub struct Session {
    pub(super) annotations: Annotations,
    pub(super) tool: Tool,
    /// Stroke color for new marks
    pub current_color: Color,
    /// Base line width in pixels; eraser and highlighter derive theirs from it
    pub current_line_width: f64,
    /// Font for new text labels
    pub font: FontDescriptor,
    /// Current drawing mode state machine
    pub state: DrawingState,
    pub(super) viewport: Viewport,
    /// Toolbar position and drag state
    pub toolbar: Toolbar,
    pub(crate) canvas: Option<Canvas>,
    /// Whether the canvas changed since the host last presented it
    pub needs_redraw: bool,
    pub(crate) pending_alert: Option<String>,
    pub(crate) pending_dialog: Option<Dialog>,
}

impl Session {
    /// Creates a session without a canvas; see [`Session::attach_canvas`].
    pub fn new(color: Color, line_width: f64, font: FontDescriptor, viewport: Viewport) -> Self {
        Self {
            annotations: Annotations::new(),
            tool: Tool::Navigate,
            current_color: color,
            current_line_width: line_width,
            font,
            state: DrawingState::Idle,
            viewport,
            toolbar: Toolbar::default(),
            canvas: None,
            needs_redraw: false,
            pending_alert: None,
            pending_dialog: None,
        }
    }

    /// Creates a session with the drawing defaults from `config`.
    pub fn from_config(config: &Config, viewport: Viewport) -> Self {
        let drawing = &config.drawing;
        Self::new(
            drawing.default_color.to_color(),
            drawing.default_line_width,
            FontDescriptor::new(drawing.font_family.clone(), drawing.font_size),
            viewport,
        )
    }

    /// Allocates the viewport-sized canvas and paints the current log.
    pub fn attach_canvas(&mut self) -> Result<(), cairo::Error> {
        let (width, height) = self.viewport.surface_size();
        self.canvas = Some(Canvas::new(width, height)?);
        self.redraw();
        Ok(())
    }

    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Switches tools. Leaving the text tool discards an open text input;
    /// a gesture in progress is cancelled.
    pub fn select_tool(&mut self, tool: Tool) {
        if tool != Tool::Text && matches!(self.state, DrawingState::TextInput { .. }) {
            log::debug!("Discarding open text input on switch to {}", tool.as_str());
            self.state = DrawingState::Idle;
        }
        if matches!(self.state, DrawingState::Drawing { .. }) {
            self.cancel_gesture();
        }
        self.tool = tool;
    }

    /// Escape returns to the navigate tool.
    pub fn on_key_escape(&mut self) {
        if let DrawingState::TextInput { .. } = self.state {
            self.on_text_cancel();
        }
        if self.tool != Tool::Navigate {
            self.select_tool(Tool::Navigate);
        }
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.annotations.undo();
        if changed {
            self.redraw();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.annotations.redo();
        if changed {
            self.redraw();
        }
        changed
    }

    pub fn clear(&mut self) -> bool {
        let changed = self.annotations.clear();
        if changed {
            self.redraw();
        }
        changed
    }

    /// Replaces the log with a loaded shared set.
    pub fn apply_shared(&mut self, operations: Vec<Operation>) {
        log::info!("Loaded {} shared annotations", operations.len());
        self.annotations.replace_all(operations);
        self.redraw();
    }

    pub fn on_scroll(&mut self, scroll_x: f64, scroll_y: f64) {
        self.viewport.scroll_x = scroll_x;
        self.viewport.scroll_y = scroll_y;
        self.redraw();
    }

    /// Resizes the canvas to the new viewport and keeps the toolbar on screen.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        if let Some(canvas) = self.canvas.as_mut() {
            let (w, h) = self.viewport.surface_size();
            if let Err(err) = canvas.resize(w, h) {
                log::error!("Failed to resize canvas to {}x{}: {}", w, h, err);
                self.canvas = None;
            }
        }
        self.toolbar.fit_to_viewport(&self.viewport);
        self.redraw();
    }

    /// Repaints the canvas from the log at the current scroll offset.
    ///
    /// A no-op without a canvas. A gesture in progress is re-snapshotted and
    /// its preview painted again on top.
    pub fn redraw(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let operations = self.annotations.operations();
        if let Err(err) = canvas.redraw(operations, self.viewport.scroll_x, self.viewport.scroll_y) {
            log::warn!("Canvas redraw failed: {}", err);
            return;
        }
        if matches!(self.state, DrawingState::Drawing { .. }) {
            if let Err(err) = canvas.begin_preview() {
                log::warn!("Failed to snapshot canvas: {}", err);
            }
            self.paint_gesture();
        }
        self.needs_redraw = true;
    }

    /// Alert text left by a failed export; taking it clears it.
    pub fn take_alert(&mut self) -> Option<String> {
        self.pending_alert.take()
    }

    /// Dialog content left by share or invite; taking it clears it.
    pub fn take_dialog(&mut self) -> Option<Dialog> {
        self.pending_dialog.take()
    }

    /// Width, color and blend rule a freehand tool strokes with.
    pub(crate) fn stroke_style(&self, kind: StrokeKind) -> (Color, f64, CompositeMode) {
        let width = self.current_line_width;
        match kind {
            StrokeKind::Pen => (self.current_color, width, CompositeMode::SourceOver),
            StrokeKind::Eraser => (
                self.current_color,
                ERASER_MIN_WIDTH.max(width * 1.5),
                CompositeMode::DestinationOut,
            ),
            StrokeKind::Highlight => (
                self.current_color.with_alpha(render::HIGHLIGHT_ALPHA),
                render::HIGHLIGHT_MIN_WIDTH.max(width * 2.0),
                CompositeMode::SourceOver,
            ),
        }
    }

    /// Builds the operation a gesture describes so far.
    pub(crate) fn gesture_operation(
        &self,
        tool: Tool,
        start: Point,
        end: Point,
        points: Vec<Point>,
    ) -> Option<Operation> {
        if let Some(kind) = tool.stroke_kind() {
            let (color, line_width, composite) = self.stroke_style(kind);
            return Some(Operation::Freehand(FreehandStroke {
                kind,
                points,
                color,
                line_width,
                composite,
            }));
        }

        let segment = Segment {
            color: self.current_color,
            line_width: self.current_line_width,
            start,
            end,
        };
        match tool {
            Tool::Rectangle => Some(Operation::Rectangle(segment)),
            Tool::Line => Some(Operation::Line(segment)),
            Tool::Circle => Some(Operation::circle_from_drag(
                self.current_color,
                self.current_line_width,
                start,
                end,
            )),
            _ => None,
        }
    }

    /// Restores the gesture snapshot and paints the provisional mark on it.
    pub(crate) fn paint_gesture(&mut self) {
        let DrawingState::Drawing {
            tool,
            start,
            current,
            points,
        } = &self.state
        else {
            return;
        };
        let Some(operation) = self.gesture_operation(*tool, *start, *current, points.clone()) else {
            return;
        };
        let Some(canvas) = self.canvas.as_ref() else {
            return;
        };

        if let Err(err) = canvas.restore_preview() {
            log::warn!("Failed to restore canvas snapshot: {}", err);
            return;
        }
        match canvas.context() {
            Ok(ctx) => render::render_operations(
                &ctx,
                std::slice::from_ref(&operation),
                self.viewport.scroll_x,
                self.viewport.scroll_y,
                RenderPass::Live,
            ),
            Err(err) => log::warn!("Failed to paint gesture preview: {}", err),
        }
        self.needs_redraw = true;
    }

    /// Paints one segment of a freehand stroke in progress on top of the
    /// canvas. The gesture snapshot stays untouched so a cancel can still
    /// wipe the stroke.
    pub(crate) fn paint_stroke_segment(&mut self, kind: StrokeKind, from: Point, to: Point) {
        let Some(canvas) = self.canvas.as_ref() else {
            return;
        };
        let (color, line_width, composite) = self.stroke_style(kind);
        let segment = Operation::Freehand(FreehandStroke {
            kind,
            points: vec![from, to],
            color,
            line_width,
            composite,
        });
        match canvas.context() {
            Ok(ctx) => render::render_operations(
                &ctx,
                std::slice::from_ref(&segment),
                self.viewport.scroll_x,
                self.viewport.scroll_y,
                RenderPass::Live,
            ),
            Err(err) => log::warn!("Failed to paint stroke segment: {}", err),
        }
        self.needs_redraw = true;
    }

    /// Drops a gesture in progress without touching the log.
    pub(crate) fn cancel_gesture(&mut self) {
        if !matches!(self.state, DrawingState::Drawing { .. }) {
            return;
        }
        self.state = DrawingState::Idle;
        if let Some(canvas) = self.canvas.as_mut()
            && let Err(err) = canvas.end_preview()
        {
            log::warn!("Failed to discard canvas snapshot: {}", err);
        }
        self.needs_redraw = true;
    }
}

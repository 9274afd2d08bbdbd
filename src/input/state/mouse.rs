use crate::input::{events::MouseButton, tool::Tool};

use super::{DrawingState, Session};

impl Session {
    /// Processes a pointer press in viewport coordinates.
    ///
    /// # Arguments
    /// * `button` - Which button was pressed
    /// * `x` - Pointer X relative to the viewport
    /// * `y` - Pointer Y relative to the viewport
    ///
    /// # Behavior
    /// - Presses on the visible toolbar, or during a toolbar drag, never start a mark
    /// - Navigate: ignored, the page handles the event
    /// - Text: opens a text input at the press point, committing one already open
    /// - Freehand and shape tools: start a gesture and snapshot the canvas
    pub fn on_pointer_down(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left
            || self.toolbar.is_dragging()
            || self.toolbar.contains(&self.viewport, x, y)
        {
            return;
        }

        match self.tool {
            Tool::Navigate => {}
            Tool::Text => {
                if matches!(self.state, DrawingState::TextInput { .. }) {
                    self.on_text_submit();
                }
                self.open_text_input(x, y);
            }
            tool => {
                let start = self.viewport.to_document(x, y);
                let points = if tool.stroke_kind().is_some() {
                    vec![start]
                } else {
                    Vec::new()
                };
                self.state = DrawingState::Drawing {
                    tool,
                    start,
                    current: start,
                    points,
                };
                if let Some(canvas) = self.canvas.as_mut()
                    && let Err(err) = canvas.begin_preview()
                {
                    log::warn!("Failed to snapshot canvas: {}", err);
                }
                log::debug!("Started {} gesture at {:?}", tool.as_str(), start);
            }
        }
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Moves the toolbar while it is being dragged
    /// - Extends a freehand stroke, painting only the new segment
    /// - Moves the free corner of a shape and repaints its preview over the
    ///   gesture snapshot
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.toolbar.is_dragging() {
            self.toolbar.drag_to(&self.viewport, x, y);
            self.needs_redraw = true;
            return;
        }

        let point = self.viewport.to_document(x, y);
        let DrawingState::Drawing {
            tool,
            current,
            points,
            ..
        } = &mut self.state
        else {
            return;
        };
        let previous = std::mem::replace(current, point);
        let kind = tool.stroke_kind();
        if kind.is_some() {
            points.push(point);
        }

        match kind {
            Some(kind) => self.paint_stroke_segment(kind, previous, point),
            None => self.paint_gesture(),
        }
    }

    /// Processes a pointer release.
    ///
    /// # Behavior
    /// Finishes a toolbar drag, or turns the gesture into an operation and
    /// commits it. Degenerate marks (a click without movement) are dropped.
    pub fn on_pointer_up(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }
        if self.toolbar.is_dragging() {
            self.toolbar.end_drag();
            return;
        }

        let DrawingState::Drawing {
            tool,
            start,
            mut points,
            ..
        } = std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };

        let end = self.viewport.to_document(x, y);
        if tool.stroke_kind().is_some() {
            points.push(end);
        }
        if let Some(canvas) = self.canvas.as_mut()
            && let Err(err) = canvas.end_preview()
        {
            log::warn!("Failed to discard canvas snapshot: {}", err);
        }

        match self.gesture_operation(tool, start, end, points) {
            Some(operation) => {
                if self.annotations.commit(operation) {
                    log::debug!("Committed {} mark", tool.as_str());
                }
            }
            None => log::warn!("No mark for tool {}", tool.as_str()),
        }
        self.redraw();
    }

    /// The pointer left the page; a gesture in progress is dropped.
    pub fn on_pointer_leave(&mut self) {
        self.cancel_gesture();
    }

    /// Starts dragging the toolbar from its handle.
    ///
    /// Returns `false` when the point is outside the visible toolbar.
    pub fn begin_toolbar_drag(&mut self, x: f64, y: f64) -> bool {
        if !self.toolbar.contains(&self.viewport, x, y) {
            return false;
        }
        self.toolbar.begin_drag(&self.viewport, x, y);
        true
    }
}

//! Toolbar placement and drag handling.
//!
//! The toolbar starts centered at the top of the viewport. Dragging it by its
//! handle switches it to a free position that is kept inside the viewport;
//! after a resize a toolbar left outside the viewport snaps back to a default
//! placement that suits the new width.

use crate::util::{Rect, Viewport};

/// Distance of the centered toolbar from the top edge.
pub const TOP_MARGIN: f64 = 20.0;
/// Inset of the docked toolbar from the left, right and bottom edges.
pub const DOCK_MARGIN: f64 = 10.0;
/// Viewports this narrow or narrower dock the toolbar at the bottom.
pub const NARROW_VIEWPORT_WIDTH: f64 = 480.0;

/// Where the toolbar sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Horizontally centered, [`TOP_MARGIN`] below the top edge
    CenteredTop,
    /// Stretched along the bottom edge with [`DOCK_MARGIN`] insets
    DockedBottom,
    /// Dropped by the user at a viewport position
    Floating { x: f64, y: f64 },
}

/// Toolbar position, size and drag state.
#[derive(Debug, Clone)]
pub struct Toolbar {
    placement: Placement,
    width: f64,
    height: f64,
    visible: bool,
    /// Pointer offset inside the toolbar while a drag is active
    grab: Option<(f64, f64)>,
}

impl Toolbar {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            placement: Placement::CenteredTop,
            width,
            height,
            visible: true,
            grab: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hides the toolbar, returning whether it was visible before.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    /// Restores visibility saved by [`Toolbar::hide`].
    pub fn restore(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Bounds of the toolbar in viewport coordinates.
    pub fn rect(&self, viewport: &Viewport) -> Rect {
        match self.placement {
            Placement::CenteredTop => Rect::new(
                (viewport.width - self.width) / 2.0,
                TOP_MARGIN,
                self.width,
                self.height,
            ),
            Placement::DockedBottom => Rect::new(
                DOCK_MARGIN,
                viewport.height - self.height - DOCK_MARGIN,
                (viewport.width - 2.0 * DOCK_MARGIN).max(0.0),
                self.height,
            ),
            Placement::Floating { x, y } => Rect::new(x, y, self.width, self.height),
        }
    }

    pub fn contains(&self, viewport: &Viewport, x: f64, y: f64) -> bool {
        self.visible && self.rect(viewport).contains(x, y)
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Starts a drag from the handle; the toolbar becomes free-floating at
    /// its current position.
    pub fn begin_drag(&mut self, viewport: &Viewport, pointer_x: f64, pointer_y: f64) {
        let rect = self.rect(viewport);
        self.placement = Placement::Floating {
            x: rect.x,
            y: rect.y,
        };
        self.width = rect.width;
        self.grab = Some((pointer_x - rect.x, pointer_y - rect.y));
        log::debug!("Toolbar drag started at ({:.0}, {:.0})", rect.x, rect.y);
    }

    /// Moves the toolbar with the pointer, clamped inside the viewport.
    ///
    /// The left/top edges are clamped first, then the right/bottom ones, so a
    /// toolbar larger than the viewport ends up flush with the right/bottom.
    pub fn drag_to(&mut self, viewport: &Viewport, pointer_x: f64, pointer_y: f64) {
        let Some((grab_x, grab_y)) = self.grab else {
            return;
        };
        let mut x = pointer_x - grab_x;
        let mut y = pointer_y - grab_y;

        if x < 0.0 {
            x = 0.0;
        }
        if y < 0.0 {
            y = 0.0;
        }
        if x + self.width > viewport.width {
            x = viewport.width - self.width;
        }
        if y + self.height > viewport.height {
            y = viewport.height - self.height;
        }
        self.placement = Placement::Floating { x, y };
    }

    pub fn end_drag(&mut self) {
        if self.grab.take().is_some() {
            log::debug!("Toolbar drag finished at {:?}", self.placement);
        }
    }

    /// Snaps a toolbar that no longer fits back to a default placement.
    pub fn fit_to_viewport(&mut self, viewport: &Viewport) {
        if !self.rect(viewport).exceeds(viewport) {
            return;
        }
        self.placement = if viewport.width <= NARROW_VIEWPORT_WIDTH {
            Placement::DockedBottom
        } else {
            Placement::CenteredTop
        };
        log::debug!("Toolbar out of bounds after resize, moved to {:?}", self.placement);
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new(440.0, 48.0)
    }
}

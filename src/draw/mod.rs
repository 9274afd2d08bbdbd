//! Annotation model and Cairo rendering.
//!
//! - [`Operation`]: one persisted mark (stroke, shape or text label)
//! - [`Annotations`]: the ordered log plus undo/redo history
//! - [`Canvas`]: the viewport-sized live surface
//! - rendering functions shared by the live canvas and the export pipeline

pub mod annotations;
pub mod canvas;
pub mod color;
pub mod font;
pub mod operation;
pub mod render;

pub use annotations::{Annotations, Batch, BatchKind};
pub use canvas::Canvas;
pub use color::Color;
pub use font::FontDescriptor;
pub use operation::{
    CircleShape, CompositeMode, FreehandStroke, Operation, Point, Segment, StrokeKind, TextLabel,
};
pub use render::{RenderPass, render, render_operations};

//! Input handling and tool state machine.
//!
//! This module translates host pointer and keyboard events into annotation
//! operations. [`Session`] owns the annotation log, the live canvas, the
//! toolbar and the current tool settings for one page.

pub mod events;
pub mod state;
pub mod tool;

pub use events::{Key, MouseButton};
pub use state::{BLUR_COMMIT_DELAY, DrawingState, Session};
pub use tool::Tool;

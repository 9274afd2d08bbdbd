//! Session controller: drawing state machine, text input and toolbar actions.

mod actions;
mod core;
mod mouse;
mod text;

pub use self::core::{DrawingState, Session};
pub use text::BLUR_COMMIT_DELAY;

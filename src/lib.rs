//! Free-hand annotation layer for web pages.
//!
//! A [`input::Session`] holds one page's annotation log and turns pointer
//! and keyboard input into marks drawn on a viewport-sized Cairo canvas.
//! Logs can be published to a share store and loaded back from a link
//! ([`share`]), or drawn onto a page bitmap and exported as PNG ([`export`]).

pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod share;
pub mod toolbar;
pub mod util;

pub use config::Config;

//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool defaults a new session starts with.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default stroke color - a CSS color string or an RGB array like `[98, 0, 217]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default line width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_line_width")]
    pub default_line_width: f64,

    /// Font size for text labels in CSS pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// CSS font family list used for text labels
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_line_width: default_line_width(),
            font_size: default_font_size(),
            font_family: default_font_family(),
        }
    }
}

/// Share and invite endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Base URL of the annotation store; a set lives at `{api_base}{id}`
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Page that opens shared links; the encoded page URL goes in its `view` parameter
    #[serde(default = "default_view_host")]
    pub view_host: String,

    /// Prefix the session id is appended to for invite links
    #[serde(default = "default_invite_base")]
    pub invite_base: String,

    /// Timeout for store requests in seconds (valid range: 1 - 300)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            view_host: default_view_host(),
            invite_base: default_invite_base(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Export settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported PNGs are written to (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
        }
    }
}

fn default_color() -> ColorSpec {
    ColorSpec::Css("#6200d9".to_string())
}

fn default_line_width() -> f64 {
    5.0
}

fn default_font_size() -> f64 {
    18.0
}

fn default_font_family() -> String {
    "Arial, sans-serif".to_string()
}

fn default_api_base() -> String {
    "https://annotateweb.maximsurfly.workers.dev/".to_string()
}

fn default_view_host() -> String {
    "https://annotateweb.com/".to_string()
}

fn default_invite_base() -> String {
    "https://annotateweb.com/?join=".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_save_directory() -> String {
    "~/Pictures/Pagemark".to_string()
}

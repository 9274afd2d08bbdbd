//! Configuration file support for pagemark.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/pagemark/config.toml`. Settings include drawing defaults, the
//! share/invite endpoints and where exported images are written.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{DrawingConfig, ExportConfig, ShareConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// ```toml
/// [drawing]
/// default_color = "#6200d9"
/// default_line_width = 5.0
///
/// [share]
/// request_timeout_secs = 10
///
/// [export]
/// save_directory = "~/Pictures/Pagemark"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub drawing: DrawingConfig,

    #[serde(default)]
    pub share: ShareConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are corrected with a logged warning rather than rejected.
    fn validate_and_clamp(&mut self) {
        // Line width: 1.0 - 50.0
        if !(1.0..=50.0).contains(&self.drawing.default_line_width) {
            log::warn!(
                "Invalid default_line_width {:.1}, clamping to 1.0-50.0 range",
                self.drawing.default_line_width
            );
            self.drawing.default_line_width = if self.drawing.default_line_width.is_nan() {
                5.0
            } else {
                self.drawing.default_line_width.clamp(1.0, 50.0)
            };
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.drawing.font_size) {
            log::warn!(
                "Invalid font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.font_size
            );
            self.drawing.font_size = if self.drawing.font_size.is_nan() {
                18.0
            } else {
                self.drawing.font_size.clamp(8.0, 72.0)
            };
        }

        if self.drawing.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Arial, sans-serif'");
            self.drawing.font_family = "Arial, sans-serif".to_string();
        }

        // Request timeout: 1 - 300 seconds
        if !(1..=300).contains(&self.share.request_timeout_secs) {
            log::warn!(
                "Invalid request_timeout_secs {}, clamping to 1-300 range",
                self.share.request_timeout_secs
            );
            self.share.request_timeout_secs = self.share.request_timeout_secs.clamp(1, 300);
        }

        for (name, value) in [
            ("api_base", &self.share.api_base),
            ("view_host", &self.share.view_host),
            ("invite_base", &self.share.invite_base),
        ] {
            if url::Url::parse(value).is_err() {
                log::warn!("share.{} '{}' is not an absolute URL", name, value);
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// Located at `~/.config/pagemark/config.toml`.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pagemark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or defaults if the file is absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}

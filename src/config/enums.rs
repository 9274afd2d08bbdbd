//! Configuration enum types.

use crate::draw::{Color, color::PURPLE};
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - either a CSS color string or RGB values.
///
/// # Examples
/// ```toml
/// # CSS color
/// default_color = "#6200d9"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// CSS color: `#rgb`, `#rrggbb`, `rgb(...)` or `rgba(...)`
    Css(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unreadable CSS strings default to the brand purple with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Css(css) => Color::parse_css(css).unwrap_or_else(|| {
                warn!("Unknown color '{}', using #6200d9", css);
                PURPLE
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Css("#ff0000".into()).to_color(), crate::draw::color::RED);
        assert_eq!(ColorSpec::Rgb([98, 0, 217]).to_color(), PURPLE);
        assert_eq!(ColorSpec::Css("not a color".into()).to_color(), PURPLE);
    }
}

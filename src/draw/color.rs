//! RGBA color type, CSS string conversion and palette constants.

use std::fmt;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
/// On the wire colors travel as CSS strings, see [`Color::parse_css`] and
/// [`Color::to_css`].
///
/// # Examples
///
/// ```
/// use pagemark::draw::Color;
/// let purple = Color::parse_css("#6200d9").unwrap();
/// assert_eq!(purple.to_css(), "#6200d9");
/// assert_eq!(purple.with_alpha(0.4).to_css(), "rgba(98, 0, 217, 0.4)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the same color with a replaced alpha channel.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parses `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    ///
    /// Channel values inside `rgb()`/`rgba()` are 0-255, alpha is 0.0-1.0.
    pub fn parse_css(input: &str) -> Option<Self> {
        let value = input.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = value.to_ascii_lowercase();
        let (args, expect_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = lower.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        match (parts.as_slice(), expect_alpha) {
            ([r, g, b], false) => Some(Self::from_rgb8(
                r.parse().ok()?,
                g.parse().ok()?,
                b.parse().ok()?,
            )),
            ([r, g, b, a], true) => {
                let alpha: f64 = a.parse().ok()?;
                let base = Self::from_rgb8(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?);
                Some(base.with_alpha(alpha))
            }
            _ => None,
        }
    }

    /// Formats the color as `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.rgb8();
        if self.a >= 1.0 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("rgba({r}, {g}, {b}, {})", self.a)
        }
    }

    fn rgb8(&self) -> (u8, u8, u8) {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::from_rgb8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color::from_rgb8(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Default pen color of the toolbar (#6200d9)
pub const PURPLE: Color = Color {
    r: 98.0 / 255.0,
    g: 0.0,
    b: 217.0 / 255.0,
    a: 1.0,
};

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined white color (R=1.0, G=1.0, B=1.0)
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color, also the fallback for unreadable colors on the wire
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

//! Font descriptor for text labels.

/// Font size used when a descriptor carries no readable size.
pub const FALLBACK_FONT_SIZE: f64 = 16.0;

/// Font configuration for text rendering.
///
/// Text labels store their font as a CSS font shorthand such as
/// `18px Arial, sans-serif` (optionally prefixed with a style and weight).
/// The descriptor keeps the parsed pieces so both render passes and the wire
/// encoding agree on the same font.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family list (e.g., "Arial, sans-serif")
    pub family: String,

    /// Font weight (e.g., "normal", "bold" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,

    /// Font size in CSS pixels
    pub size: f64,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self::new("Arial, sans-serif", 18.0)
    }
}

impl FontDescriptor {
    /// Creates a regular-weight, upright descriptor.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
            size,
        }
    }

    /// Parses a CSS font shorthand: `[style] [weight] <size>px <family>`.
    ///
    /// Returns `None` when no `px` size token is present.
    pub fn parse_css(input: &str) -> Option<Self> {
        let mut style = "normal".to_string();
        let mut weight = "normal".to_string();
        let mut rest = input.trim();

        loop {
            let (token, tail) = rest.split_once(char::is_whitespace)?;
            if let Some(size) = token.strip_suffix("px") {
                let size: f64 = size.parse().ok()?;
                let family = tail.trim();
                if family.is_empty() {
                    return None;
                }
                return Some(Self {
                    family: family.to_string(),
                    weight,
                    style,
                    size,
                });
            }

            let lower = token.to_ascii_lowercase();
            match lower.as_str() {
                "italic" | "oblique" => style = lower.clone(),
                "bold" | "bolder" | "lighter" => weight = lower.clone(),
                "normal" => {}
                numeric if numeric.parse::<u32>().is_ok_and(|w| (100..=900).contains(&w)) => {
                    weight = lower.clone()
                }
                _ => return None,
            }
            rest = tail.trim_start();
        }
    }

    /// Reads just the leading pixel size of a CSS font string.
    ///
    /// Mirrors how the export pass positions text: the first number in the
    /// font string, or [`FALLBACK_FONT_SIZE`] when there is none.
    pub fn leading_size(input: &str) -> f64 {
        let trimmed = input.trim_start();
        let end = trimmed
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<f64>() {
            Ok(size) if size > 0.0 => size,
            _ => FALLBACK_FONT_SIZE,
        }
    }

    /// Formats the descriptor back into a CSS font shorthand.
    pub fn to_css(&self) -> String {
        let mut parts = Vec::new();
        if self.style != "normal" {
            parts.push(self.style.clone());
        }
        if self.weight != "normal" {
            parts.push(self.weight.clone());
        }
        parts.push(format!("{}px", self.size));
        parts.push(self.family.clone());
        parts.join(" ")
    }

    /// Builds the Pango description used by the renderer.
    pub fn to_pango(&self) -> pango::FontDescription {
        let mut desc = pango::FontDescription::new();
        desc.set_family(&self.family);
        desc.set_absolute_size(self.size * pango::SCALE as f64);
        desc.set_weight(match self.weight.as_str() {
            "bold" | "bolder" => pango::Weight::Bold,
            "lighter" => pango::Weight::Light,
            numeric => match numeric.parse::<i32>() {
                Ok(w) if w <= 200 => pango::Weight::Ultralight,
                Ok(w) if w <= 300 => pango::Weight::Light,
                Ok(w) if w <= 500 => pango::Weight::Normal,
                Ok(w) if w <= 600 => pango::Weight::Semibold,
                Ok(w) if w <= 800 => pango::Weight::Bold,
                Ok(_) => pango::Weight::Heavy,
                Err(_) => pango::Weight::Normal,
            },
        });
        desc.set_style(match self.style.as_str() {
            "italic" => pango::Style::Italic,
            "oblique" => pango::Style::Oblique,
            _ => pango::Style::Normal,
        });
        desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_size_and_family() {
        let font = FontDescriptor::parse_css("18px Arial, sans-serif").unwrap();
        assert_eq!(font, FontDescriptor::default());
        assert_eq!(font.to_css(), "18px Arial, sans-serif");
    }

    #[test]
    fn parses_style_and_weight_prefixes() {
        let font = FontDescriptor::parse_css("italic bold 24px Georgia").unwrap();
        assert_eq!(font.style, "italic");
        assert_eq!(font.weight, "bold");
        assert_eq!(font.size, 24.0);
        assert_eq!(font.family, "Georgia");
        assert_eq!(font.to_css(), "italic bold 24px Georgia");

        let numeric = FontDescriptor::parse_css("700 12.5px monospace").unwrap();
        assert_eq!(numeric.weight, "700");
        assert_eq!(numeric.size, 12.5);
    }

    #[test]
    fn rejects_shorthand_without_size() {
        assert!(FontDescriptor::parse_css("Arial").is_none());
        assert!(FontDescriptor::parse_css("bold Arial, sans-serif").is_none());
        assert!(FontDescriptor::parse_css("18px").is_none());
    }

    #[test]
    fn leading_size_falls_back() {
        assert_eq!(FontDescriptor::leading_size("18px Arial"), 18.0);
        assert_eq!(FontDescriptor::leading_size("bold 18px Arial"), FALLBACK_FONT_SIZE);
        assert_eq!(FontDescriptor::leading_size(""), FALLBACK_FONT_SIZE);
    }
}

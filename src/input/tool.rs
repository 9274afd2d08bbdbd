//! Drawing tool selection.

use crate::draw::StrokeKind;

/// Drawing tool selection.
///
/// The active tool determines what a pointer press on the page does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Page interaction passes through; nothing is drawn
    #[default]
    Navigate,
    /// Freehand drawing - follows pointer path
    Pen,
    /// Straight line - between press and release points
    Line,
    /// Rectangle outline - from corner to corner
    Rectangle,
    /// Circle outline - centered on the press point
    Circle,
    /// Translucent wide freehand stroke
    Highlight,
    /// Freehand stroke that punches transparency
    Eraser,
    /// Click to place a text input
    Text,
}

impl Tool {
    pub const ALL: [Tool; 8] = [
        Tool::Navigate,
        Tool::Pen,
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Highlight,
        Tool::Eraser,
        Tool::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Navigate => "navigate",
            Tool::Pen => "pen",
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Highlight => "highlight",
            Tool::Eraser => "eraser",
            Tool::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    /// Stroke kind for the freehand tools.
    pub fn stroke_kind(self) -> Option<StrokeKind> {
        match self {
            Tool::Pen => Some(StrokeKind::Pen),
            Tool::Highlight => Some(StrokeKind::Highlight),
            Tool::Eraser => Some(StrokeKind::Eraser),
            _ => None,
        }
    }

    /// Whether the tool drags out a rectangle, line or circle.
    pub fn is_shape(self) -> bool {
        matches!(self, Tool::Line | Tool::Rectangle | Tool::Circle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_name(tool.as_str()), Some(tool));
        }
        assert_eq!(Tool::from_name("arrow"), None);
    }
}

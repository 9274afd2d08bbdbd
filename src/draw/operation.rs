//! Annotation operations and their JSON wire representation.
//!
//! An [`Operation`] is one persisted mark on the page. All coordinates are in
//! document space (page coordinates including the scroll offset), so a log can
//! be redrawn for any viewport without replaying the original gestures.
//!
//! On the wire every operation is a flat JSON object tagged by `tool`, the
//! format stored by the share endpoint. Decoding is lenient: missing fields
//! fall back to defaults and unknown tools decode to [`Operation::Unsupported`],
//! which the renderer skips.

use super::color::{self, Color};
use super::font::FontDescriptor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Line height multiplier applied to the font size for multi-line text.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A position in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Which freehand tool produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Pen,
    Eraser,
    Highlight,
}

impl StrokeKind {
    fn tool_name(self) -> &'static str {
        match self {
            StrokeKind::Pen => "pen",
            StrokeKind::Eraser => "eraser",
            StrokeKind::Highlight => "highlight",
        }
    }
}

/// Pixel blend rule used when painting a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing pixels
    #[default]
    SourceOver,
    /// Punch transparency into existing pixels (eraser)
    DestinationOut,
}

impl CompositeMode {
    fn as_css(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOut => "destination-out",
        }
    }

    fn from_css(value: &str) -> Self {
        match value {
            "destination-out" => CompositeMode::DestinationOut,
            "source-over" => CompositeMode::SourceOver,
            other => {
                log::debug!("Unknown composite operation '{other}', painting with source-over");
                CompositeMode::SourceOver
            }
        }
    }

    /// Cairo operator implementing this blend rule.
    pub fn to_cairo(self) -> cairo::Operator {
        match self {
            CompositeMode::SourceOver => cairo::Operator::Over,
            CompositeMode::DestinationOut => cairo::Operator::DestOut,
        }
    }
}

/// Polyline traced by the pen, eraser or highlighter.
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandStroke {
    pub kind: StrokeKind,
    /// Points in document coordinates, in drawing order
    pub points: Vec<Point>,
    pub color: Color,
    pub line_width: f64,
    pub composite: CompositeMode,
}

/// Two-point shape (rectangle corners or line endpoints).
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub color: Color,
    pub line_width: f64,
    pub start: Point,
    pub end: Point,
}

/// Circle outline about a center.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub color: Color,
    pub line_width: f64,
    pub center: Point,
    pub radius: f64,
}

/// One line of placed text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Top-left anchor in document coordinates
    pub position: Point,
    pub color: Color,
    pub font: FontDescriptor,
    pub line_height: f64,
}

impl TextLabel {
    /// Splits typed text into one label per non-blank line.
    ///
    /// The whole input is trimmed first; line `i` sits `line_height * i` below
    /// the anchor, so blank lines still advance the position.
    pub fn from_input(text: &str, anchor: Point, color: Color, font: &FontDescriptor) -> Vec<Self> {
        let line_height = font.size * LINE_HEIGHT_FACTOR;
        text.trim()
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| TextLabel {
                text: line.to_string(),
                position: Point::new(anchor.x, anchor.y + index as f64 * line_height),
                color,
                font: font.clone(),
                line_height,
            })
            .collect()
    }
}

/// A single persisted annotation mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OperationRecord", into = "OperationRecord")]
pub enum Operation {
    Freehand(FreehandStroke),
    Rectangle(Segment),
    Line(Segment),
    Circle(CircleShape),
    Text(TextLabel),
    /// Entry that could not be understood; kept in the log, never drawn
    Unsupported { tool: String },
}

impl Operation {
    /// Circle centered on the drag start whose radius reaches the drag end.
    pub fn circle_from_drag(color: Color, line_width: f64, start: Point, end: Point) -> Self {
        Operation::Circle(CircleShape {
            color,
            line_width,
            center: start,
            radius: start.distance_to(end),
        })
    }

    /// The `tool` tag used on the wire.
    pub fn tool_name(&self) -> &str {
        match self {
            Operation::Freehand(stroke) => stroke.kind.tool_name(),
            Operation::Rectangle(_) => "rectangle",
            Operation::Line(_) => "line",
            Operation::Circle(_) => "circle",
            Operation::Text(_) => "text",
            Operation::Unsupported { tool } => tool,
        }
    }

    /// Whether this operation may enter the annotation log.
    ///
    /// Strokes need at least two points; rectangles need a non-zero width and
    /// height; lines need distinct endpoints; circles need a positive radius.
    pub fn is_committable(&self) -> bool {
        match self {
            Operation::Freehand(stroke) => stroke.points.len() >= 2,
            Operation::Rectangle(seg) => seg.start.x != seg.end.x && seg.start.y != seg.end.y,
            Operation::Line(seg) => seg.start != seg.end,
            Operation::Circle(circle) => circle.radius > 0.0,
            Operation::Text(label) => !label.text.trim().is_empty(),
            Operation::Unsupported { .. } => false,
        }
    }
}

// ============================================================================
// Wire record
// ============================================================================

/// Number that serializes integral values without a fractional part,
/// matching what browsers emit for `JSON.stringify`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct WireNumber(f64);

impl Serialize for WireNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(WireNumber)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct WirePoint {
    #[serde(default)]
    x: WireNumber,
    #[serde(default)]
    y: WireNumber,
}

/// Flat JSON shape of an operation. Field order follows the objects the
/// browser writes so re-encoding a shared log reproduces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationRecord {
    #[serde(default)]
    tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    points: Option<Vec<WirePoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    x: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    y: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_width: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    composite_operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_x: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_y: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_x: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_y: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center_x: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    center_y: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    radius: Option<WireNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line_height: Option<WireNumber>,
}

fn num(value: Option<WireNumber>) -> f64 {
    value.map_or(0.0, |n| n.0)
}

fn wire(value: f64) -> Option<WireNumber> {
    Some(WireNumber(value))
}

impl OperationRecord {
    fn color(&self) -> Color {
        match self.color.as_deref() {
            Some(css) => Color::parse_css(css).unwrap_or_else(|| {
                log::warn!("Unreadable color '{css}' in '{}' operation, using black", self.tool);
                color::BLACK
            }),
            None => color::BLACK,
        }
    }

    fn segment(&self) -> Segment {
        Segment {
            color: self.color(),
            line_width: num(self.line_width),
            start: Point::new(num(self.start_x), num(self.start_y)),
            end: Point::new(num(self.end_x), num(self.end_y)),
        }
    }

    fn stroke(&self, kind: StrokeKind) -> FreehandStroke {
        FreehandStroke {
            kind,
            points: self
                .points
                .iter()
                .flatten()
                .map(|p| Point::new(p.x.0, p.y.0))
                .collect(),
            color: self.color(),
            line_width: num(self.line_width),
            composite: self
                .composite_operation
                .as_deref()
                .map_or(CompositeMode::SourceOver, CompositeMode::from_css),
        }
    }

    fn font(&self) -> FontDescriptor {
        match self.font.as_deref() {
            Some(css) => FontDescriptor::parse_css(css).unwrap_or_else(|| FontDescriptor {
                size: FontDescriptor::leading_size(css),
                ..FontDescriptor::default()
            }),
            None => FontDescriptor::default(),
        }
    }
}

impl From<OperationRecord> for Operation {
    fn from(record: OperationRecord) -> Self {
        match record.tool.as_str() {
            "pen" => Operation::Freehand(record.stroke(StrokeKind::Pen)),
            "eraser" => Operation::Freehand(record.stroke(StrokeKind::Eraser)),
            "highlight" => Operation::Freehand(record.stroke(StrokeKind::Highlight)),
            "rectangle" => Operation::Rectangle(record.segment()),
            "line" => Operation::Line(record.segment()),
            "circle" => Operation::Circle(CircleShape {
                color: record.color(),
                line_width: num(record.line_width),
                center: Point::new(num(record.center_x), num(record.center_y)),
                radius: num(record.radius),
            }),
            "text" => {
                let font = record.font();
                Operation::Text(TextLabel {
                    text: record.text.clone().unwrap_or_default(),
                    position: Point::new(num(record.x), num(record.y)),
                    color: record.color(),
                    line_height: record
                        .line_height
                        .map_or(font.size * LINE_HEIGHT_FACTOR, |n| n.0),
                    font,
                })
            }
            other => {
                log::debug!("Keeping unsupported '{other}' operation without drawing it");
                Operation::Unsupported {
                    tool: other.to_string(),
                }
            }
        }
    }
}

impl From<Operation> for OperationRecord {
    fn from(operation: Operation) -> Self {
        let tool = operation.tool_name().to_string();
        match operation {
            Operation::Freehand(stroke) => OperationRecord {
                tool,
                points: Some(
                    stroke
                        .points
                        .iter()
                        .map(|p| WirePoint {
                            x: WireNumber(p.x),
                            y: WireNumber(p.y),
                        })
                        .collect(),
                ),
                color: Some(stroke.color.to_css()),
                line_width: wire(stroke.line_width),
                composite_operation: Some(stroke.composite.as_css().to_string()),
                ..Default::default()
            },
            Operation::Rectangle(seg) | Operation::Line(seg) => OperationRecord {
                tool,
                color: Some(seg.color.to_css()),
                line_width: wire(seg.line_width),
                start_x: wire(seg.start.x),
                start_y: wire(seg.start.y),
                end_x: wire(seg.end.x),
                end_y: wire(seg.end.y),
                ..Default::default()
            },
            // The drag start doubles as the center, browsers keep both.
            Operation::Circle(circle) => OperationRecord {
                tool,
                color: Some(circle.color.to_css()),
                line_width: wire(circle.line_width),
                start_x: wire(circle.center.x),
                start_y: wire(circle.center.y),
                center_x: wire(circle.center.x),
                center_y: wire(circle.center.y),
                radius: wire(circle.radius),
                ..Default::default()
            },
            Operation::Text(label) => OperationRecord {
                tool,
                text: Some(label.text),
                x: wire(label.position.x),
                y: wire(label.position.y),
                color: Some(label.color.to_css()),
                font: Some(label.font.to_css()),
                line_height: wire(label.line_height),
                ..Default::default()
            },
            Operation::Unsupported { .. } => OperationRecord {
                tool,
                ..Default::default()
            },
        }
    }
}

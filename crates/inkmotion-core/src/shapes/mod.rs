//! Ink element definitions for a page layer.

mod image;
mod path;
mod stroke;
mod text;

pub use image::Image;
pub use path::{PaddedBox, PathInterval, PathParameter};
pub use stroke::{MIN_FRAGMENT_LENGTH, Stroke};
pub use text::Text;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pressure value for samples from tools or devices that report none.
pub const NO_PRESSURE: f64 = -1.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A sampled ink position with pressure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkPoint {
    pub x: f64,
    pub y: f64,
    /// Pressure in the tool's range, or [`NO_PRESSURE`].
    pub pressure: f64,
}

impl InkPoint {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }

    /// A point without pressure information.
    pub fn without_pressure(x: f64, y: f64) -> Self {
        Self::new(x, y, NO_PRESSURE)
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn has_pressure(&self) -> bool {
        self.pressure >= 0.0
    }

    /// Linear interpolation of position and pressure.
    pub fn lerp(&self, other: &InkPoint, t: f64) -> InkPoint {
        let pressure = if self.has_pressure() && other.has_pressure() {
            self.pressure + (other.pressure - self.pressure) * t
        } else {
            self.pressure
        };
        InkPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            pressure,
        )
    }
}

/// Tool that produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeTool {
    #[default]
    Pen,
    Eraser,
    Highlighter,
}

impl StrokeTool {
    /// Name used in exported motion metadata.
    pub fn name(self) -> &'static str {
        match self {
            StrokeTool::Pen => "pen",
            StrokeTool::Eraser => "eraser",
            StrokeTool::Highlighter => "highlighter",
        }
    }
}

/// Shape drawn at the open ends of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CapStyle {
    #[default]
    Round,
    Butt,
    Square,
}

impl CapStyle {
    /// Padding added around the eraser, in units of the stroke width,
    /// so that cut ends leave no visible stubs of the cap.
    pub fn padding_coefficient(self) -> f64 {
        match self {
            CapStyle::Round => 0.4,
            CapStyle::Butt => 0.01,
            CapStyle::Square => 0.5,
        }
    }
}

/// Dash pattern of a stroke (empty = solid).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineStyle {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    dashes: Vec<f64>,
}

impl LineStyle {
    pub fn solid() -> Self {
        Self::default()
    }

    pub fn dashed(dashes: Vec<f64>) -> Self {
        Self { dashes }
    }

    pub fn has_dashes(&self) -> bool {
        !self.dashes.is_empty()
    }

    pub fn dashes(&self) -> &[f64] {
        &self.dashes
    }
}

/// Unique identifier for layer elements.
pub type ElementId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Check whether two rectangles overlap or touch.
pub(crate) fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Every kind of element a layer can hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Stroke(Stroke),
    Image(Image),
    Text(Text),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Stroke(s) => s.id(),
            Element::Image(i) => i.id(),
            Element::Text(t) => t.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Element::Stroke(s) => s.bounds(),
            Element::Image(i) => i.bounds(),
            Element::Text(t) => t.bounds(),
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Element::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Element::Stroke(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_stroke(&self) -> bool {
        matches!(self, Element::Stroke(_))
    }
}

impl From<Stroke> for Element {
    fn from(stroke: Stroke) -> Self {
        Element::Stroke(stroke)
    }
}

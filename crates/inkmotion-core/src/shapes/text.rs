//! Text element.

use super::{ElementId, SerializableColor};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text element anchored at its top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ElementId,
    pub position: Point,
    pub content: String,
    pub font_size: f64,
    pub color: SerializableColor,
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;

    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            color: SerializableColor::black(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Approximate bounds; glyph metrics are the renderer's business.
    pub fn bounds(&self) -> Rect {
        let lines = self.content.lines().count().max(1);
        let longest = self
            .content
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let width = longest as f64 * self.font_size * 0.6;
        let height = lines as f64 * self.font_size * 1.2;
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }
}

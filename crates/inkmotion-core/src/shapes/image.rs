//! Raster image placed on a layer.

use super::ElementId;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image element. Never touched by the eraser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: ElementId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Encoded image bytes as base64 (keeps the document plain JSON).
    pub data_base64: String,
}

impl Image {
    pub fn new(position: Point, width: f64, height: f64, data: &[u8]) -> Self {
        use base64::{Engine, engine::general_purpose::STANDARD};

        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            data_base64: STANDARD.encode(data),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the raw image data (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        use base64::{Engine, engine::general_purpose::STANDARD};
        STANDARD.decode(&self.data_base64).ok()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_data_roundtrip() {
        let image = Image::new(Point::new(10.0, 20.0), 30.0, 40.0, &[1, 2, 3]);
        assert_eq!(image.data(), Some(vec![1, 2, 3]));
        assert_eq!(image.bounds(), Rect::new(10.0, 20.0, 40.0, 60.0));
    }
}

//! Text shape.

use super::ShapeGeometry;
use crate::style::ShapeStyle;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A single-line text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text shape.
    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }

    /// Approximate layout size; real metrics come from the renderer.
    pub fn approx_size(&self) -> (f64, f64) {
        let chars = self.content.chars().count().max(1) as f64;
        (chars * self.font_size * 0.6, self.font_size * 1.2)
    }
}

impl ShapeGeometry for Text {
    fn bounds(&self) -> Rect {
        let (w, h) = self.approx_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + w,
            self.position.y + h,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64, _style: &ShapeStyle) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_bounds_start_at_position() {
        let text = Text::new(Point::new(10.0, 20.0), "Text");
        let bounds = text.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!(bounds.width() > 0.0);
    }
}

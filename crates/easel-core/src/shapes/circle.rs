//! Circle shape.

use super::ShapeGeometry;
use crate::style::ShapeStyle;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circle for a drag from `anchor` to `pointer`.
    ///
    /// The radius is half the anchor–pointer distance and the circle's
    /// bounding box starts at the anchor and grows toward the pointer, so
    /// the far edge follows the pointer rather than the center.
    pub fn from_drag(anchor: Point, pointer: Point) -> Self {
        let radius = anchor.distance(pointer) / 2.0;
        let sign = |d: f64| if d < 0.0 { -1.0 } else { 1.0 };
        let center = Point::new(
            anchor.x + sign(pointer.x - anchor.x) * radius,
            anchor.y + sign(pointer.y - anchor.y) * radius,
        );
        Self::new(center, radius)
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, self.radius)
    }
}

impl ShapeGeometry for Circle {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool {
        let dist = self.center.distance(point);
        if style.fill_color.is_some() {
            dist <= self.radius + tolerance
        } else {
            (dist - self.radius).abs() <= tolerance + style.stroke_width / 2.0
        }
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}

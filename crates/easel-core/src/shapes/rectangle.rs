//! Axis-aligned rectangles.

use super::ShapeGeometry;
use crate::style::ShapeStyle;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner.
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// The rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let rect = Rect::from_points(a, b);
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, Size::new(self.width, self.height))
    }
}

impl ShapeGeometry for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool {
        let rect = self.as_rect();
        if style.fill_color.is_some() {
            return rect.inflate(tolerance, tolerance).contains(point);
        }
        // Unfilled rectangles are only picked along their outline
        let band = tolerance + style.stroke_width / 2.0;
        rect.inflate(band, band).contains(point) && !rect.inflate(-band, -band).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}

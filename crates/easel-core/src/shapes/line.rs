//! Line shape.

use super::{ShapeGeometry, point_to_segment_dist};
use crate::style::ShapeStyle;
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An open line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl ShapeGeometry for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance + style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        KurboLine::new(self.start, self.end).to_path(0.1)
    }
}

//! Freehand path shape.

use super::{ShapeGeometry, point_to_polyline_dist};
use crate::style::ShapeStyle;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// How a freehand stroke is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeMode {
    /// Paint with the stroke color.
    #[default]
    Draw,
    /// Paint with the canvas background, hiding what is underneath.
    Erase,
}

/// A freehand path (series of points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Points in the freehand path.
    pub points: Vec<Point>,
    #[serde(default)]
    pub mode: StrokeMode,
}

impl Path {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, mode: StrokeMode) -> Self {
        Self { points, mode }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeGeometry for Path {
    fn bounds(&self) -> Rect {
        let Some((&first, rest)) = self.points.split_first() else {
            return Rect::ZERO;
        };
        rest.iter()
            .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
    }

    fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool {
        // Erased regions are not selectable
        self.mode == StrokeMode::Draw
            && point_to_polyline_dist(point, &self.points) <= tolerance + style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if let Some((&first, rest)) = self.points.split_first() {
            path.move_to(first);
            for &p in rest {
                path.line_to(p);
            }
        }
        path
    }
}

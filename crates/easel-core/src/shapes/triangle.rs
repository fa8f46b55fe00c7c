//! Triangle shape.

use super::{ShapeGeometry, point_to_polyline_dist};
use crate::style::ShapeStyle;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A triangle given by three vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    pub fn new(vertices: [Point; 3]) -> Self {
        Self { vertices }
    }

    /// Isosceles triangle inscribed in the box spanned by two corners:
    /// apex at the middle of the top edge, base along the bottom edge.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new([
            Point::new((rect.x0 + rect.x1) / 2.0, rect.y0),
            Point::new(rect.x0, rect.y1),
            Point::new(rect.x1, rect.y1),
        ])
    }

    fn contains(&self, point: Point) -> bool {
        let [a, b, c] = self.vertices;
        let cross = |p: Point, q: Point, r: Point| (q - p).cross(r - p);
        let d1 = cross(a, b, point);
        let d2 = cross(b, c, point);
        let d3 = cross(c, a, point);
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

impl ShapeGeometry for Triangle {
    fn bounds(&self) -> Rect {
        let [a, b, c] = self.vertices;
        Rect::from_points(a, b).union_pt(c)
    }

    fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool {
        let [a, b, c] = self.vertices;
        let edge_dist = point_to_polyline_dist(point, &[a, b, c, a]);
        if style.fill_color.is_some() && self.contains(point) {
            return true;
        }
        edge_dist <= tolerance + style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let [a, b, c] = self.vertices;
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();
        path
    }
}

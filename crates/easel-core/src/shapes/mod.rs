//! Shape geometry handed to the scene engine.
//!
//! The interaction core only computes geometry; painting, hit-testing and
//! serialization belong to whichever engine receives it.

mod circle;
mod line;
mod path;
mod rectangle;
mod text;
mod triangle;

pub use circle::Circle;
pub use line::Line;
pub use path::{Path, StrokeMode};
pub use rectangle::Rectangle;
pub use text::Text;
pub use triangle::Triangle;

use crate::style::ShapeStyle;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Common behaviour of every geometry variant.
pub trait ShapeGeometry {
    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this geometry when painted with `style`.
    fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool;

    /// Get the path representation for rendering and vector export.
    fn to_path(&self) -> BezPath;
}

/// The kinds of shape the engine can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
    Triangle,
    Path,
    Text,
}

/// Geometry of one shape, independent of its paint and identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
    Path(Path),
    Text(Text),
}

impl Geometry {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Line(_) => ShapeKind::Line,
            Geometry::Rectangle(_) => ShapeKind::Rectangle,
            Geometry::Circle(_) => ShapeKind::Circle,
            Geometry::Triangle(_) => ShapeKind::Triangle,
            Geometry::Path(_) => ShapeKind::Path,
            Geometry::Text(_) => ShapeKind::Text,
        }
    }

    fn as_dyn(&self) -> &dyn ShapeGeometry {
        match self {
            Geometry::Line(g) => g,
            Geometry::Rectangle(g) => g,
            Geometry::Circle(g) => g,
            Geometry::Triangle(g) => g,
            Geometry::Path(g) => g,
            Geometry::Text(g) => g,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_dyn().bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64, style: &ShapeStyle) -> bool {
        self.as_dyn().hit_test(point, tolerance, style)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_dyn().to_path()
    }
}

/// A shape as stored by an engine: identity, geometry and paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub geometry: Geometry,
    pub style: ShapeStyle,
}

impl Shape {
    /// Create a shape with a fresh identifier.
    pub fn new(geometry: Geometry, style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            style,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.geometry.hit_test(point, tolerance, &self.style)
    }
}

//! Viewport mapping between screen pixels and canvas coordinates.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// Pan offset and zoom factor of the canvas view.
///
/// A canvas point `c` appears on screen at `c * zoom + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen position of the canvas origin.
    pub offset: Vec2,
    /// Screen pixels per canvas unit.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas to screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Map a screen position onto the canvas.
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        let p = (screen.to_vec2() - self.offset) / self.zoom;
        p.to_point()
    }

    /// Move the view by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply the zoom by `factor` around a screen position, which keeps
    /// showing the same canvas point.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            log::warn!("Ignoring zoom factor {factor}");
            return;
        }
        let pinned = self.screen_to_canvas(screen);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.offset = screen.to_vec2() - pinned.to_vec2() * self.zoom;
    }
}

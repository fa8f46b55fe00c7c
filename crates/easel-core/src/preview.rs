//! Single-slot preview of the shape being dragged out.

use crate::error::{EngineError, EngineResult};
use crate::scene::{HandleKind, SceneEngine, SceneHandle};
use crate::shapes::{Circle, Geometry, Line, Rectangle, Triangle};
use crate::style::ShapeStyle;
use crate::tools::DragShape;
use kurbo::Point;

/// Geometry of a drag-drawn shape from the press position to the pointer.
pub fn drag_geometry(shape: DragShape, anchor: Point, pointer: Point) -> Geometry {
    match shape {
        DragShape::Line => Geometry::Line(Line::new(anchor, pointer)),
        DragShape::Rectangle => Geometry::Rectangle(Rectangle::from_corners(anchor, pointer)),
        DragShape::Circle => Geometry::Circle(Circle::from_drag(anchor, pointer)),
        DragShape::Triangle => Geometry::Triangle(Triangle::from_corners(anchor, pointer)),
    }
}

/// Owns the one preview object that may exist at any time.
///
/// Every update removes the old preview before creating its replacement, so
/// two previews are never visible together and committed objects are never
/// edited in place.
#[derive(Debug, Default)]
pub struct PreviewController {
    slot: Option<SceneHandle>,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live preview, if any.
    pub fn handle(&self) -> Option<SceneHandle> {
        self.slot
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_some()
    }

    /// Replace the preview with one showing `geometry`.
    pub fn replace<E: SceneEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        geometry: Geometry,
        style: ShapeStyle,
    ) -> EngineResult<SceneHandle> {
        if let Some(old) = self.slot.take() {
            match engine.remove_shape(old) {
                Ok(()) => {}
                Err(EngineError::UnknownShape(id)) => log::warn!("Preview {id} was already gone"),
                Err(err) => return Err(err),
            }
        }
        let handle = engine.create_shape(geometry, style, HandleKind::Preview);
        self.slot = Some(handle);
        Ok(handle)
    }

    /// Promote the preview to a committed object.
    ///
    /// Returns `None` when there was nothing to commit.
    pub fn commit<E: SceneEngine + ?Sized>(
        &mut self,
        engine: &mut E,
    ) -> EngineResult<Option<SceneHandle>> {
        match self.slot.take() {
            Some(handle) => engine.promote(handle).map(Some),
            None => Ok(None),
        }
    }

    /// Remove the preview from the scene. The slot is empty afterwards even
    /// if the engine had already dropped the object.
    pub fn discard<E: SceneEngine + ?Sized>(&mut self, engine: &mut E) {
        if let Some(handle) = self.slot.take() {
            if let Err(err) = engine.remove_shape(handle) {
                log::warn!("Preview {} was already gone: {err}", handle.id);
            }
        }
    }
}

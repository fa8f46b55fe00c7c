//! The boundary between the interaction core and the scene engine.
//!
//! The engine owns geometry and paint; the core only ever holds
//! [`SceneHandle`]s, tagged so that previews can never leak into a
//! [`Snapshot`].

mod memory;

pub use memory::MemoryScene;

use crate::error::EngineResult;
use crate::input::{PointerPhase, RawPointer};
use crate::shapes::{Geometry, ShapeId, StrokeMode};
use crate::style::ShapeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Whether a scene object is part of the document or a transient preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Committed,
    Preview,
}

/// Reference to an object living inside the scene engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneHandle {
    pub id: ShapeId,
    pub kind: HandleKind,
}

impl SceneHandle {
    pub fn new(id: ShapeId, kind: HandleKind) -> Self {
        Self { id, kind }
    }

    pub fn is_preview(&self) -> bool {
        self.kind == HandleKind::Preview
    }

    pub fn is_committed(&self) -> bool {
        self.kind == HandleKind::Committed
    }
}

/// Serialized copy of the committed scene. Immutable and cheap to clone.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot(Arc<str>);

impl Snapshot {
    pub fn new(data: impl Into<Arc<str>>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snapshot({} bytes)", self.0.len())
    }
}

/// Tools whose pointer handling is the engine's own behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NativeTool {
    Select,
    Pan,
}

/// Operations the interaction core needs from a 2-D scene engine.
pub trait SceneEngine {
    /// Create a shape and return its handle.
    fn create_shape(&mut self, geometry: Geometry, style: ShapeStyle, kind: HandleKind)
    -> SceneHandle;

    /// Remove a shape, committed or preview.
    fn remove_shape(&mut self, handle: SceneHandle) -> EngineResult<()>;

    /// Turn a preview into a committed object, keeping its identity.
    fn promote(&mut self, handle: SceneHandle) -> EngineResult<SceneHandle>;

    /// All objects in render order (back to front).
    fn objects(&self) -> Vec<SceneHandle>;

    /// Map a raw pointer event onto canvas coordinates.
    fn get_pointer(&self, raw: &RawPointer) -> Point;

    /// Serialize every committed object.
    fn serialize_scene(&self) -> EngineResult<Snapshot>;

    /// Replace the committed scene with the contents of `snapshot`.
    ///
    /// On error the scene must be left as it was.
    fn deserialize_scene(&mut self, snapshot: &Snapshot) -> EngineResult<()>;

    /// Remove every object in one operation.
    fn clear_scene(&mut self);

    fn set_active_object(&mut self, handle: Option<SceneHandle>);

    fn active_object(&self) -> Option<SceneHandle>;

    /// Start capturing a freehand stroke.
    fn begin_stroke(&mut self, point: Point, style: ShapeStyle, mode: StrokeMode);

    fn extend_stroke(&mut self, point: Point);

    /// Finish the stroke. `Some` is the engine's "path created" notification
    /// carrying the committed path.
    fn finish_stroke(&mut self) -> Option<SceneHandle>;

    /// Drop the stroke being captured without creating anything.
    fn abort_stroke(&mut self);

    /// Pointer handling for tools the engine implements natively.
    fn native_pointer(&mut self, tool: NativeTool, phase: PointerPhase, raw: &RawPointer);

    fn export_raster(&self) -> EngineResult<Vec<u8>>;

    fn export_vector(&self) -> EngineResult<String>;
}

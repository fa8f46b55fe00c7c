//! In-memory scene engine.

use super::{HandleKind, NativeTool, SceneEngine, SceneHandle, Snapshot};
use crate::camera::Camera;
use crate::error::{EngineError, EngineResult};
use crate::input::{PointerPhase, RawPointer};
use crate::shapes::{Geometry, Path, Shape, ShapeId, StrokeMode};
use crate::style::{SerializableColor, ShapeStyle};
use kurbo::{Point, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Serialized form of the committed scene.
#[derive(Debug, Serialize, Deserialize)]
struct SceneDocument {
    /// Shapes back to front.
    shapes: Vec<Shape>,
}

/// A freehand stroke being captured.
#[derive(Debug, Clone)]
struct StrokeCapture {
    points: Vec<Point>,
    style: ShapeStyle,
    mode: StrokeMode,
}

/// Scene engine keeping every shape in memory.
///
/// Committed shapes live in a map plus a z-order list; previews are kept in
/// their own list and drawn on top, so they never reach a snapshot.
#[derive(Debug, Clone)]
pub struct MemoryScene {
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of committed shapes (back to front).
    z_order: Vec<ShapeId>,
    previews: Vec<Shape>,
    active: Option<ShapeId>,
    stroke: Option<StrokeCapture>,
    /// Last screen position while panning.
    pan_anchor: Option<Point>,
    camera: Camera,
    /// Canvas size used for vector export.
    pub size: Size,
    /// Background color; erase strokes are painted with it.
    pub background: SerializableColor,
    /// Hit-test tolerance for the select tool, in canvas units.
    pub hit_tolerance: f64,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            previews: Vec::new(),
            active: None,
            stroke: None,
            pan_anchor: None,
            camera: Camera::new(),
            size: Size::new(800.0, 600.0),
            background: SerializableColor::white(),
            hit_tolerance: 4.0,
        }
    }

    /// Create an empty scene with a given background color.
    pub fn with_background(background: SerializableColor) -> Self {
        Self {
            background,
            ..Self::new()
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Look up a committed or preview shape.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes
            .get(&id)
            .or_else(|| self.previews.iter().find(|s| s.id == id))
    }

    /// Committed shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Number of committed shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn preview_count(&self) -> usize {
        self.previews.len()
    }

    /// Whether a freehand stroke is being captured.
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    /// Top-most committed shape under a canvas point.
    pub fn shape_at_point(&self, point: Point) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|id| {
            self.shapes
                .get(id)
                .is_some_and(|s| s.hit_test(point, self.hit_tolerance))
        })
    }

    fn insert_committed(&mut self, shape: Shape) -> SceneHandle {
        let id = shape.id;
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        SceneHandle::new(id, HandleKind::Committed)
    }

    /// Effective stroke and fill. Erase strokes paint with the background.
    fn paint_for(&self, shape: &Shape) -> (Color, Option<Color>) {
        match &shape.geometry {
            Geometry::Path(Path {
                mode: StrokeMode::Erase,
                ..
            }) => (self.background.into(), None),
            _ => (shape.style.stroke_with_opacity(), shape.style.fill_with_opacity()),
        }
    }

    fn write_svg_shape(&self, out: &mut String, shape: &Shape) -> std::fmt::Result {
        let (stroke, fill) = self.paint_for(shape);
        if let Geometry::Text(text) = &shape.geometry {
            return writeln!(
                out,
                r#"  <text x="{}" y="{}" font-size="{}" fill="{}" dominant-baseline="hanging">{}</text>"#,
                text.position.x,
                text.position.y,
                text.font_size,
                svg_color(stroke),
                escape_xml(&text.content)
            );
        }
        writeln!(
            out,
            r#"  <path d="{}" stroke="{}" stroke-width="{}" fill="{}" stroke-linecap="round" stroke-linejoin="round"/>"#,
            shape.geometry.to_path().to_svg(),
            svg_color(stroke),
            shape.style.stroke_width,
            fill.map_or_else(|| "none".to_string(), svg_color)
        )
    }
}

fn svg_color(color: Color) -> String {
    SerializableColor::from(color).to_hex()
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl SceneEngine for MemoryScene {
    fn create_shape(
        &mut self,
        geometry: Geometry,
        style: ShapeStyle,
        kind: HandleKind,
    ) -> SceneHandle {
        let shape = Shape::new(geometry, style);
        match kind {
            HandleKind::Committed => self.insert_committed(shape),
            HandleKind::Preview => {
                let handle = SceneHandle::new(shape.id, HandleKind::Preview);
                self.previews.push(shape);
                handle
            }
        }
    }

    fn remove_shape(&mut self, handle: SceneHandle) -> EngineResult<()> {
        match handle.kind {
            HandleKind::Committed => {
                self.shapes
                    .remove(&handle.id)
                    .ok_or(EngineError::UnknownShape(handle.id))?;
                self.z_order.retain(|&id| id != handle.id);
                if self.active == Some(handle.id) {
                    self.active = None;
                }
            }
            HandleKind::Preview => {
                let pos = self
                    .previews
                    .iter()
                    .position(|s| s.id == handle.id)
                    .ok_or(EngineError::UnknownShape(handle.id))?;
                self.previews.remove(pos);
            }
        }
        Ok(())
    }

    fn promote(&mut self, handle: SceneHandle) -> EngineResult<SceneHandle> {
        let pos = self
            .previews
            .iter()
            .position(|s| s.id == handle.id)
            .ok_or(EngineError::UnknownShape(handle.id))?;
        let shape = self.previews.remove(pos);
        Ok(self.insert_committed(shape))
    }

    fn objects(&self) -> Vec<SceneHandle> {
        self.z_order
            .iter()
            .map(|&id| SceneHandle::new(id, HandleKind::Committed))
            .chain(
                self.previews
                    .iter()
                    .map(|s| SceneHandle::new(s.id, HandleKind::Preview)),
            )
            .collect()
    }

    fn get_pointer(&self, raw: &RawPointer) -> Point {
        self.camera.screen_to_canvas(raw.position)
    }

    fn serialize_scene(&self) -> EngineResult<Snapshot> {
        let doc = SceneDocument {
            shapes: self.shapes_ordered().cloned().collect(),
        };
        Ok(Snapshot::new(serde_json::to_string(&doc)?))
    }

    fn deserialize_scene(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
        // Parse fully before touching the scene
        let doc: SceneDocument = serde_json::from_str(snapshot.as_str())?;
        self.shapes.clear();
        self.z_order.clear();
        self.active = None;
        for shape in doc.shapes {
            self.insert_committed(shape);
        }
        log::debug!("Scene replaced with {} shapes", self.shapes.len());
        Ok(())
    }

    fn clear_scene(&mut self) {
        self.shapes.clear();
        self.z_order.clear();
        self.previews.clear();
        self.active = None;
        self.stroke = None;
    }

    fn set_active_object(&mut self, handle: Option<SceneHandle>) {
        self.active = handle
            .filter(|h| h.is_committed() && self.shapes.contains_key(&h.id))
            .map(|h| h.id);
    }

    fn active_object(&self) -> Option<SceneHandle> {
        self.active
            .map(|id| SceneHandle::new(id, HandleKind::Committed))
    }

    fn begin_stroke(&mut self, point: Point, style: ShapeStyle, mode: StrokeMode) {
        self.stroke = Some(StrokeCapture {
            points: vec![point],
            style,
            mode,
        });
    }

    fn extend_stroke(&mut self, point: Point) {
        if let Some(stroke) = &mut self.stroke {
            stroke.points.push(point);
        }
    }

    fn finish_stroke(&mut self) -> Option<SceneHandle> {
        let stroke = self.stroke.take()?;
        if stroke.points.len() < 2 {
            log::debug!("Dropping stroke with a single point");
            return None;
        }
        let shape = Shape::new(
            Geometry::Path(Path::from_points(stroke.points, stroke.mode)),
            stroke.style,
        );
        Some(self.insert_committed(shape))
    }

    fn abort_stroke(&mut self) {
        self.stroke = None;
    }

    fn native_pointer(&mut self, tool: NativeTool, phase: PointerPhase, raw: &RawPointer) {
        match (tool, phase) {
            (NativeTool::Select, PointerPhase::Down) => {
                let point = self.get_pointer(raw);
                self.active = self.shape_at_point(point);
            }
            (NativeTool::Select, _) => {}
            (NativeTool::Pan, PointerPhase::Down) => {
                self.pan_anchor = Some(raw.position);
            }
            (NativeTool::Pan, PointerPhase::Move) => {
                if let Some(last) = self.pan_anchor {
                    self.camera.pan(raw.position - last);
                    self.pan_anchor = Some(raw.position);
                }
            }
            (NativeTool::Pan, PointerPhase::Up) => {
                if let Some(last) = self.pan_anchor.take() {
                    self.camera.pan(raw.position - last);
                }
            }
        }
    }

    fn export_raster(&self) -> EngineResult<Vec<u8>> {
        Err(EngineError::Unsupported("raster export"))
    }

    fn export_vector(&self) -> EngineResult<String> {
        let mut out = String::new();
        let fmt_err = |_: std::fmt::Error| EngineError::Unsupported("vector export formatting");
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.size.width,
            h = self.size.height
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            self.background.to_hex()
        )
        .map_err(fmt_err)?;
        for shape in self.shapes_ordered() {
            self.write_svg_shape(&mut out, shape).map_err(fmt_err)?;
        }
        out.push_str("</svg>\n");
        Ok(out)
    }
}

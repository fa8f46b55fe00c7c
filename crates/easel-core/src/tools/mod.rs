//! Tool system: turns pointer events into previews and committed shapes.

use crate::error::{EngineError, EngineResult};
use crate::input::{MouseButton, PointerPhase, RawPointer};
use crate::preview::{PreviewController, drag_geometry};
use crate::scene::{HandleKind, NativeTool, SceneEngine, SceneHandle};
use crate::shapes::{Geometry, StrokeMode, Text};
use crate::style::{ShapeStyle, StyleAttributes};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Select,
    Brush,
    Eraser,
    Line,
    Rectangle,
    Circle,
    Triangle,
    Text,
    Pan,
}

impl Tool {
    /// Every tool, in toolbar order.
    pub fn all() -> &'static [Tool] {
        &[
            Tool::Select,
            Tool::Brush,
            Tool::Eraser,
            Tool::Line,
            Tool::Rectangle,
            Tool::Circle,
            Tool::Triangle,
            Tool::Text,
            Tool::Pan,
        ]
    }

    /// Shape drawn by dragging with this tool.
    pub fn drag_shape(self) -> Option<DragShape> {
        match self {
            Tool::Line => Some(DragShape::Line),
            Tool::Rectangle => Some(DragShape::Rectangle),
            Tool::Circle => Some(DragShape::Circle),
            Tool::Triangle => Some(DragShape::Triangle),
            _ => None,
        }
    }

    /// How freehand strokes drawn with this tool are painted.
    pub fn stroke_mode(self) -> Option<StrokeMode> {
        match self {
            Tool::Brush => Some(StrokeMode::Draw),
            Tool::Eraser => Some(StrokeMode::Erase),
            _ => None,
        }
    }

    /// Tools whose pointer handling belongs to the engine.
    pub fn native(self) -> Option<NativeTool> {
        match self {
            Tool::Select => Some(NativeTool::Select),
            Tool::Pan => Some(NativeTool::Pan),
            _ => None,
        }
    }
}

/// Shapes drawn with a press-drag-release gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragShape {
    Line,
    Rectangle,
    Circle,
    Triangle,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Waiting for a pointer press.
    #[default]
    Idle,
    /// Dragging out a shape.
    Dragging {
        shape: DragShape,
        /// Canvas position of the press.
        anchor: Point,
        /// Last pointer position seen.
        current: Point,
        /// Paint captured when the gesture started.
        style: ShapeStyle,
    },
    /// The engine is capturing a brush or eraser stroke.
    FreehandStroking,
    /// A text label was placed; waiting for the release.
    TextPlacing,
}

/// What a single event did to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing happened.
    Ignored,
    /// A gesture started.
    Started,
    /// The preview or stroke changed.
    Updated,
    /// A gesture finished with this committed object.
    Committed(SceneHandle),
    /// A gesture finished without producing anything.
    Discarded,
    /// A gesture was aborted before completion.
    Cancelled,
}

impl Transition {
    /// The committed object, if this transition completed a gesture.
    pub fn committed(self) -> Option<SceneHandle> {
        match self {
            Transition::Committed(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Interprets pointer events for the active tool.
#[derive(Debug)]
pub struct ToolStateMachine {
    current_tool: Tool,
    state: ToolState,
    preview: PreviewController,
    /// Content of newly placed text labels.
    pub text_placeholder: String,
    /// Drags whose extent does not exceed this on either axis are dropped.
    pub min_shape_extent: f64,
}

impl Default for ToolStateMachine {
    fn default() -> Self {
        Self {
            current_tool: Tool::default(),
            state: ToolState::default(),
            preview: PreviewController::new(),
            text_placeholder: "Text".to_string(),
            min_shape_extent: 1.0,
        }
    }
}

impl ToolStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// The live preview, if a drag is in progress.
    pub fn preview(&self) -> Option<SceneHandle> {
        self.preview.handle()
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Switch tools, cancelling any gesture in progress.
    pub fn set_tool<E: SceneEngine + ?Sized>(&mut self, engine: Option<&mut E>, tool: Tool) -> Transition {
        let transition = match engine {
            Some(engine) => self.cancel(engine),
            None => self.reset(),
        };
        self.current_tool = tool;
        transition
    }

    /// Handle a pointer press.
    pub fn pointer_down<E: SceneEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        raw: &RawPointer,
        style: &StyleAttributes,
    ) -> EngineResult<Transition> {
        if self.is_active() {
            log::debug!("Ignoring press during {:?}", self.state);
            return Ok(Transition::Ignored);
        }
        // Only the primary button draws
        if raw.button != MouseButton::Left {
            log::debug!("Ignoring {:?} press", raw.button);
            return Ok(Transition::Ignored);
        }
        let tool = self.current_tool;

        if let Some(native) = tool.native() {
            engine.native_pointer(native, PointerPhase::Down, raw);
            return Ok(Transition::Ignored);
        }

        let point = engine.get_pointer(raw);
        if let Some(shape) = tool.drag_shape() {
            self.state = ToolState::Dragging {
                shape,
                anchor: point,
                current: point,
                style: style.to_shape_style(),
            };
            log::debug!("Dragging {shape:?} from {point:?}");
            return Ok(Transition::Started);
        }

        if let Some(mode) = tool.stroke_mode() {
            engine.begin_stroke(point, style.to_shape_style(), mode);
            self.state = ToolState::FreehandStroking;
            return Ok(Transition::Started);
        }

        // Text is committed right away, there is no drag phase
        let text = Text::new(point, self.text_placeholder.clone());
        let handle = engine.create_shape(
            Geometry::Text(text),
            style.to_shape_style(),
            HandleKind::Committed,
        );
        self.state = ToolState::TextPlacing;
        log::debug!("Placed text {} at {point:?}", handle.id);
        Ok(Transition::Committed(handle))
    }

    /// Handle a pointer move.
    pub fn pointer_move<E: SceneEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        raw: &RawPointer,
    ) -> EngineResult<Transition> {
        if let Some(native) = self.current_tool.native() {
            engine.native_pointer(native, PointerPhase::Move, raw);
            return Ok(Transition::Ignored);
        }

        match &mut self.state {
            ToolState::Dragging {
                shape,
                anchor,
                current,
                style,
            } => {
                let point = engine.get_pointer(raw);
                *current = point;
                let geometry = drag_geometry(*shape, *anchor, point);
                self.preview.replace(engine, geometry, style.clone())?;
                Ok(Transition::Updated)
            }
            ToolState::FreehandStroking => {
                let point = engine.get_pointer(raw);
                engine.extend_stroke(point);
                Ok(Transition::Updated)
            }
            ToolState::Idle | ToolState::TextPlacing => Ok(Transition::Ignored),
        }
    }

    /// Handle a pointer release.
    pub fn pointer_up<E: SceneEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        raw: &RawPointer,
    ) -> EngineResult<Transition> {
        if let Some(native) = self.current_tool.native() {
            engine.native_pointer(native, PointerPhase::Up, raw);
            return Ok(Transition::Ignored);
        }

        match std::mem::take(&mut self.state) {
            ToolState::Dragging {
                shape,
                anchor,
                current,
                style,
            } => {
                let point = engine.get_pointer(raw);
                let geometry = drag_geometry(shape, anchor, point);
                let bounds = geometry.bounds();
                if bounds.width() <= self.min_shape_extent && bounds.height() <= self.min_shape_extent {
                    log::debug!("Dropping degenerate {shape:?}");
                    self.preview.discard(engine);
                    return Ok(Transition::Discarded);
                }
                if point != current || !self.preview.is_active() {
                    self.preview.replace(engine, geometry, style)?;
                }
                match self.preview.commit(engine) {
                    Ok(handle) => Ok(handle.map_or(Transition::Discarded, Transition::Committed)),
                    Err(EngineError::UnknownShape(id)) => {
                        log::warn!("Preview {id} vanished before the release, dropping {shape:?}");
                        Ok(Transition::Discarded)
                    }
                    Err(err) => Err(err),
                }
            }
            ToolState::FreehandStroking => {
                let point = engine.get_pointer(raw);
                engine.extend_stroke(point);
                // The engine's completion notification is the commit trigger
                Ok(engine
                    .finish_stroke()
                    .map_or(Transition::Discarded, Transition::Committed))
            }
            ToolState::TextPlacing | ToolState::Idle => Ok(Transition::Ignored),
        }
    }

    /// Abort the gesture in progress, removing any preview or partial stroke.
    pub fn cancel<E: SceneEngine + ?Sized>(&mut self, engine: &mut E) -> Transition {
        match std::mem::take(&mut self.state) {
            ToolState::Dragging { .. } => {
                self.preview.discard(engine);
                log::debug!("Drag cancelled");
                Transition::Cancelled
            }
            ToolState::FreehandStroking => {
                engine.abort_stroke();
                log::debug!("Stroke cancelled");
                Transition::Cancelled
            }
            ToolState::TextPlacing | ToolState::Idle => Transition::Ignored,
        }
    }

    /// Forget the gesture without an engine to clean up in.
    fn reset(&mut self) -> Transition {
        let was_active = self.is_active();
        self.state = ToolState::Idle;
        self.preview = PreviewController::new();
        if was_active {
            Transition::Cancelled
        } else {
            Transition::Ignored
        }
    }
}

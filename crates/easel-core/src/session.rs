//! A drawing session: one engine, one tool machine, one history.

use crate::config::SessionConfig;
use crate::error::{EaselError, EaselResult};
use crate::history::HistoryStore;
use crate::input::{KeyEvent, PointerPhase, RawPointer};
use crate::scene::SceneEngine;
use crate::shortcuts::{Action, ShortcutRegistry};
use crate::style::StyleAttributes;
use crate::tools::{Tool, ToolStateMachine, Transition};

/// Turn the benign error kinds into `Ok(false)`.
fn quietly(result: EaselResult<bool>) -> EaselResult<bool> {
    match result {
        Err(err) if err.is_noop() => {
            log::debug!("Ignored: {err}");
            Ok(false)
        }
        other => other,
    }
}

/// Binds the active tool and style to a scene engine and records history.
///
/// The session is the only place history entries are recorded: once per
/// completed gesture, delete or clear. Pointer moves never record.
#[derive(Debug)]
pub struct DrawingSession<E: SceneEngine> {
    engine: Option<E>,
    tools: ToolStateMachine,
    style: StyleAttributes,
    history: HistoryStore,
    shortcuts: ShortcutRegistry,
}

impl<E: SceneEngine> Default for DrawingSession<E> {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl<E: SceneEngine> DrawingSession<E> {
    /// Create a session with no engine attached.
    pub fn new(config: &SessionConfig) -> Self {
        let mut tools = ToolStateMachine::new();
        tools.text_placeholder = config.text_placeholder.clone();
        tools.min_shape_extent = config.min_shape_extent;

        let mut style = config.style.clone();
        style.clamp();

        Self {
            engine: None,
            tools,
            style,
            history: HistoryStore::new(config.max_history),
            shortcuts: ShortcutRegistry::new(),
        }
    }

    /// Create a session and attach `engine` to it.
    pub fn with_engine(config: &SessionConfig, engine: E) -> EaselResult<Self> {
        let mut session = Self::new(config);
        session.attach(engine)?;
        Ok(session)
    }

    /// Attach an engine, recording its current scene as the history baseline.
    ///
    /// Returns the previously attached engine, if any.
    pub fn attach(&mut self, engine: E) -> EaselResult<Option<E>> {
        let previous = self.detach();
        let engine = self.engine.insert(engine);
        self.history.snapshot(Some(&*engine))?;
        log::info!("Engine attached");
        Ok(previous)
    }

    /// Detach the engine, abandoning any gesture and forgetting history.
    pub fn detach(&mut self) -> Option<E> {
        let mut engine = self.engine.take()?;
        self.tools.cancel(&mut engine);
        self.history.reset();
        log::info!("Engine detached");
        Some(engine)
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Direct engine access, e.g. for viewport changes. Edits made here are
    /// not recorded in history.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn tools(&self) -> &ToolStateMachine {
        &self.tools
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        &self.shortcuts
    }

    pub fn tool(&self) -> Tool {
        self.tools.current_tool()
    }

    /// Switch tools. Returns whether a gesture was cancelled.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        let transition = self.tools.set_tool(self.engine.as_mut(), tool);
        log::debug!("Tool set to {tool:?}");
        transition == Transition::Cancelled
    }

    pub fn style(&self) -> &StyleAttributes {
        &self.style
    }

    /// Replace the style used by gestures started from now on.
    pub fn set_style(&mut self, mut style: StyleAttributes) {
        style.clamp();
        self.style = style;
    }

    /// Pointer pressed. Returns whether the event started or completed a
    /// gesture.
    pub fn handle_pointer_down(&mut self, raw: &RawPointer) -> EaselResult<bool> {
        quietly(self.pointer(PointerPhase::Down, raw))
    }

    /// Pointer moved. Returns whether a gesture was updated.
    pub fn handle_pointer_move(&mut self, raw: &RawPointer) -> EaselResult<bool> {
        quietly(self.pointer(PointerPhase::Move, raw))
    }

    /// Pointer released. Returns whether a gesture ended.
    pub fn handle_pointer_up(&mut self, raw: &RawPointer) -> EaselResult<bool> {
        quietly(self.pointer(PointerPhase::Up, raw))
    }

    /// Pointer capture lost. Returns whether a gesture was cancelled.
    pub fn handle_pointer_cancel(&mut self) -> EaselResult<bool> {
        quietly(self.cancel_gesture())
    }

    /// Key pressed. Returns whether a shortcut consumed the key.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> EaselResult<bool> {
        let Some(action) = self.shortcuts.lookup(event) else {
            return Ok(false);
        };
        log::debug!("Shortcut {:?} -> {action:?}", event.key);
        match action {
            Action::Undo => {
                self.undo()?;
            }
            Action::Redo => {
                self.redo()?;
            }
            Action::DeleteSelected => {
                self.delete_selected()?;
            }
            Action::CancelGesture => {
                self.handle_pointer_cancel()?;
            }
            Action::SelectTool(tool) => {
                self.set_tool(tool);
            }
        }
        Ok(true)
    }

    /// Step back one history entry. Any gesture in progress is abandoned.
    pub fn undo(&mut self) -> EaselResult<bool> {
        quietly(self.step(false))
    }

    /// Step forward one history entry. Any gesture in progress is abandoned.
    pub fn redo(&mut self) -> EaselResult<bool> {
        quietly(self.step(true))
    }

    /// Remove every object and record the empty scene.
    pub fn clear(&mut self) -> EaselResult<bool> {
        quietly(self.clear_all())
    }

    /// Remove the engine's active object and record the result.
    pub fn delete_selected(&mut self) -> EaselResult<bool> {
        quietly(self.delete_active())
    }

    pub fn can_undo(&self) -> bool {
        self.engine.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.is_some() && self.history.can_redo()
    }

    /// Raster image of the scene, or `None` without an engine.
    pub fn export_raster(&self) -> EaselResult<Option<Vec<u8>>> {
        match &self.engine {
            Some(engine) => Ok(Some(engine.export_raster()?)),
            None => Ok(None),
        }
    }

    /// Vector image of the scene, or `None` without an engine.
    pub fn export_vector(&self) -> EaselResult<Option<String>> {
        match &self.engine {
            Some(engine) => Ok(Some(engine.export_vector()?)),
            None => Ok(None),
        }
    }

    fn pointer(&mut self, phase: PointerPhase, raw: &RawPointer) -> EaselResult<bool> {
        let engine = self.engine.as_mut().ok_or(EaselError::NoActiveScene)?;
        let transition = match phase {
            PointerPhase::Down => self.tools.pointer_down(engine, raw, &self.style)?,
            PointerPhase::Move => self.tools.pointer_move(engine, raw)?,
            PointerPhase::Up => self.tools.pointer_up(engine, raw)?,
        };
        if let Some(handle) = transition.committed() {
            log::debug!("Gesture committed {}", handle.id);
            self.history.snapshot(self.engine.as_ref())?;
        }
        Ok(transition != Transition::Ignored)
    }

    fn cancel_gesture(&mut self) -> EaselResult<bool> {
        let engine = self.engine.as_mut().ok_or(EaselError::NoActiveScene)?;
        Ok(self.tools.cancel(engine) == Transition::Cancelled)
    }

    fn step(&mut self, forward: bool) -> EaselResult<bool> {
        let engine = self.engine.as_mut().ok_or(EaselError::NoActiveScene)?;
        self.tools.cancel(engine);
        if forward {
            self.history.redo(Some(engine))?;
        } else {
            self.history.undo(Some(engine))?;
        }
        Ok(true)
    }

    fn clear_all(&mut self) -> EaselResult<bool> {
        let engine = self.engine.as_mut().ok_or(EaselError::NoActiveScene)?;
        self.tools.cancel(engine);
        engine.clear_scene();
        log::info!("Scene cleared");
        self.history.snapshot(Some(&*engine))?;
        Ok(true)
    }

    fn delete_active(&mut self) -> EaselResult<bool> {
        let engine = self.engine.as_mut().ok_or(EaselError::NoActiveScene)?;
        let active = engine.active_object().ok_or(EaselError::EmptySelection)?;
        engine.remove_shape(active)?;
        engine.set_active_object(None);
        log::info!("Deleted {}", active.id);
        self.history.snapshot(Some(&*engine))?;
        Ok(true)
    }
}

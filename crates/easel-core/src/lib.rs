//! Easel Core Library
//!
//! Tool state machine, shape previews and snapshot history for a 2-D drawing
//! surface. Geometry, paint and rendering belong to a [`SceneEngine`];
//! [`MemoryScene`] is an in-memory engine suitable for tests and headless use.

pub mod camera;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod preview;
pub mod scene;
pub mod session;
pub mod shapes;
pub mod shortcuts;
pub mod style;
pub mod tools;

pub use camera::Camera;
pub use config::SessionConfig;
pub use error::{EaselError, EaselResult, EngineError, EngineResult};
pub use history::HistoryStore;
pub use input::{KeyEvent, Modifiers, MouseButton, PointerPhase, RawPointer};
pub use preview::PreviewController;
pub use scene::{HandleKind, MemoryScene, NativeTool, SceneEngine, SceneHandle, Snapshot};
pub use session::DrawingSession;
pub use shapes::{Geometry, Shape, ShapeId, ShapeKind};
pub use shortcuts::{Action, Shortcut, ShortcutRegistry};
pub use style::{SerializableColor, ShapeStyle, StyleAttributes};
pub use tools::{Tool, ToolState, ToolStateMachine, Transition};

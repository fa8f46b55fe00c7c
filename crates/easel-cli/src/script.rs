//! Session command scripts.

use anyhow::Context;
use easel_core::{
    DrawingSession, KeyEvent, MemoryScene, Modifiers, MouseButton, RawPointer, SceneEngine, StyleAttributes,
    Tool,
};
use kurbo::Point;
use serde::Deserialize;
use std::fmt;

/// One step of a script.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Tool {
        tool: Tool,
    },
    Style {
        style: StyleAttributes,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Cancel,
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Undo,
    Redo,
    Clear,
    Delete,
    /// Zoom the view around a screen position.
    Zoom {
        x: f64,
        y: f64,
        factor: f64,
    },
}

fn pointer(x: f64, y: f64, modifiers: Modifiers) -> RawPointer {
    RawPointer {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers,
    }
}

/// Parse a script: a JSON array of commands.
pub fn parse(json: &str) -> anyhow::Result<Vec<Command>> {
    serde_json::from_str(json).context("Invalid script")
}

/// Apply one command. Returns whether it had an effect.
pub fn apply(session: &mut DrawingSession<MemoryScene>, command: &Command) -> anyhow::Result<bool> {
    let changed = match command {
        Command::Tool { tool } => {
            session.set_tool(*tool);
            true
        }
        Command::Style { style } => {
            session.set_style(style.clone());
            true
        }
        Command::Down { x, y, modifiers } => session.handle_pointer_down(&pointer(*x, *y, *modifiers))?,
        Command::Move { x, y, modifiers } => session.handle_pointer_move(&pointer(*x, *y, *modifiers))?,
        Command::Up { x, y, modifiers } => session.handle_pointer_up(&pointer(*x, *y, *modifiers))?,
        Command::Cancel => session.handle_pointer_cancel()?,
        Command::Key { key, modifiers } => session.handle_key_down(&KeyEvent::new(key.clone(), *modifiers))?,
        Command::Undo => session.undo()?,
        Command::Redo => session.redo()?,
        Command::Clear => session.clear()?,
        Command::Delete => session.delete_selected()?,
        Command::Zoom { x, y, factor } => match session.engine_mut() {
            Some(scene) => {
                scene.camera_mut().zoom_at(Point::new(*x, *y), *factor);
                true
            }
            None => false,
        },
    };
    Ok(changed)
}

/// Run every command in order, stopping at the first failure.
pub fn replay(session: &mut DrawingSession<MemoryScene>, commands: &[Command]) -> anyhow::Result<Summary> {
    let mut applied = 0;
    for (index, command) in commands.iter().enumerate() {
        if apply(session, command).with_context(|| format!("Command {index} ({command:?}) failed"))? {
            applied += 1;
        } else {
            log::debug!("Command {index} had no effect");
        }
    }
    Ok(Summary::new(session, commands.len(), applied))
}

/// State of a session after a replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub commands: usize,
    pub applied: usize,
    pub objects: usize,
    pub history_len: usize,
    pub cursor: Option<usize>,
    /// Size of the snapshot the history cursor points at.
    pub snapshot_bytes: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub tool: Tool,
}

impl Summary {
    pub fn new(session: &DrawingSession<MemoryScene>, commands: usize, applied: usize) -> Self {
        Self {
            commands,
            applied,
            objects: session.engine().map_or(0, |scene| scene.objects().len()),
            history_len: session.history().len(),
            cursor: session.history().cursor(),
            snapshot_bytes: session
                .history()
                .current()
                .map_or(0, |snapshot| snapshot.as_str().len()),
            can_undo: session.can_undo(),
            can_redo: session.can_redo(),
            tool: session.tool(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commands: {} ({} applied)", self.commands, self.applied)?;
        writeln!(f, "objects:  {}", self.objects)?;
        match self.cursor {
            Some(cursor) => writeln!(f, "history:  {} entries, at {cursor}", self.history_len)?,
            None => writeln!(f, "history:  empty")?,
        }
        writeln!(f, "snapshot: {} bytes", self.snapshot_bytes)?;
        writeln!(f, "undo: {}  redo: {}", self.can_undo, self.can_redo)?;
        write!(f, "tool:     {:?}", self.tool)
    }
}

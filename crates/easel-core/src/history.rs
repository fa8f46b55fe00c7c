//! Snapshot history with a cursor for undo/redo.

use crate::error::{EaselError, EaselResult};
use crate::scene::{SceneEngine, Snapshot};

/// Default number of snapshots to keep.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Linear edit history.
///
/// `snapshots[cursor]` is always the scene currently shown. Recording after
/// an undo drops everything past the cursor, so there is never more than one
/// redo branch.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    max_len: Option<usize>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_HISTORY))
    }
}

impl HistoryStore {
    /// Create an empty history holding at most `max_len` snapshots
    /// (`None` = unbounded).
    pub fn new(max_len: Option<usize>) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            max_len: max_len.map(|n| n.max(1)),
        }
    }

    /// Record the committed scene as the newest entry.
    pub fn snapshot<E: SceneEngine + ?Sized>(&mut self, engine: Option<&E>) -> EaselResult<()> {
        let engine = engine.ok_or(EaselError::NoActiveScene)?;
        let snapshot = engine.serialize_scene()?;

        if !self.snapshots.is_empty() {
            let dropped = self.snapshots.len() - (self.cursor + 1);
            if dropped > 0 {
                log::debug!("Discarding {dropped} redo entries");
            }
            self.snapshots.truncate(self.cursor + 1);
        }
        self.snapshots.push(snapshot);

        if let Some(max) = self.max_len {
            if self.snapshots.len() > max {
                let excess = self.snapshots.len() - max;
                self.snapshots.drain(..excess);
            }
        }
        self.cursor = self.snapshots.len() - 1;
        log::info!("History entry {} recorded", self.cursor);
        Ok(())
    }

    /// Step back one entry, replaying it into the engine.
    pub fn undo<E: SceneEngine + ?Sized>(&mut self, engine: Option<&mut E>) -> EaselResult<()> {
        let engine = engine.ok_or(EaselError::NoActiveScene)?;
        if !self.can_undo() {
            return Err(EaselError::HistoryBoundary);
        }
        self.restore(engine, self.cursor - 1)
    }

    /// Step forward one entry, replaying it into the engine.
    pub fn redo<E: SceneEngine + ?Sized>(&mut self, engine: Option<&mut E>) -> EaselResult<()> {
        let engine = engine.ok_or(EaselError::NoActiveScene)?;
        if !self.can_redo() {
            return Err(EaselError::HistoryBoundary);
        }
        self.restore(engine, self.cursor + 1)
    }

    /// Replay an entry. The cursor only moves once the replay succeeded.
    fn restore<E: SceneEngine + ?Sized>(&mut self, engine: &mut E, index: usize) -> EaselResult<()> {
        engine.deserialize_scene(&self.snapshots[index])?;
        log::info!("History moved from entry {} to {index}", self.cursor);
        self.cursor = index;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Index of the current entry, if any.
    pub fn cursor(&self) -> Option<usize> {
        (!self.snapshots.is_empty()).then_some(self.cursor)
    }

    /// The snapshot of the scene currently shown.
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor)
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Forget every entry.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }
}

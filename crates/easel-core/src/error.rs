//! Error types.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Failures reported by a scene engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Session-level errors.
///
/// `NoActiveScene`, `EmptySelection` and `HistoryBoundary` come from ordinary
/// UI state and are turned into no-ops by [`crate::DrawingSession`].
#[derive(Debug, Error)]
pub enum EaselError {
    #[error("No scene engine attached")]
    NoActiveScene,
    #[error("Nothing selected")]
    EmptySelection,
    #[error("History boundary reached")]
    HistoryBoundary,
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EaselError {
    /// Whether this condition is a benign no-op rather than a failure.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            EaselError::NoActiveScene | EaselError::EmptySelection | EaselError::HistoryBoundary
        )
    }
}

/// Result type for session operations.
pub type EaselResult<T> = Result<T, EaselError>;

//! Error types for the grid simulation.
//!
//! Only contract violations and setup failures are errors. Player death and
//! quitting are reported as `StepOutcome::GameOver`; rejected actions (walking
//! into a barrier, attacking on cooldown) are absorbed without any error.

use thiserror::Error;

use crate::game::types::EntityId;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    /// Grid accessed outside its dimensions. Callers clamp before querying.
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Handle refers to an entity that has already been removed.
    #[error("Entity {0} is dead or unknown")]
    DeadEntity(EntityId),

    /// Grid and entity positions disagree.
    #[error("Occupancy invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

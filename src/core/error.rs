//! Error types for construction-time validation.
//!
//! Moves, spawns and restarts never fail. Only building a game or a board from
//! caller-supplied data can.

use thiserror::Error;

use super::position::Position;

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {size} is outside the supported range {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("{start_tiles} start tiles do not fit on a board with {cells} cells")]
    TooManyStartTiles { start_tiles: usize, cells: usize },

    #[error("saved board is {found}x{found} but the config expects {expected}x{expected}")]
    SizeMismatch { expected: usize, found: usize },

    #[error("saved board is corrupt: {0}")]
    CorruptGrid(#[from] GridError),
}

/// Invalid board data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("a grid needs at least one row")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile at {0} is outside the board")]
    OutOfBounds(Position),

    #[error("cell {0} is already occupied")]
    Occupied(Position),

    #[error("board of size {size} needs {expected} cells, found {found}")]
    CellCount {
        size: usize,
        expected: usize,
        found: usize,
    },

    #[error("tile claims {claimed} but is stored at {stored}")]
    Misplaced { claimed: Position, stored: Position },
}

//! # delirium
//!
//! Turn-processing core for a 2048-family puzzle with signed tiles and letters.
//!
//! ## Rules in brief
//!
//! - Tiles slide as far as they can in the chosen direction.
//! - Equal values merge: numbers double, letters advance (`'A'` → `'B'`).
//! - A number meets its negation (`4` against `-4`) and the pair cancels into
//!   a letter (`'B'`).
//! - After every move that changed the board, one tile spawns from a layered
//!   heuristic driven by the sum of the board.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: all randomness comes from one seeded `GameRng`, so a
//!    seed plus a move list replays a game exactly.
//! 2. **Infallible turns**: no-op moves, full-board spawns and moves after the
//!    game ended are absorbed, never errors.
//! 3. **Collaborators behind traits**: input, actuation and best-score storage
//!    are traits with in-memory implementations.
//!
//! ## Modules
//!
//! - `core`: values, tiles, positions, RNG, configuration, state, errors
//! - `grid`: board storage
//! - `engine`: traversal, slide/merge rules, spawner
//! - `io`: input, actuator and score-store seams
//! - `game`: the `GameManager` state machine
//!
//! ## Example
//!
//! ```
//! use delirium::{Direction, GameConfig, GameManager};
//!
//! let mut game = GameManager::headless(GameConfig::new().with_seed(7)).unwrap();
//! assert_eq!(game.grid().tile_count(), 2);
//!
//! for direction in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
//!     game.move_tiles(direction);
//! }
//! assert!(game.grid().tile_count() >= 1);
//! ```

pub mod core;
pub mod grid;
pub mod engine;
pub mod io;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, Direction, GameConfig, GameRng, GameRngState, GameState, GameStatus, GridError,
    Position, Tile, TileValue, Vector,
};

pub use crate::grid::Grid;

pub use crate::engine::{
    build_traversals, find_farthest_position, moves_available, MergeEvent, MergeKind, MoveOutcome,
    SpawnChannel, SpawnPlan, Traversals,
};

pub use crate::io::{
    Actuator, EventKind, HandlerId, InputEvent, InputManager, MemoryScoreManager, Metadata,
    NullActuator, QueuedInput, RecordingActuator, ScoreManager,
};

pub use crate::game::{GameManager, GameSnapshot, HeadlessGame};

//! Core types: values, tiles, positions, RNG, configuration, state, errors.
//!
//! Everything here is plain data. Board mutation lives in `grid`, move rules
//! in `engine`.

pub mod value;
pub mod position;
pub mod tile;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use value::TileValue;
pub use position::{Direction, Position, Vector};
pub use tile::Tile;
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
pub use state::{GameState, GameStatus};
pub use error::{ConfigError, GridError};

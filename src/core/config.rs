//! Game configuration.
//!
//! A `GameConfig` fixes everything a game needs before the first move:
//! - `size`: board side length
//! - `start_tiles`: tiles spawned by every setup
//! - `seed`: seed of the game's RNG
//!
//! Configs are plain data (serde-friendly) and are validated once, when the
//! game manager is built.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Smallest supported board side.
pub const MIN_SIZE: usize = 2;

/// Largest supported board side.
pub const MAX_SIZE: usize = 16;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length.
    pub size: usize,

    /// Tiles added by `setup`.
    pub start_tiles: usize,

    /// RNG seed. Same seed and same inputs replay the same game.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 4,
            start_tiles: 2,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Create the default configuration (4×4, two start tiles, seed 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board size.
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set the number of start tiles.
    #[must_use]
    pub fn with_start_tiles(mut self, start_tiles: usize) -> Self {
        self.start_tiles = start_tiles;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check the configuration can build a game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::InvalidSize {
                size: self.size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        if self.start_tiles > self.cell_count() {
            return Err(ConfigError::TooManyStartTiles {
                start_tiles: self.start_tiles,
                cells: self.cell_count(),
            });
        }

        Ok(())
    }
}

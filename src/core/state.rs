//! Game state flags and score.
//!
//! ## Invariants
//!
//! - `score` never decreases within a game.
//! - `over` is only set by a move and only cleared by a new setup.
//! - The game is terminated when it is over, or won and the player has not
//!   chosen to keep playing.

use serde::{Deserialize, Serialize};

/// Score and flags of the running game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Accumulated score.
    pub score: u64,

    /// No move can change the board any more.
    pub over: bool,

    /// A winning tile has been created.
    pub won: bool,

    /// The player chose to continue after winning.
    pub keep_playing: bool,
}

impl GameState {
    /// Fresh state for a new game.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the score, saturating.
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Does the game accept no further moves?
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// Derived status for display.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.over {
            GameStatus::Over
        } else if self.won && !self.keep_playing {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }
}

/// Coarse game status derived from `GameState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    Playing,
    /// A winning tile exists and the player has not chosen to keep playing.
    Won,
    /// No moves remain.
    Over,
}

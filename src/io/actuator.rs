//! Output side: actuation sink and best-score store.

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// State pushed alongside the grid on every actuation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub score: u64,
    pub over: bool,
    pub won: bool,
    pub best_score: u64,
    pub terminated: bool,
}

/// Receives the board after every setup and every move that changed it.
pub trait Actuator {
    /// Present the grid and its metadata.
    fn actuate(&mut self, grid: &Grid, metadata: &Metadata);

    /// Dismiss any win/over overlay.
    fn continue_game(&mut self);
}

/// Stores the best score across games.
pub trait ScoreManager {
    /// Current best score.
    fn get(&self) -> u64;

    /// Replace the best score.
    fn set(&mut self, score: u64);
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn actuate(&mut self, grid: &Grid, metadata: &Metadata) {
        (**self).actuate(grid, metadata)
    }

    fn continue_game(&mut self) {
        (**self).continue_game()
    }
}

impl<T: ScoreManager + ?Sized> ScoreManager for &mut T {
    fn get(&self) -> u64 {
        (**self).get()
    }

    fn set(&mut self, score: u64) {
        (**self).set(score)
    }
}

/// Actuator that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullActuator;

impl Actuator for NullActuator {
    fn actuate(&mut self, _grid: &Grid, _metadata: &Metadata) {}

    fn continue_game(&mut self) {}
}

/// Actuator that keeps every frame it receives.
#[derive(Clone, Debug, Default)]
pub struct RecordingActuator {
    /// Frames in actuation order.
    pub frames: Vec<(Grid, Metadata)>,
    /// Number of `continue_game` calls.
    pub continues: usize,
}

impl RecordingActuator {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&(Grid, Metadata)> {
        self.frames.last()
    }

    /// Number of actuations.
    #[must_use]
    pub fn actuations(&self) -> usize {
        self.frames.len()
    }
}

impl Actuator for RecordingActuator {
    fn actuate(&mut self, grid: &Grid, metadata: &Metadata) {
        self.frames.push((grid.clone(), *metadata));
    }

    fn continue_game(&mut self) {
        self.continues += 1;
    }
}

/// Best score held in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryScoreManager {
    best: u64,
    /// Number of `set` calls.
    pub writes: usize,
}

impl MemoryScoreManager {
    /// Start from an existing best score.
    #[must_use]
    pub fn with_best(best: u64) -> Self {
        Self { best, writes: 0 }
    }
}

impl ScoreManager for MemoryScoreManager {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
        self.writes += 1;
    }
}

//! The game state machine.
//!
//! `GameManager` owns the grid, the score/flags and the RNG, and sequences
//! each turn:
//!
//! 1. Reject the move if the game is terminated.
//! 2. Slide and merge tiles.
//! 3. If anything moved: spawn one tile, check for game over, actuate.
//!
//! Moves that change nothing are absorbed silently: no spawn, no actuation.
//!
//! ## Collaborators
//!
//! The manager registers one input handler per event kind when it is built and
//! unregisters them when dropped. Events are processed one at a time through
//! `pump_input` or `handle`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::GameConfig;
use crate::core::error::ConfigError;
use crate::core::position::{Direction, Position};
use crate::core::rng::{GameRng, GameRngState};
use crate::core::state::{GameState, GameStatus};
use crate::engine::{add_easy_tile, add_random_tile, moves_available, slide_tiles, MoveOutcome};
use crate::grid::Grid;
use crate::io::{
    Actuator, EventKind, HandlerId, InputEvent, InputManager, MemoryScoreManager, Metadata,
    NullActuator, QueuedInput, ScoreManager,
};

/// Everything an observer needs to redraw or inspect the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub state: GameState,
    pub best_score: u64,
    pub terminated: bool,
    /// RNG position, so a resumed game continues the same random stream.
    pub rng: GameRngState,
}

/// A manager wired to in-memory collaborators.
pub type HeadlessGame = GameManager<QueuedInput, NullActuator, MemoryScoreManager>;

/// Turn sequencer for one board.
pub struct GameManager<I, A, S>
where
    I: InputManager,
    A: Actuator,
    S: ScoreManager,
{
    config: GameConfig,
    grid: Grid,
    state: GameState,
    rng: GameRng,
    input: I,
    actuator: A,
    scores: S,
    handlers: Vec<HandlerId>,
}

impl HeadlessGame {
    /// Build a game with a queued input, no actuation and an in-memory best score.
    pub fn headless(config: GameConfig) -> Result<Self, ConfigError> {
        Self::new(config, QueuedInput::new(), NullActuator, MemoryScoreManager::default())
    }
}

impl<I, A, S> GameManager<I, A, S>
where
    I: InputManager,
    A: Actuator,
    S: ScoreManager,
{
    /// Validate the config, register input handlers and set up the first game.
    pub fn new(config: GameConfig, mut input: I, actuator: A, scores: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let handlers = EventKind::ALL.iter().map(|&kind| input.on(kind)).collect();

        let mut manager = Self {
            grid: Grid::new(config.size),
            state: GameState::new(),
            rng: GameRng::new(config.seed),
            config,
            input,
            actuator,
            scores,
            handlers,
        };
        manager.setup();
        Ok(manager)
    }

    /// Continue a saved game instead of setting up a new one.
    ///
    /// The snapshot's `best_score` is informational; the score store stays the
    /// authority. The restored board is actuated once. A board whose storage
    /// breaks the grid invariants is rejected with `ConfigError::CorruptGrid`.
    pub fn resume(
        config: GameConfig,
        snapshot: GameSnapshot,
        mut input: I,
        actuator: A,
        scores: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if snapshot.grid.size() != config.size {
            return Err(ConfigError::SizeMismatch {
                expected: config.size,
                found: snapshot.grid.size(),
            });
        }
        snapshot.grid.validate()?;

        let handlers = EventKind::ALL.iter().map(|&kind| input.on(kind)).collect();

        let mut manager = Self {
            grid: snapshot.grid,
            state: snapshot.state,
            rng: GameRng::from_state(&snapshot.rng),
            config,
            input,
            actuator,
            scores,
            handlers,
        };
        debug!(score = manager.state.score, "game resumed");
        manager.actuate();
        Ok(manager)
    }

    // === Accessors ===

    /// The configuration this game was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current score and flags.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Derived status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    /// Input source, e.g. to queue events.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Actuation sink.
    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Best-score store.
    #[must_use]
    pub fn scores(&self) -> &S {
        &self.scores
    }

    /// RNG checkpoint.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Is the game over, or won without the player choosing to continue?
    #[must_use]
    pub fn is_game_terminated(&self) -> bool {
        self.state.is_terminated()
    }

    /// Can any move still change the board?
    #[must_use]
    pub fn moves_available(&self) -> bool {
        moves_available(&self.grid)
    }

    // === Lifecycle ===

    /// Dismiss overlays and start a new game.
    pub fn restart(&mut self) {
        debug!(score = self.state.score, "restarting game");
        self.actuator.continue_game();
        self.setup();
    }

    /// Continue after a win. Score and board are kept.
    pub fn keep_playing(&mut self) {
        self.state.keep_playing = true;
        self.actuator.continue_game();
    }

    /// Fresh board and state, start tiles, first actuation.
    pub fn setup(&mut self) {
        self.grid = Grid::new(self.config.size);
        self.state = GameState::new();

        for _ in 0..self.config.start_tiles {
            add_random_tile(&mut self.grid, &mut self.rng);
        }

        debug!(size = self.config.size, tiles = self.grid.tile_count(), "game set up");
        self.actuate();
    }

    /// Spawn one tile with the main heuristic. No-op on a full board.
    pub fn add_random_tile(&mut self) -> Option<Position> {
        add_random_tile(&mut self.grid, &mut self.rng)
    }

    /// Spawn one tile with the neighbour-echo heuristic. No-op on a full board.
    pub fn add_easy_tile(&mut self) -> Option<Position> {
        add_easy_tile(&mut self.grid, &mut self.rng)
    }

    // === Turns ===

    /// Play one move.
    ///
    /// Ignored (default outcome) when the game is terminated.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        if self.is_game_terminated() {
            debug!(%direction, "ignoring move on terminated game");
            return MoveOutcome::default();
        }

        let outcome = slide_tiles(&mut self.grid, &mut self.state, &mut self.rng, direction);

        if outcome.moved {
            self.add_random_tile();

            if !self.moves_available() {
                self.state.over = true;
                debug!(score = self.state.score, "game over");
            }
            if outcome.won {
                debug!(score = self.state.score, "winning tile created");
            }

            self.actuate();
        }

        debug!(
            %direction,
            moved = outcome.moved,
            merges = outcome.merges.len(),
            points = outcome.points,
            "move processed"
        );
        outcome
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(direction) => {
                self.move_tiles(direction);
            }
            InputEvent::Restart => self.restart(),
            InputEvent::KeepPlaying => self.keep_playing(),
        }
    }

    /// Drain the input source, handling each event in order.
    ///
    /// Returns the number of events handled.
    pub fn pump_input(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.input.next_event() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    // === Output ===

    /// Current state as pushed to the actuator.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            grid: self.grid.clone(),
            state: self.state.clone(),
            best_score: self.scores.get(),
            terminated: self.is_game_terminated(),
            rng: self.rng.state(),
        }
    }

    fn actuate(&mut self) {
        if self.scores.get() < self.state.score {
            self.scores.set(self.state.score);
        }

        let metadata = Metadata {
            score: self.state.score,
            over: self.state.over,
            won: self.state.won,
            best_score: self.scores.get(),
            terminated: self.is_game_terminated(),
        };
        self.actuator.actuate(&self.grid, &metadata);
    }
}

impl<I, A, S> Drop for GameManager<I, A, S>
where
    I: InputManager,
    A: Actuator,
    S: ScoreManager,
{
    fn drop(&mut self) {
        for handler in self.handlers.drain(..) {
            self.input.off(handler);
        }
    }
}

impl<I, A, S> std::fmt::Debug for GameManager<I, A, S>
where
    I: InputManager,
    A: Actuator,
    S: ScoreManager,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameManager")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_spawns_start_tiles() {
        let game = GameManager::headless(GameConfig::new().with_seed(1)).unwrap();
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GameManager::headless(GameConfig::new().with_size(0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSize { size: 0, .. }));
    }

    #[test]
    fn test_handlers_registered() {
        let mut game = GameManager::headless(GameConfig::new()).unwrap();
        for kind in EventKind::ALL {
            assert!(game.input_mut().is_registered(kind));
        }
        assert_eq!(game.input_mut().handler_count(), 3);
    }

    #[test]
    fn test_keep_playing_unterminates_win() {
        let mut game = GameManager::headless(GameConfig::new()).unwrap();
        game.state.won = true;
        assert!(game.is_game_terminated());
        assert_eq!(game.move_tiles(Direction::Left), MoveOutcome::default());

        game.keep_playing();
        assert!(!game.is_game_terminated());
        assert!(game.state().won);
    }

    #[test]
    fn test_restart_resets_state() {
        let mut game = GameManager::headless(GameConfig::new().with_seed(3)).unwrap();
        game.state.score = 500;
        game.state.over = true;

        game.restart();
        assert_eq!(game.state(), &GameState::new());
        assert_eq!(game.grid().tile_count(), 2);
    }

    #[test]
    fn test_snapshot_matches_state() {
        let game = GameManager::headless(GameConfig::new().with_seed(4)).unwrap();
        let snapshot = game.snapshot();
        assert_eq!(&snapshot.grid, game.grid());
        assert_eq!(&snapshot.state, game.state());
        assert!(!snapshot.terminated);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}

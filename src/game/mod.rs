//! Game state machine.
//!
//! `GameManager` ties the engine to its collaborators: it owns the board,
//! state and RNG, reacts to `move`, `restart` and `keep_playing`, and pushes
//! every visible change to the actuator.

mod manager;

pub use manager::{GameManager, GameSnapshot, HeadlessGame};

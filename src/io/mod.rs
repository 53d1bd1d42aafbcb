//! Collaborator seams: input source, actuation sink, best-score store.
//!
//! The game manager only talks to these traits. The in-memory implementations
//! (`QueuedInput`, `RecordingActuator`, `NullActuator`, `MemoryScoreManager`)
//! cover tests and headless embedding.

pub mod input;
pub mod actuator;

pub use input::{EventKind, HandlerId, InputEvent, InputManager, QueuedInput};
pub use actuator::{Actuator, MemoryScoreManager, Metadata, NullActuator, RecordingActuator, ScoreManager};

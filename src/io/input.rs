//! Input events and handler registration.
//!
//! An `InputManager` is the source of player intent. Consumers register a
//! handler per event kind and receive only events for kinds they registered.
//! Events of unregistered kinds are dropped.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::position::Direction;

/// An event delivered to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Slide all tiles.
    Move(Direction),
    /// Start a new game.
    Restart,
    /// Continue after winning.
    KeepPlaying,
}

impl InputEvent {
    /// The kind used for handler lookup.
    #[must_use]
    pub const fn kind(self) -> EventKind {
        match self {
            InputEvent::Move(_) => EventKind::Move,
            InputEvent::Restart => EventKind::Restart,
            InputEvent::KeepPlaying => EventKind::KeepPlaying,
        }
    }
}

/// Event kinds handlers can register for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Move,
    Restart,
    KeepPlaying,
}

impl EventKind {
    /// All kinds.
    pub const ALL: [EventKind; 3] = [EventKind::Move, EventKind::Restart, EventKind::KeepPlaying];
}

/// Handle returned by `InputManager::on`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(pub u32);

impl std::fmt::Display for HandlerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handler({})", self.0)
    }
}

/// Source of input events.
pub trait InputManager {
    /// Register interest in a kind of event.
    fn on(&mut self, kind: EventKind) -> HandlerId;

    /// Drop a registration. Unknown handles are ignored.
    fn off(&mut self, handler: HandlerId);

    /// Next event for a registered kind, if any.
    fn next_event(&mut self) -> Option<InputEvent>;
}

impl<T: InputManager + ?Sized> InputManager for &mut T {
    fn on(&mut self, kind: EventKind) -> HandlerId {
        (**self).on(kind)
    }

    fn off(&mut self, handler: HandlerId) {
        (**self).off(handler)
    }

    fn next_event(&mut self) -> Option<InputEvent> {
        (**self).next_event()
    }
}

/// In-memory input queue.
///
/// ```
/// use delirium::core::Direction;
/// use delirium::io::{EventKind, InputEvent, InputManager, QueuedInput};
///
/// let mut input = QueuedInput::new();
/// let handler = input.on(EventKind::Move);
///
/// input.push(InputEvent::Restart);
/// input.push(InputEvent::Move(Direction::Left));
///
/// // Restart has no handler and is dropped
/// assert_eq!(input.next_event(), Some(InputEvent::Move(Direction::Left)));
///
/// input.off(handler);
/// input.push(InputEvent::Move(Direction::Up));
/// assert_eq!(input.next_event(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct QueuedInput {
    pending: VecDeque<InputEvent>,
    handlers: FxHashMap<HandlerId, EventKind>,
    next_id: u32,
}

impl QueuedInput {
    /// Create an empty queue with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    pub fn push(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Queue several events in order.
    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.pending.extend(events);
    }

    /// Events not yet delivered.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Is any handler registered for `kind`?
    #[must_use]
    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.handlers.values().any(|&k| k == kind)
    }

    /// Number of live registrations.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl InputManager for QueuedInput {
    fn on(&mut self, kind: EventKind) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.insert(id, kind);
        id
    }

    fn off(&mut self, handler: HandlerId) {
        self.handlers.remove(&handler);
    }

    fn next_event(&mut self) -> Option<InputEvent> {
        while let Some(event) = self.pending.pop_front() {
            if self.is_registered(event.kind()) {
                return Some(event);
            }
            warn!(?event, "dropping input event without a handler");
        }
        None
    }
}

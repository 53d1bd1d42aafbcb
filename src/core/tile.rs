//! Tiles: a value at a position, plus per-move bookkeeping.
//!
//! ## Per-move bookkeeping
//!
//! - `previous_position`: snapshot taken at the start of every move so a
//!   renderer can animate the slide.
//! - `merged_from`: the two tiles consumed to create this one. Set only during
//!   the move that created the tile and cleared when the next move starts.
//!   While it is set, the tile cannot take part in another merge.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::value::TileValue;

/// A value-bearing unit occupying one grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Current cell.
    pub position: Position,
    /// Current value.
    pub value: TileValue,
    /// Position at the start of the current move.
    pub previous_position: Option<Position>,
    /// The pair consumed to create this tile this move: `[moving, stationary]`.
    pub merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    /// Create a fresh tile.
    #[must_use]
    pub fn new(position: Position, value: TileValue) -> Self {
        Self {
            position,
            value,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Create a tile produced by merging `moving` into `stationary`.
    #[must_use]
    pub fn merged(position: Position, value: TileValue, moving: Tile, stationary: Tile) -> Self {
        Self {
            position,
            value,
            previous_position: None,
            merged_from: Some(Box::new([moving, stationary])),
        }
    }

    /// Was this tile created by a merge during the current move?
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }

    /// Remember the current position before a move.
    pub fn save_position(&mut self) {
        self.previous_position = Some(self.position);
    }

    /// Move the tile's logical position.
    pub fn update_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Forget merge provenance so the tile can merge again.
    pub fn clear_merge(&mut self) {
        self.merged_from = None;
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.value, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_update_position() {
        let mut tile = Tile::new(Position::new(0, 0), TileValue::number(2));
        assert_eq!(tile.previous_position, None);

        tile.save_position();
        tile.update_position(Position::new(3, 0));

        assert_eq!(tile.previous_position, Some(Position::new(0, 0)));
        assert_eq!(tile.position, Position::new(3, 0));
    }

    #[test]
    fn test_merged_provenance() {
        let a = Tile::new(Position::new(1, 0), TileValue::number(2));
        let b = Tile::new(Position::new(0, 0), TileValue::number(2));
        let mut merged = Tile::merged(Position::new(0, 0), TileValue::number(4), a.clone(), b.clone());

        assert!(merged.is_merged());
        let sources = merged.merged_from.as_deref().unwrap();
        assert_eq!(sources[0], a);
        assert_eq!(sources[1], b);

        merged.clear_merge();
        assert!(!merged.is_merged());
    }

    #[test]
    fn test_display() {
        let tile = Tile::new(Position::new(2, 1), TileValue::letter('B'));
        assert_eq!(tile.to_string(), "B@(2, 1)");
    }
}

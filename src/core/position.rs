//! Board coordinates and move directions.
//!
//! Positions are signed so that stepping off the board is representable;
//! the grid's `within_bounds` decides what is actually on it.

use serde::{Deserialize, Serialize};

/// A cell coordinate. `x` is the column, `y` the row, `(0, 0)` is top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step once along a vector.
    #[must_use]
    pub const fn offset(self, vector: Vector) -> Self {
        Self {
            x: self.x + vector.x,
            y: self.y + vector.y,
        }
    }

    /// The four orthogonal neighbours: left, up, right, down.
    #[must_use]
    pub const fn orthogonal_neighbors(self) -> [Position; 4] {
        [
            Self::new(self.x - 1, self.y),
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
        ]
    }

    /// The four diagonal neighbours.
    #[must_use]
    pub const fn diagonal_neighbors(self) -> [Position; 4] {
        [
            Self::new(self.x - 1, self.y - 1),
            Self::new(self.x - 1, self.y + 1),
            Self::new(self.x + 1, self.y - 1),
            Self::new(self.x + 1, self.y + 1),
        ]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A unit step with components in `{-1, 0, 1}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Move direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in input-code order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The unit vector tiles travel along for this direction.
    #[must_use]
    pub const fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Right => Vector::new(1, 0),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
        }
    }

    /// Decode the numeric input code (`0` up, `1` right, `2` down, `3` left).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Numeric input code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_vectors() {
        assert_eq!(Direction::Up.vector(), Vector::new(0, -1));
        assert_eq!(Direction::Right.vector(), Vector::new(1, 0));
        assert_eq!(Direction::Down.vector(), Vector::new(0, 1));
        assert_eq!(Direction::Left.vector(), Vector::new(-1, 0));
    }

    #[test]
    fn test_direction_codes() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_code(direction.code()), Some(direction));
        }
        assert_eq!(Direction::from_code(4), None);
    }

    #[test]
    fn test_offset() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.offset(Direction::Left.vector()), Position::new(0, 1));
        assert_eq!(pos.offset(Direction::Down.vector()), Position::new(1, 2));
    }

    #[test]
    fn test_neighbors() {
        let pos = Position::new(0, 0);
        assert!(pos.orthogonal_neighbors().contains(&Position::new(-1, 0)));
        assert!(pos.diagonal_neighbors().contains(&Position::new(1, 1)));
    }
}

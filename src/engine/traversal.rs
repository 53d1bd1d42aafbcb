//! Cell visitation order for a move.
//!
//! Tiles are visited starting from the edge they move toward, so a sliding
//! tile always meets an occupant that has already been resolved this move.
//! One pass is then enough; no relaxation loop is needed.

use smallvec::SmallVec;

use crate::core::position::{Position, Vector};

/// Axis orders for one move. Boards up to 16 wide stay on the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Traversals {
    /// Column order.
    pub xs: SmallVec<[i32; 16]>,
    /// Row order.
    pub ys: SmallVec<[i32; 16]>,
}

impl Traversals {
    /// Every cell in visitation order: columns outer, rows inner.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.xs
            .iter()
            .flat_map(move |&x| self.ys.iter().map(move |&y| Position::new(x, y)))
    }
}

/// Build the traversal for a board of `size` moving along `vector`.
///
/// Both axes run `0..size`; an axis whose component is `+1` is reversed.
///
/// ```
/// use delirium::core::Direction;
/// use delirium::engine::build_traversals;
///
/// let t = build_traversals(4, Direction::Right.vector());
/// assert_eq!(t.xs.as_slice(), &[3, 2, 1, 0]);
/// assert_eq!(t.ys.as_slice(), &[0, 1, 2, 3]);
/// ```
#[must_use]
pub fn build_traversals(size: usize, vector: Vector) -> Traversals {
    let mut xs: SmallVec<[i32; 16]> = (0..size as i32).collect();
    let mut ys: SmallVec<[i32; 16]> = (0..size as i32).collect();

    if vector.x == 1 {
        xs.reverse();
    }
    if vector.y == 1 {
        ys.reverse();
    }

    Traversals { xs, ys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::Direction;

    #[test]
    fn test_up_and_left_are_ascending() {
        for direction in [Direction::Up, Direction::Left] {
            let t = build_traversals(4, direction.vector());
            assert_eq!(t.xs.as_slice(), &[0, 1, 2, 3]);
            assert_eq!(t.ys.as_slice(), &[0, 1, 2, 3]);
        }
    }

    #[test]
    fn test_down_reverses_rows() {
        let t = build_traversals(3, Direction::Down.vector());
        assert_eq!(t.xs.as_slice(), &[0, 1, 2]);
        assert_eq!(t.ys.as_slice(), &[2, 1, 0]);
    }

    #[test]
    fn test_cells_order() {
        let t = build_traversals(2, Direction::Right.vector());
        let cells: Vec<_> = t.cells().collect();
        assert_eq!(
            cells,
            vec![
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 0),
                Position::new(0, 1),
            ]
        );
    }
}

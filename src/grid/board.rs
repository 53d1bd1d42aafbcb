//! Square board of optional tiles.
//!
//! The `Grid` is the only owner of tile placement. It supports:
//! - Availability queries (empty cells, random empty cell)
//! - Insertion, removal and movement of tiles
//! - Content lookup with bounds checking
//! - Aggregates used by the spawner (`sum`, `cell_values`)
//!
//! Cells are stored column-major: index `x * size + y`.

use serde::{Deserialize, Serialize};

use crate::core::error::GridError;
use crate::core::position::Position;
use crate::core::rng::GameRng;
use crate::core::tile::Tile;
use crate::core::value::TileValue;

/// An N×N board.
///
/// ## Usage
///
/// ```
/// use delirium::grid::Grid;
/// use delirium::core::{Position, Tile, TileValue};
///
/// let mut grid = Grid::new(4);
/// grid.insert_tile(Tile::new(Position::new(1, 2), TileValue::number(2)));
///
/// assert!(grid.cell_occupied(Position::new(1, 2)));
/// assert_eq!(grid.tile_count(), 1);
/// assert_eq!(grid.sum(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Create an empty board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from rows of values (`rows[y][x]`).
    ///
    /// ```
    /// use delirium::grid::Grid;
    /// use delirium::core::{Position, TileValue};
    ///
    /// let n = |v| Some(TileValue::number(v));
    /// let grid = Grid::from_rows(&[
    ///     vec![n(2), n(2)],
    ///     vec![None, n(-4)],
    /// ]).unwrap();
    ///
    /// assert_eq!(grid.size(), 2);
    /// assert_eq!(grid.cell_content(Position::new(1, 1)).unwrap().value, TileValue::number(-4));
    /// ```
    pub fn from_rows(rows: &[Vec<Option<TileValue>>]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut grid = Self::new(size);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: size,
                    found: row.len(),
                });
            }

            for (x, value) in row.iter().enumerate() {
                if let Some(value) = value {
                    grid.insert_tile(Tile::new(Position::new(x as i32, y as i32), *value));
                }
            }
        }

        Ok(grid)
    }

    /// Build a board from loose tiles, rejecting overlaps and strays.
    pub fn from_tiles(size: usize, tiles: impl IntoIterator<Item = Tile>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut grid = Self::new(size);
        for tile in tiles {
            grid.try_insert_tile(tile)?;
        }

        Ok(grid)
    }

    /// Check storage against the board invariants.
    ///
    /// A grid built through this API always passes; deserialized ones may not.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.size == 0 {
            return Err(GridError::Empty);
        }
        let expected = self.size * self.size;
        if self.cells.len() != expected {
            return Err(GridError::CellCount {
                size: self.size,
                expected,
                found: self.cells.len(),
            });
        }

        for (i, cell) in self.cells.iter().enumerate() {
            if let Some(tile) = cell {
                let stored = self.position_of(i);
                if tile.position != stored {
                    return Err(GridError::Misplaced {
                        claimed: tile.position,
                        stored,
                    });
                }
            }
        }

        Ok(())
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.within_bounds(position)
            .then(|| position.x as usize * self.size + position.y as usize)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new((index / self.size) as i32, (index % self.size) as i32)
    }

    // === Queries ===

    /// Is the position on the board?
    #[must_use]
    pub fn within_bounds(&self, position: Position) -> bool {
        let size = self.size as i32;
        position.x >= 0 && position.x < size && position.y >= 0 && position.y < size
    }

    /// Tile at a position. Off-board positions are empty.
    #[must_use]
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        self.index(position).and_then(|i| self.cells[i].as_ref())
    }

    /// Is the cell on the board and empty?
    ///
    /// Off-board positions are neither available nor occupied.
    #[must_use]
    pub fn cell_available(&self, position: Position) -> bool {
        self.index(position).is_some_and(|i| self.cells[i].is_none())
    }

    /// Is the cell on the board and holding a tile?
    #[must_use]
    pub fn cell_occupied(&self, position: Position) -> bool {
        self.cell_content(position).is_some()
    }

    /// Empty cells in storage order.
    #[must_use]
    pub fn available_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| self.position_of(i))
            .collect()
    }

    /// Is any cell empty?
    #[must_use]
    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// A uniformly random empty cell, or `None` on a full board.
    pub fn random_available_cell(&self, rng: &mut GameRng) -> Option<Position> {
        rng.choose(&self.available_cells()).copied()
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Iterate over the tiles in storage order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten()
    }

    /// Visit every cell, occupied or not, in storage order.
    pub fn each_cell(&self, mut visit: impl FnMut(Position, Option<&Tile>)) {
        for (i, cell) in self.cells.iter().enumerate() {
            visit(self.position_of(i), cell.as_ref());
        }
    }

    /// Visit every tile mutably.
    pub fn each_tile_mut(&mut self, mut visit: impl FnMut(&mut Tile)) {
        for tile in self.cells.iter_mut().flatten() {
            visit(tile);
        }
    }

    /// Sum of all numeric tile values. Letters contribute nothing.
    #[must_use]
    pub fn sum(&self) -> i64 {
        self.tiles()
            .map(|tile| tile.value.sum_contribution())
            .fold(0i64, i64::saturating_add)
    }

    /// Values of the occupied cells among `positions`, in the given order.
    ///
    /// Off-board and empty positions are skipped.
    #[must_use]
    pub fn cell_values(&self, positions: &[Position]) -> Vec<TileValue> {
        positions
            .iter()
            .filter_map(|&p| self.cell_content(p))
            .map(|tile| tile.value)
            .collect()
    }

    // === Mutation ===

    /// Place a tile at its own position, returning whatever was there.
    ///
    /// Panics if the tile's position is off the board. See `try_insert_tile`
    /// for the checked variant.
    pub fn insert_tile(&mut self, tile: Tile) -> Option<Tile> {
        let index = self
            .index(tile.position)
            .unwrap_or_else(|| panic!("tile {} is outside the {}x{} grid", tile, self.size, self.size));
        self.cells[index].replace(tile)
    }

    /// Place a tile in an empty on-board cell.
    pub fn try_insert_tile(&mut self, tile: Tile) -> Result<(), GridError> {
        let Some(index) = self.index(tile.position) else {
            return Err(GridError::OutOfBounds(tile.position));
        };
        if self.cells[index].is_some() {
            return Err(GridError::Occupied(tile.position));
        }
        self.cells[index] = Some(tile);
        Ok(())
    }

    /// Take the tile out of a cell.
    pub fn remove_tile(&mut self, position: Position) -> Option<Tile> {
        let index = self.index(position)?;
        self.cells[index].take()
    }

    /// Move the tile at `from` to the empty cell `to`.
    ///
    /// Returns `false` (and changes nothing) if `from` is empty, `to` is off
    /// the board, or `to` is occupied by another tile.
    pub fn move_tile(&mut self, from: Position, to: Position) -> bool {
        if from == to {
            return self.cell_occupied(from);
        }
        if !self.cell_available(to) {
            return false;
        }

        match self.remove_tile(from) {
            Some(mut tile) => {
                tile.update_position(to);
                self.insert_tile(tile);
                true
            }
            None => false,
        }
    }

    /// Values laid out as rows (`rows[y][x]`).
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Option<TileValue>>> {
        (0..self.size as i32)
            .map(|y| {
                (0..self.size as i32)
                    .map(|x| self.cell_content(Position::new(x, y)).map(|t| t.value))
                    .collect()
            })
            .collect()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(value) => format!("{:>4}", value.to_string()),
                    None => format!("{:>4}", "."),
                })
                .collect();
            writeln!(f, "{}", cells.join(""))?;
        }
        Ok(())
    }
}

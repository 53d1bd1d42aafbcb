//! Sliding and merging tiles for one move.
//!
//! ## Merge rules
//!
//! Each tile slides along the move vector until it hits the edge or another
//! tile. If that tile has not already merged this move:
//!
//! 1. **Equal values** merge into `value.successor()`. The player scores a
//!    random bonus in `[0, 2048)` plus the squared weight of the new value.
//! 2. **Opposite values** (`v` against `-v`) cancel into the letter
//!    `64 + floor(log2(|v|))`. The player scores that letter's weight.
//! 3. Otherwise the tile stops in the last empty cell.
//!
//! A tile created by a merge carries `merged_from` until the next move starts,
//! which keeps it out of any second merge in the same move.

use tracing::trace;

use crate::core::position::{Direction, Position, Vector};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::core::tile::Tile;
use crate::core::value::TileValue;
use crate::grid::Grid;

use super::traversal::build_traversals;

/// Exclusive upper bound of the random bonus added to equal-merge scores.
pub const MERGE_BONUS_RANGE: u64 = 2048;

/// Result of sliding from one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FarthestPosition {
    /// Last empty cell along the vector (the start cell if none).
    pub farthest: Position,
    /// First cell after `farthest`: occupied or off the board.
    pub next: Position,
}

/// Which rule produced a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeKind {
    /// Two equal values.
    Equal,
    /// A value and its negation.
    Inverse,
}

/// One merge performed during a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeEvent {
    /// Cell holding the merged tile.
    pub position: Position,
    /// Value of the merged tile.
    pub value: TileValue,
    /// Rule that applied.
    pub kind: MergeKind,
    /// Points scored by this merge.
    pub points: u64,
}

/// What a move did to the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// At least one tile changed cell.
    pub moved: bool,
    /// Points added to the score.
    pub points: u64,
    /// The move created a winning tile.
    pub won: bool,
    /// Merges in the order they happened.
    pub merges: Vec<MergeEvent>,
}

/// Clear merge provenance and snapshot positions before a move.
pub fn prepare_tiles(grid: &mut Grid) {
    grid.each_tile_mut(|tile| {
        tile.clear_merge();
        tile.save_position();
    });
}

/// Step from `cell` along `vector` while the next cell is on the board and empty.
#[must_use]
pub fn find_farthest_position(grid: &Grid, cell: Position, vector: Vector) -> FarthestPosition {
    let mut previous = cell;
    let mut next = cell.offset(vector);

    while grid.cell_available(next) {
        previous = next;
        next = next.offset(vector);
    }

    FarthestPosition {
        farthest: previous,
        next,
    }
}

/// Slide every tile toward `direction`, applying merges and scoring.
///
/// Updates `state.score` and `state.won`. Does not spawn or decide game over;
/// the caller does that when `moved` is set.
pub fn slide_tiles(
    grid: &mut Grid,
    state: &mut GameState,
    rng: &mut GameRng,
    direction: Direction,
) -> MoveOutcome {
    let vector = direction.vector();
    let traversals = build_traversals(grid.size(), vector);
    let mut outcome = MoveOutcome::default();

    prepare_tiles(grid);

    for cell in traversals.cells() {
        let Some(tile_value) = grid.cell_content(cell).map(|tile| tile.value) else {
            continue;
        };

        let positions = find_farthest_position(grid, cell, vector);
        let occupant = grid
            .cell_content(positions.next)
            .filter(|occupant| !occupant.is_merged())
            .map(|occupant| occupant.value);

        let merge = match occupant {
            Some(value) if value == tile_value => Some((MergeKind::Equal, value)),
            Some(value) if value.is_inverse_of(tile_value) => Some((MergeKind::Inverse, value)),
            _ => None,
        };

        let final_position = match merge {
            Some((kind, occupant_value)) => {
                let event = merge_tiles(grid, rng, cell, positions.next, kind, occupant_value);
                if let Some(event) = event {
                    state.add_score(event.points);
                    outcome.points = outcome.points.saturating_add(event.points);

                    let wins = match kind {
                        MergeKind::Equal => event.value.is_mighty_number(),
                        MergeKind::Inverse => event.value.is_mighty_letter(),
                    };
                    if wins {
                        state.won = true;
                        outcome.won = true;
                    }

                    outcome.merges.push(event);
                    positions.next
                } else {
                    cell
                }
            }
            None => {
                grid.move_tile(cell, positions.farthest);
                positions.farthest
            }
        };

        if final_position != cell {
            outcome.moved = true;
        }
    }

    outcome
}

/// Merge the tile at `from` into the tile at `to`.
///
/// Both cells are known to be occupied; `None` only if they are not.
fn merge_tiles(
    grid: &mut Grid,
    rng: &mut GameRng,
    from: Position,
    to: Position,
    kind: MergeKind,
    occupant_value: TileValue,
) -> Option<MergeEvent> {
    let (value, points) = match kind {
        MergeKind::Equal => {
            let value = occupant_value.successor();
            let bonus = rng.gen_below(MERGE_BONUS_RANGE);
            (value, bonus.saturating_add(value.weight_squared()))
        }
        MergeKind::Inverse => {
            let value = TileValue::letter_for_magnitude(occupant_value.weight());
            (value, value.weight())
        }
    };

    let mut moving = grid.remove_tile(from)?;
    let Some(stationary) = grid.remove_tile(to) else {
        grid.insert_tile(moving);
        return None;
    };

    // The consumed tile converges on the merge cell.
    moving.update_position(to);
    grid.insert_tile(Tile::merged(to, value, moving, stationary));

    trace!(?kind, %from, %to, %value, points, "merged tiles");

    Some(MergeEvent {
        position: to,
        value,
        kind,
        points,
    })
}

/// Can any move still change the board?
#[must_use]
pub fn moves_available(grid: &Grid) -> bool {
    grid.cells_available() || tile_matches_available(grid)
}

/// Is there an orthogonally adjacent pair that would merge?
#[must_use]
pub fn tile_matches_available(grid: &Grid) -> bool {
    grid.tiles().any(|tile| {
        Direction::ALL.iter().any(|direction| {
            grid.cell_content(tile.position.offset(direction.vector()))
                .is_some_and(|other| other.value.merges_with(tile.value))
        })
    })
}

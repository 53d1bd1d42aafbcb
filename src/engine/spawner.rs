//! Tile spawning heuristics.
//!
//! ## `add_random_tile`
//!
//! The main spawner layers several channels, chosen by probability rather than
//! by board analysis. With `sum` the total of all numeric tiles:
//!
//! 1. 50%: `±best`, the cheapest neighbour found by the scan below.
//! 2. Else with probability `dynamic = 50 - abs(sum / 3)`: a `smart` letter
//!    with code point `65 + abs(floor(u * sum / 10))`.
//! 3. Else 50%: `dumb`, one of `±2`, `±4`, `±3`, `±6`.
//! 4. Else a uniform pick from [`PALETTE`].
//!
//! `best` comes from a neighbour scan: up to eight random empty cells are
//! sampled and, from each, the first tile in every axis direction is
//! considered. A cheaper numeric neighbour is adopted 80% of the time. When
//! nothing beats `sum`, `best` falls back to 2 or 3. The tile lands on the
//! last sampled cell.
//!
//! ## `add_easy_tile`
//!
//! Echoes a neighbouring value: orthogonal neighbours first, diagonal ones if
//! there are none, always with `2` as an extra option.

use tracing::trace;

use crate::core::position::{Direction, Position, Vector};
use crate::core::rng::GameRng;
use crate::core::tile::Tile;
use crate::core::value::TileValue;
use crate::grid::Grid;

/// Fixed spawn palette.
pub const PALETTE: [i64; 9] = [2, 3, -2, -3, 4, 6, -4, -6, 0];

/// Random empty cells sampled by the neighbour scan.
pub const SCAN_SAMPLES: usize = 8;

/// Chance of adopting a cheaper neighbour when one is seen.
pub const NEIGHBOR_ACCEPT: f64 = 0.8;

/// Scan directions, in the order they are probed.
const SCAN_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// First code point of smart letters (`'A'`).
const SMART_BASE: f64 = 65.0;

/// Which channel produced a spawned value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnChannel {
    /// `±best` from the neighbour scan.
    Neighbor,
    /// Sum-derived letter.
    Smart,
    /// Small signed power-of-two multiple of 2 or 3.
    Dumb,
    /// Uniform palette pick.
    Palette,
}

/// A tile about to be spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnPlan {
    /// Target cell (always empty).
    pub position: Position,
    /// Value of the new tile.
    pub value: TileValue,
    /// Channel that produced `value`.
    pub channel: SpawnChannel,
}

/// Probability weight of the smart channel: `50 - |sum / 3|`.
///
/// Not clamped. Values above 1 always pick the smart letter, values at or
/// below 0 never do.
#[must_use]
pub fn dynamic_probability(sum: i64) -> f64 {
    50.0 - (sum as f64 / 3.0).abs()
}

/// Uniform pick from [`PALETTE`].
pub fn palette_value(rng: &mut GameRng) -> TileValue {
    let index = rng.gen_range_usize(0..PALETTE.len());
    TileValue::number(PALETTE[index])
}

/// Letter whose code point grows with the magnitude of `sum`.
///
/// Code points past the single-byte range are capped.
pub fn smart_letter(rng: &mut GameRng, sum: i64) -> TileValue {
    let offset = (rng.gen_unit() * sum as f64 / 10.0).floor().abs();
    let code = (SMART_BASE + offset).min(f64::from(u8::MAX));
    TileValue::Letter(code as u8)
}

/// Base 2 or 3 (50/50), sign (50/50), doubled 10% of the time.
pub fn dumb_value(rng: &mut GameRng) -> TileValue {
    let base: i64 = if rng.gen_bool(0.5) { 2 } else { 3 };
    let sign: i64 = if rng.gen_bool(0.5) { 1 } else { -1 };
    let scale: i64 = if rng.gen_bool(0.9) { 1 } else { 2 };
    TileValue::number(sign * base * scale)
}

/// First tile met walking from `origin` along `step`, skipping empty cells.
///
/// `origin` itself is not inspected. Returns `None` at the board edge.
#[must_use]
pub fn scan_direction(grid: &Grid, origin: Position, step: Vector) -> Option<(Position, TileValue)> {
    let mut cursor = origin.offset(step);
    while grid.within_bounds(cursor) {
        if let Some(tile) = grid.cell_content(cursor) {
            return Some((cursor, tile.value));
        }
        cursor = cursor.offset(step);
    }
    None
}

/// Run the neighbour scan. Returns the last sampled cell and `best`.
///
/// `None` only on a full board.
pub fn neighbor_scan(grid: &Grid, rng: &mut GameRng, sum: i64) -> Option<(Position, i64)> {
    let mut best = sum;
    let mut cell = None;

    for _ in 0..SCAN_SAMPLES {
        let candidate = grid.random_available_cell(rng)?;
        cell = Some(candidate);

        for direction in SCAN_DIRECTIONS {
            if let Some((_, value)) = scan_direction(grid, candidate, direction.vector()) {
                let accept = rng.gen_bool(NEIGHBOR_ACCEPT);
                // Letters never count as cheaper.
                if let Some(n) = value.as_number() {
                    if accept && n < best {
                        best = n;
                    }
                }
            }
        }

        if best == sum {
            best = if rng.gen_bool(0.5) { 2 } else { 3 };
        }
    }

    cell.map(|position| (position, best))
}

/// Decide where and what `add_random_tile` would spawn.
pub fn plan_random_tile(grid: &Grid, rng: &mut GameRng) -> Option<SpawnPlan> {
    if !grid.cells_available() {
        return None;
    }

    let sum = grid.sum();
    let (position, best) = neighbor_scan(grid, rng, sum)?;

    let (value, channel) = if rng.gen_bool(0.5) {
        let signed = if rng.gen_bool(0.5) { best } else { best.saturating_neg() };
        (TileValue::number(signed), SpawnChannel::Neighbor)
    } else if rng.gen_bool(dynamic_probability(sum)) {
        (smart_letter(rng, sum), SpawnChannel::Smart)
    } else if rng.gen_bool(0.5) {
        (dumb_value(rng), SpawnChannel::Dumb)
    } else {
        (palette_value(rng), SpawnChannel::Palette)
    };

    Some(SpawnPlan {
        position,
        value,
        channel,
    })
}

/// Spawn one tile with the layered heuristic. No-op on a full board.
///
/// Returns the cell that received the tile.
pub fn add_random_tile(grid: &mut Grid, rng: &mut GameRng) -> Option<Position> {
    let plan = plan_random_tile(grid, rng)?;
    trace!(position = %plan.position, value = %plan.value, channel = ?plan.channel, "spawned tile");
    grid.insert_tile(Tile::new(plan.position, plan.value));
    Some(plan.position)
}

/// Spawn one tile echoing a neighbour's value. No-op on a full board.
///
/// Returns the cell that received the tile.
pub fn add_easy_tile(grid: &mut Grid, rng: &mut GameRng) -> Option<Position> {
    let cell = grid.random_available_cell(rng)?;

    let mut values = grid.cell_values(&cell.orthogonal_neighbors());
    if values.is_empty() {
        values = grid.cell_values(&cell.diagonal_neighbors());
    }
    values.push(TileValue::number(2));

    let value = rng.choose(&values).copied().unwrap_or(TileValue::number(2));
    trace!(position = %cell, %value, "spawned easy tile");
    grid.insert_tile(Tile::new(cell, value));
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Option<TileValue> {
        Some(TileValue::number(v))
    }

    #[test]
    fn test_dynamic_probability() {
        assert_eq!(dynamic_probability(0), 50.0);
        assert_eq!(dynamic_probability(30), 40.0);
        assert_eq!(dynamic_probability(-30), 40.0);
        assert_eq!(dynamic_probability(150), 0.0);
        assert!(dynamic_probability(300) < 0.0);
    }

    #[test]
    fn test_palette_value_in_palette() {
        let mut rng = GameRng::new(1);
        for _ in 0..200 {
            let value = palette_value(&mut rng).as_number().unwrap();
            assert!(PALETTE.contains(&value));
        }
    }

    #[test]
    fn test_dumb_value_range() {
        let mut rng = GameRng::new(2);
        for _ in 0..500 {
            let value = dumb_value(&mut rng).as_number().unwrap();
            assert!([2, 4, 3, 6, -2, -4, -3, -6].contains(&value));
        }
    }

    #[test]
    fn test_dumb_value_prefers_small_magnitude() {
        let mut rng = GameRng::new(3);
        let draws = 5000;
        let doubled = (0..draws)
            .filter(|_| {
                let v = dumb_value(&mut rng).as_number().unwrap().abs();
                v == 4 || v == 6
            })
            .count();
        // Expected 10%
        assert!(doubled > draws / 20 && doubled < draws / 5);
    }

    #[test]
    fn test_smart_letter() {
        let mut rng = GameRng::new(4);
        // Zero sum always yields 'A'
        for _ in 0..50 {
            assert_eq!(smart_letter(&mut rng, 0), TileValue::letter('A'));
        }
        // Small sums stay within 'A'..='B'
        for _ in 0..50 {
            let code = match smart_letter(&mut rng, 19) {
                TileValue::Letter(c) => c,
                other => panic!("expected letter, got {:?}", other),
            };
            assert!((b'A'..=b'B').contains(&code));
        }
        // Huge sums cap at u8::MAX
        for _ in 0..50 {
            assert_eq!(smart_letter(&mut rng, i64::MAX), TileValue::Letter(u8::MAX));
        }
    }

    #[test]
    fn test_scan_direction() {
        let grid = Grid::from_rows(&[
            vec![None, None, None, n(8)],
            vec![None, None, None, None],
            vec![n(-2), None, None, None],
            vec![None, None, None, None],
        ])
        .unwrap();

        let origin = Position::new(0, 0);
        assert_eq!(
            scan_direction(&grid, origin, Direction::Right.vector()),
            Some((Position::new(3, 0), TileValue::number(8)))
        );
        assert_eq!(
            scan_direction(&grid, origin, Direction::Down.vector()),
            Some((Position::new(0, 2), TileValue::number(-2)))
        );
        assert_eq!(scan_direction(&grid, origin, Direction::Left.vector()), None);
        assert_eq!(scan_direction(&grid, origin, Direction::Up.vector()), None);
    }

    #[test]
    fn test_neighbor_scan_empty_board_falls_back() {
        let grid = Grid::new(4);
        let mut rng = GameRng::new(5);
        for _ in 0..20 {
            let (position, best) = neighbor_scan(&grid, &mut rng, 0).unwrap();
            assert!(grid.cell_available(position));
            assert!(best == 2 || best == 3);
        }
    }

    #[test]
    fn test_neighbor_scan_finds_cheap_neighbor() {
        // Single empty cell surrounded by a very negative tile
        let grid = Grid::from_rows(&[
            vec![None, n(-64)],
            vec![n(2), n(2)],
        ])
        .unwrap();
        let mut rng = GameRng::new(6);
        let sum = grid.sum();

        let mut found = false;
        for _ in 0..20 {
            let (position, best) = neighbor_scan(&grid, &mut rng, sum).unwrap();
            assert_eq!(position, Position::new(0, 0));
            if best == -64 {
                found = true;
            }
        }
        assert!(found);
    }

    #[test]
    fn test_add_random_tile_full_board_is_noop() {
        let mut grid = Grid::from_rows(&[vec![n(2), n(3)], vec![n(4), n(6)]]).unwrap();
        let before = grid.clone();
        let mut rng = GameRng::new(7);

        assert_eq!(add_random_tile(&mut grid, &mut rng), None);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_add_random_tile_fills_empty_cell() {
        let mut grid = Grid::new(4);
        let mut rng = GameRng::new(8);

        for expected in 1..=16 {
            let position = add_random_tile(&mut grid, &mut rng).unwrap();
            assert!(grid.cell_occupied(position));
            assert_eq!(grid.tile_count(), expected);
        }
        assert!(add_random_tile(&mut grid, &mut rng).is_none());
    }

    #[test]
    fn test_plan_uses_every_channel() {
        let grid = Grid::new(4);
        let mut rng = GameRng::new(9);
        let mut seen = Vec::new();

        for _ in 0..400 {
            let plan = plan_random_tile(&grid, &mut rng).unwrap();
            if !seen.contains(&plan.channel) {
                seen.push(plan.channel);
            }
        }

        // Sum 0 makes dynamic 50: the smart letter always wins the second draw.
        assert!(seen.contains(&SpawnChannel::Neighbor));
        assert!(seen.contains(&SpawnChannel::Smart));
        assert!(!seen.contains(&SpawnChannel::Dumb));
        assert!(!seen.contains(&SpawnChannel::Palette));
    }

    #[test]
    fn test_plan_large_sum_disables_smart() {
        let grid = Grid::from_rows(&[
            vec![n(512), None, None, None],
            vec![None; 4],
            vec![None; 4],
            vec![None; 4],
        ])
        .unwrap();
        let mut rng = GameRng::new(10);
        let mut counts = [0usize; 4];

        for _ in 0..2000 {
            let index = match plan_random_tile(&grid, &mut rng).unwrap().channel {
                SpawnChannel::Neighbor => 0,
                SpawnChannel::Smart => 1,
                SpawnChannel::Dumb => 2,
                SpawnChannel::Palette => 3,
            };
            counts[index] += 1;
        }

        let [neighbor, smart, dumb, palette] = counts;
        assert_eq!(smart, 0);
        assert!(neighbor > 900 && neighbor < 1100, "neighbor = {neighbor}");
        assert!(dumb > 400 && dumb < 600, "dumb = {dumb}");
        assert!(palette > 400 && palette < 600, "palette = {palette}");
    }

    #[test]
    fn test_add_easy_tile_isolated_is_two() {
        let mut grid = Grid::new(4);
        let mut rng = GameRng::new(11);
        let position = add_easy_tile(&mut grid, &mut rng).unwrap();
        assert_eq!(grid.cell_content(position).unwrap().value, TileValue::number(2));
    }

    #[test]
    fn test_add_easy_tile_echoes_neighbor() {
        // Only (1, 1) is free; its orthogonal neighbours hold 5, 6 and -3
        let mut grid = Grid::from_rows(&[
            vec![n(5), n(6), n(5)],
            vec![n(5), None, n(-3)],
            vec![n(5), n(6), n(5)],
        ])
        .unwrap();
        let mut rng = GameRng::new(12);

        let position = add_easy_tile(&mut grid, &mut rng).unwrap();
        assert_eq!(position, Position::new(1, 1));
        let value = grid.cell_content(position).unwrap().value.as_number().unwrap();
        assert!([5, 6, -3, 2].contains(&value));
    }

    #[test]
    fn test_add_easy_tile_diagonal_fallback() {
        // Only diagonal neighbours of (1, 1) are occupied
        let grid = Grid::from_rows(&[
            vec![n(9), None, n(9)],
            vec![None, None, None],
            vec![n(9), None, n(9)],
        ])
        .unwrap();

        let mut rng = GameRng::new(13);
        let mut saw_diagonal = false;
        for _ in 0..30 {
            let mut attempt = grid.clone();
            let position = add_easy_tile(&mut attempt, &mut rng).unwrap();
            let value = attempt.cell_content(position).unwrap().value.as_number().unwrap();
            assert!(value == 9 || value == 2);
            if value == 9 {
                saw_diagonal = true;
            }
        }
        assert!(saw_diagonal);
    }
}

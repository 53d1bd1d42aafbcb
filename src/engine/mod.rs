//! Move, merge and spawn rules.
//!
//! ## Key Types
//!
//! - `Traversals`: cell visitation order for a direction
//! - `MoveOutcome`: what one slide did (moved, points, merges, win)
//! - `SpawnPlan`: where and what the spawner places
//!
//! The functions here operate on a borrowed `Grid`, `GameState` and `GameRng`;
//! sequencing them into turns is the game manager's job.

pub mod traversal;
pub mod slide;
pub mod spawner;

pub use traversal::{build_traversals, Traversals};
pub use slide::{
    find_farthest_position, moves_available, prepare_tiles, slide_tiles, tile_matches_available,
    FarthestPosition, MergeEvent, MergeKind, MoveOutcome, MERGE_BONUS_RANGE,
};
pub use spawner::{
    add_easy_tile, add_random_tile, dynamic_probability, plan_random_tile, SpawnChannel, SpawnPlan,
};

//! Board storage.
//!
//! ## Key Types
//!
//! - `Grid`: N×N matrix of optional tiles with availability queries,
//!   insertion/removal, bounds checking and the aggregates the spawner needs

pub mod board;

pub use board::Grid;

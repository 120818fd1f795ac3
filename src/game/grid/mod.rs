//! Occupancy grid.

pub mod grid;

pub use grid::*;

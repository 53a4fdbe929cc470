//! Spatial data structures for connector puzzles
//!
//! This module contains:
//! - Compass directions and side indexing
//! - Tiles with four connectible sides
//! - The rectangular grid and its neighbour queries

/// Compass directions and side indexing
pub mod direction;
/// Rectangular tile grid and neighbour-aware predicates
pub mod grid;
/// Connector tiles, rotation and shape classification
pub mod tiles;

pub use direction::Direction;
pub use grid::{Grid, Position};
pub use tiles::{Shape, Tile};

//! Solver for rotation-based connector puzzles
//!
//! Every cell of a rectangular grid holds a tile with a connector on any of
//! its four sides. Tiles may only be rotated. A grid is solved when every
//! connector meets a connector on the neighbouring tile and nothing points
//! off the edge.
//!
//! Solving runs in two phases: propagation settles tiles whose rotation is
//! forced by their neighbours, then a depth-first search tries the rotations
//! of whatever is left.

#![forbid(unsafe_code)]

/// Rotation deduction, search and solve orchestration
pub mod algorithm;
/// Puzzle files, command line and error handling
pub mod io;
/// Directions, tiles and the grid
pub mod spatial;

pub use algorithm::executor::{Solver, SolverConfig, solve};
pub use io::error::{Result, SolverError};
pub use spatial::{Direction, Grid, Position, Tile};

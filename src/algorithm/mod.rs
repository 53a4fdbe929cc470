/// Depth-first rotation search over unresolved tiles
pub mod backtracking;
/// Observer notifications emitted during a solve
pub mod events;
/// Solve orchestration and statistics
pub mod executor;
/// Single-tile rotation deduction and the propagation worklist
pub mod propagation;
/// Edge-matching checks for single tiles and whole grids
pub mod verification;

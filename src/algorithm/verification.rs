//! Edge-matching predicates that decide whether tiles fit together
//!
//! Both checks treat the grid boundary as a side that never connects. The
//! strict check compares against every neighbour; the relaxed check ignores
//! neighbours that are not solved yet.

use crate::spatial::direction::Direction;
use crate::spatial::grid::{Grid, Position};

/// Check whether the tile at `position` matches every neighbour and the boundary
///
/// Solved flags are ignored: each side must equal the facing side of the
/// neighbour, and sides on the boundary must be empty.
pub fn fits_current_state(grid: &Grid, position: Position) -> bool {
    fits(grid, position, false)
}

/// Check whether the tile at `position` matches its solved neighbours and the boundary
pub fn fits_solved_neighbours(grid: &Grid, position: Position) -> bool {
    fits(grid, position, true)
}

fn fits(grid: &Grid, position: Position, solved_only: bool) -> bool {
    let Some(tile) = grid.get(position) else {
        return false;
    };

    Direction::ALL.into_iter().all(|direction| {
        let connectible = tile.side(direction);
        match grid.neighbour(position, direction) {
            None => !connectible,
            Some(neighbour) if solved_only && !neighbour.is_solved() => true,
            Some(neighbour) => neighbour.side(direction.opposite()) == connectible,
        }
    })
}

/// First tile in row-major order that doesn't fit
pub fn find_misfit(grid: &Grid) -> Option<Position> {
    grid.positions()
        .find(|&position| !fits_current_state(grid, position))
}

/// Check whether every tile fits every neighbour
pub fn all_fit(grid: &Grid) -> bool {
    find_misfit(grid).is_none()
}

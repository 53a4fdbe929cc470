//! State-change notifications emitted while a grid is being solved
//!
//! Rendering front ends subscribe by passing a [`SolveObserver`] to the
//! solver. Observers only watch; they cannot influence which tile is
//! examined next.

use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::Tile;

/// Stage of a solve run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Deterministic single-tile deductions
    Propagation,
    /// Exhaustive rotation search over the remaining tiles
    Backtracking,
    /// Full-grid check that decides whether the puzzle is solved
    Verification,
}

/// Something observable that happened during a solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveEvent {
    /// A new phase began, or a phase resumed after the verifier rejected the grid
    PhaseStarted(Phase),
    /// A tile's sides or solved flag changed
    TileChanged {
        /// Where the tile sits
        position: Position,
        /// The tile's new state
        tile: Tile,
    },
    /// The solver moved on to a different tile, or to none
    WorkingTile(Option<Position>),
    /// The solver is inspecting a tile on behalf of the working tile, or none
    CheckingTile(Option<Position>),
    /// The solve run returned
    Finished {
        /// Whether every tile ended up fitting
        solved: bool,
    },
}

/// Receiver of solve notifications
pub trait SolveObserver {
    /// Handle one event; `grid` reflects the state right after the event
    fn on_event(&mut self, grid: &Grid, event: SolveEvent);
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SolveObserver for NoopObserver {
    fn on_event(&mut self, _grid: &Grid, _event: SolveEvent) {}
}

impl<F> SolveObserver for F
where
    F: FnMut(&Grid, SolveEvent),
{
    fn on_event(&mut self, grid: &Grid, event: SolveEvent) {
        self(grid, event);
    }
}

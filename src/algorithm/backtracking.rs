//! Depth-first rotation search for tiles propagation could not settle
//!
//! Tiles are tried one at a time in the order given. Each unsolved tile is
//! turned clockwise up to four times; an orientation that clashes with an
//! already solved neighbour or the boundary is skipped, otherwise the whole
//! grid is verified and the search descends into the remaining tiles. A tile
//! whose orientations are exhausted is restored before returning, so a
//! failed search leaves the grid as it found it.

use tracing::trace;

use crate::algorithm::verification::fits_solved_neighbours;
use crate::spatial::direction::SIDES;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::Tile;

/// Operations the search needs from whatever owns the grid
pub trait SearchHost {
    /// Current grid state
    fn grid(&self) -> &Grid;

    /// Turn the tile at a row-major index a quarter clockwise
    fn rotate_clockwise(&mut self, index: usize);

    /// Put back a tile saved before it was tried
    fn restore(&mut self, index: usize, tile: Tile);

    /// Run the full-grid verifier, which marks every tile solved on success
    fn verify(&mut self) -> bool;

    /// Note that the search is now working on a tile
    fn visit(&mut self, _index: usize) {}
}

/// Rotation search over an ordered set of unresolved tiles
#[derive(Debug)]
pub struct Backtracker {
    residual: Vec<usize>,
    max_nodes: Option<usize>,
    nodes: usize,
    exhausted: bool,
}

impl Backtracker {
    /// Create a search over the given row-major tile indices
    ///
    /// `max_nodes` caps the number of search nodes visited; `None` searches
    /// exhaustively.
    pub const fn new(residual: Vec<usize>, max_nodes: Option<usize>) -> Self {
        Self {
            residual,
            max_nodes,
            nodes: 0,
            exhausted: false,
        }
    }

    /// Tiles this search works through
    pub fn residual(&self) -> &[usize] {
        &self.residual
    }

    /// Number of search nodes visited so far
    pub const fn nodes(&self) -> usize {
        self.nodes
    }

    /// Check whether the node budget ran out
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Search for rotations under which the verifier accepts the grid
    ///
    /// Search depth is kept in an explicit frame stack, one frame per
    /// residual tile, so large residual sets never deepen the call stack.
    pub fn search<H: SearchHost>(&mut self, host: &mut H) -> bool {
        let mut frames = Vec::new();
        let mut returned = self.enter(host, &mut frames);

        loop {
            returned = match returned {
                None => self.enter(host, &mut frames),
                Some(result) if frames.is_empty() => return result,
                Some(result) => self.resume(host, &mut frames, result),
            };
        }
    }

    fn enter_node(&mut self) -> bool {
        self.nodes += 1;
        if self.max_nodes.is_some_and(|max| self.nodes > max) {
            self.exhausted = true;
        }
        !self.exhausted
    }

    /// Open the node for the tile at depth `frames.len()`
    ///
    /// Returns the node's result if it finished at once, or `None` when a
    /// child node has to be entered next.
    fn enter<H: SearchHost>(&mut self, host: &mut H, frames: &mut Vec<Frame>) -> Option<bool> {
        if !self.enter_node() {
            return Some(false);
        }

        let Some(&index) = self.residual.get(frames.len()) else {
            return Some(host.verify());
        };
        let original = host.grid().tile_at(index).copied();
        let position = host.grid().coordinates(index);
        let (Some(original), Some(position)) = (original, position) else {
            return Some(false);
        };

        if original.is_solved() {
            frames.push(Frame::Skipped);
            return None;
        }

        host.visit(index);
        frames.push(Frame::Turning {
            index,
            position,
            original,
            attempts: 0,
        });
        self.turn(host, frames)
    }

    /// Hand a finished child's result to the frame on top of the stack
    fn resume<H: SearchHost>(
        &mut self,
        host: &mut H,
        frames: &mut Vec<Frame>,
        child: bool,
    ) -> Option<bool> {
        match frames.last().copied() {
            None => Some(child),
            Some(Frame::Skipped) => {
                frames.pop();
                Some(child || (!self.exhausted && host.verify()))
            }
            Some(Frame::Turning { .. }) if child => {
                frames.pop();
                Some(true)
            }
            Some(Frame::Turning { .. }) => self.turn(host, frames),
        }
    }

    /// Try the next orientation of the tile on top of the stack
    fn turn<H: SearchHost>(&mut self, host: &mut H, frames: &mut Vec<Frame>) -> Option<bool> {
        loop {
            let Some(Frame::Turning {
                index,
                position,
                original,
                attempts,
            }) = frames.last_mut()
            else {
                return Some(false);
            };
            let (index, position, original) = (*index, *position, *original);

            if *attempts == SIDES || self.exhausted {
                frames.pop();
                host.restore(index, original);
                return Some(!self.exhausted && host.verify());
            }
            *attempts += 1;
            let attempt = *attempts;

            host.rotate_clockwise(index);
            if !fits_solved_neighbours(host.grid(), position) {
                trace!(%position, attempt, "orientation clashes with solved neighbours");
                continue;
            }
            if host.verify() {
                frames.pop();
                return Some(true);
            }
            return None;
        }
    }
}

/// Search state of one residual tile
#[derive(Clone, Copy, Debug)]
enum Frame {
    /// Tile was already solved; the verifier is the fallback if the rest fails
    Skipped,
    /// Tile whose orientations are being tried
    Turning {
        index: usize,
        position: Position,
        original: Tile,
        attempts: usize,
    },
}

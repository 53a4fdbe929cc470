//! Solve orchestration: propagation, residual search and verification
//!
//! A [`Solver`] borrows a grid mutably for its whole lifetime, so two solves
//! can never interleave on the same grid. Every change it makes to a tile is
//! reported to the observer it was built with.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, trace};

use crate::algorithm::backtracking::{Backtracker, SearchHost};
use crate::algorithm::events::{NoopObserver, Phase, SolveEvent, SolveObserver};
use crate::algorithm::propagation::{Deduction, PropagationWorklist, deduce_rotation};
use crate::algorithm::verification::fits_current_state;
use crate::io::configuration::DEFAULT_STEP_DELAY_MS;
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::Tile;

/// Runtime knobs for a solve run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Pause after each change of working tile, for animated front ends
    pub step_delay: Duration,
    /// Upper bound on backtracking nodes; `None` searches exhaustively
    pub max_search_nodes: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            max_search_nodes: None,
        }
    }
}

/// Counters collected during one solve run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStatistics {
    /// Tiles rotated into place by propagation
    pub propagated: usize,
    /// Tiles accepted as solved without any rotation
    pub already_correct: usize,
    /// Deductions abandoned because several rotations fit
    pub ambiguous: usize,
    /// Deductions abandoned because no rotation fit
    pub impossible: usize,
    /// Tiles handed to the backtracking search
    pub residual: usize,
    /// Backtracking nodes visited
    pub search_nodes: usize,
    /// Quarter-turn rotations applied to tiles
    pub rotations: usize,
    /// Full-grid verifier runs
    pub verifications: usize,
    /// Whether the search stopped on its node budget
    pub budget_exhausted: bool,
}

/// Side-channel annotations describing what the solver is looking at
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveSession {
    /// Tile currently being resolved
    pub working: Option<Position>,
    /// Tile currently being inspected
    pub checking: Option<Position>,
}

/// Solver for one grid
pub struct Solver<'g, O: SolveObserver = NoopObserver> {
    grid: &'g mut Grid,
    observer: O,
    config: SolverConfig,
    session: SolveSession,
    statistics: SolveStatistics,
    phase: Option<Phase>,
}

impl<'g> Solver<'g, NoopObserver> {
    /// Create a solver that reports to nobody
    pub fn new(grid: &'g mut Grid) -> Self {
        Self::with_observer(grid, NoopObserver)
    }
}

impl<'g, O: SolveObserver> Solver<'g, O> {
    /// Create a solver that reports every state change to `observer`
    pub fn with_observer(grid: &'g mut Grid, observer: O) -> Self {
        Self {
            grid,
            observer,
            config: SolverConfig::default(),
            session: SolveSession::default(),
            statistics: SolveStatistics::default(),
            phase: None,
        }
    }

    /// Replace the runtime configuration
    #[must_use]
    pub const fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// The grid being solved
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// Counters from the most recent run
    pub const fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }

    /// Current side-channel annotations
    pub const fn session(&self) -> SolveSession {
        self.session
    }

    /// Give back the observer, e.g. to read what it recorded
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Solve the grid, returning whether every tile ends up fitting
    ///
    /// Propagates every tile in row-major order, then searches rotations for
    /// whatever is left. On success every tile is marked solved. On failure
    /// tiles settled by propagation keep their rotation and the rest are back
    /// where the search found them.
    pub fn solve(&mut self) -> bool {
        self.statistics = SolveStatistics::default();
        self.phase = None;

        self.enter_phase(Some(Phase::Propagation));
        self.propagate_all();
        let residual = self.collect_residual();
        debug!(
            propagated = self.statistics.propagated,
            already_correct = self.statistics.already_correct,
            residual = residual.len(),
            "propagation finished"
        );

        self.enter_phase(Some(Phase::Backtracking));
        let solved = self.backtrack(residual);

        self.set_working(None);
        self.set_checking(None);
        self.emit(SolveEvent::Finished { solved });

        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            solved,
            rotations = self.statistics.rotations,
            search_nodes = self.statistics.search_nodes,
            "solve finished"
        );
        solved
    }

    /// Run propagation from every tile in row-major order
    pub fn propagate_all(&mut self) {
        for index in 0..self.grid.total() {
            self.propagate_from(index);
        }
    }

    /// Resolve the tile at `index` and, on success, its neighbours in turn
    ///
    /// Returns how many tiles became solved. Each solved tile only queues
    /// unsolved neighbours, so the loop ends once no deduction succeeds.
    pub fn propagate_from(&mut self, index: usize) -> usize {
        let mut worklist = PropagationWorklist::seeded(index);
        let mut solved = 0;

        while let Some(current) = worklist.take_next() {
            let Some(position) = self.grid.coordinates(current) else {
                continue;
            };
            if self.grid.get(position).is_none_or(Tile::is_solved) {
                continue;
            }

            self.set_working(Some(position));
            let deduction = deduce_rotation(self.grid, position);
            trace!(%position, ?deduction, "deduced");

            match deduction {
                Deduction::AlreadySolved => continue,
                Deduction::AlreadyCorrect => self.statistics.already_correct += 1,
                Deduction::Rotate { quarters } => {
                    self.rotate_tile(position, quarters);
                    self.statistics.propagated += 1;
                }
                Deduction::Ambiguous => {
                    self.statistics.ambiguous += 1;
                    continue;
                }
                Deduction::NoFit => {
                    self.statistics.impossible += 1;
                    continue;
                }
            }

            self.mark_solved(position);
            solved += 1;
            worklist.push_neighbours(self.grid, position);
        }

        solved
    }

    /// Row-major indices of tiles still unsolved after propagation
    ///
    /// Tiles that turn out to be correct as they stand are marked solved
    /// instead of being returned.
    pub fn collect_residual(&mut self) -> Vec<usize> {
        let mut residual = Vec::new();

        for position in self.grid.positions() {
            if self.grid.get(position).is_none_or(Tile::is_solved) {
                continue;
            }
            if self.grid.is_correct(position) {
                self.statistics.already_correct += 1;
                self.mark_solved(position);
                continue;
            }
            if let Some(index) = self.grid.index_of(position) {
                residual.push(index);
            }
        }

        self.statistics.residual = residual.len();
        residual
    }

    /// Search rotations for the given tiles until the verifier accepts the grid
    pub fn backtrack(&mut self, residual: Vec<usize>) -> bool {
        let mut backtracker = Backtracker::new(residual, self.config.max_search_nodes);
        let solved = backtracker.search(self);

        self.statistics.search_nodes = backtracker.nodes();
        self.statistics.budget_exhausted = backtracker.is_exhausted();
        if backtracker.is_exhausted() {
            debug!(nodes = backtracker.nodes(), "search budget exhausted");
        }
        solved
    }

    /// Check every tile against every neighbour, marking all solved if they fit
    ///
    /// This is the only place a whole grid is declared solved. The run is
    /// announced as the verification phase; a rejected grid hands control
    /// back to whichever phase called the verifier.
    pub fn does_all_fit(&mut self) -> bool {
        self.statistics.verifications += 1;
        let caller = self.phase;
        self.enter_phase(Some(Phase::Verification));

        for position in self.grid.positions() {
            self.set_checking(Some(position));
            if !fits_current_state(self.grid, position) {
                trace!(%position, "verification failed");
                self.enter_phase(caller);
                return false;
            }
        }

        for position in self.grid.positions() {
            self.mark_solved(position);
        }
        true
    }

    fn emit(&mut self, event: SolveEvent) {
        self.observer.on_event(self.grid, event);
    }

    fn enter_phase(&mut self, phase: Option<Phase>) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        if let Some(phase) = phase {
            self.emit(SolveEvent::PhaseStarted(phase));
        }
    }

    fn set_working(&mut self, position: Option<Position>) {
        if self.session.working == position {
            return;
        }
        self.session.working = position;
        self.emit(SolveEvent::WorkingTile(position));

        if position.is_some() && !self.config.step_delay.is_zero() {
            thread::sleep(self.config.step_delay);
        }
    }

    fn set_checking(&mut self, position: Option<Position>) {
        if self.session.checking == position {
            return;
        }
        self.session.checking = position;
        self.emit(SolveEvent::CheckingTile(position));
    }

    fn rotate_tile(&mut self, position: Position, quarters: usize) {
        if quarters % 4 == 0 {
            return;
        }
        let Some(tile) = self.grid.get_mut(position) else {
            return;
        };
        tile.rotate(quarters);
        let tile = *tile;
        self.statistics.rotations += 1;
        self.emit(SolveEvent::TileChanged { position, tile });
    }

    fn mark_solved(&mut self, position: Position) {
        let Some(tile) = self.grid.get_mut(position) else {
            return;
        };
        if tile.is_solved() {
            return;
        }
        tile.set_solved(true);
        let tile = *tile;
        self.emit(SolveEvent::TileChanged { position, tile });
    }
}

impl<O: SolveObserver> SearchHost for Solver<'_, O> {
    fn grid(&self) -> &Grid {
        self.grid
    }

    fn rotate_clockwise(&mut self, index: usize) {
        if let Some(position) = self.grid.coordinates(index) {
            self.rotate_tile(position, 1);
        }
    }

    fn restore(&mut self, index: usize, tile: Tile) {
        let Some(position) = self.grid.coordinates(index) else {
            return;
        };
        if self.grid.get(position) == Some(&tile) {
            return;
        }
        self.grid.set_tile_at(index, tile);
        self.emit(SolveEvent::TileChanged { position, tile });
    }

    fn verify(&mut self) -> bool {
        self.does_all_fit()
    }

    fn visit(&mut self, index: usize) {
        let position = self.grid.coordinates(index);
        self.set_working(position);
    }
}

/// Solve a grid without observing it
pub fn solve(grid: &mut Grid) -> bool {
    Solver::new(grid).solve()
}

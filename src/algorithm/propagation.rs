use crate::spatial::direction::{Direction, SIDES};
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::Tile;

/// Outcome of trying to deduce a tile's rotation from its neighbours
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deduction {
    /// The tile was already final; nothing to do
    AlreadySolved,
    /// The current rotation already agrees with every neighbour
    AlreadyCorrect,
    /// Exactly one rotation fits; turn the tile this many quarters clockwise
    Rotate {
        /// Quarter turns clockwise, in `0..4`
        quarters: usize,
    },
    /// More than one distinct rotation fits, so the tile must wait
    Ambiguous,
    /// No rotation fits the current constraints
    NoFit,
}

impl Deduction {
    /// Check whether applying this outcome makes the tile solved
    pub const fn resolves(self) -> bool {
        matches!(self, Self::AlreadyCorrect | Self::Rotate { .. })
    }
}

#[derive(Clone, Copy)]
struct Candidate {
    quarters: usize,
    sides: [bool; SIDES],
    forced: bool,
}

/// Test a candidate orientation of the tile at `position` against its neighbours
///
/// Returns `None` if the candidate contradicts the boundary or a neighbour,
/// otherwise whether at least one side was forced by a neighbour that must
/// connect.
pub fn candidate_fit(grid: &Grid, position: Position, candidate: &Tile) -> Option<bool> {
    let mut forced = false;

    for direction in Direction::ALL {
        let connectible = candidate.side(direction);
        let Some(neighbour) = grid.neighbour(position, direction) else {
            if connectible {
                return None;
            }
            continue;
        };

        let facing = direction.opposite();
        if connectible && neighbour.side_can_not_connect(facing) {
            return None;
        }
        if neighbour.side_must_connect(facing) {
            if !connectible {
                return None;
            }
            forced = true;
        }
    }

    Some(forced)
}

/// Decide whether the tile at `position` has a single rotation consistent with its neighbours
///
/// The first fitting rotation is kept unless a later one satisfies a forced
/// side the kept one didn't. Any other fitting rotation that differs from
/// the kept one makes the tile ambiguous. Rotations producing identical side
/// vectors (e.g. a straight turned by half) count as one.
pub fn deduce_rotation(grid: &Grid, position: Position) -> Deduction {
    let Some(tile) = grid.get(position) else {
        return Deduction::NoFit;
    };
    if tile.is_solved() {
        return Deduction::AlreadySolved;
    }
    if grid.is_correct(position) {
        return Deduction::AlreadyCorrect;
    }

    let mut chosen: Option<Candidate> = None;
    for quarters in 0..SIDES {
        let rotated = tile.rotated(quarters);
        let Some(forced) = candidate_fit(grid, position, &rotated) else {
            continue;
        };
        let candidate = Candidate {
            quarters,
            sides: rotated.sides(),
            forced,
        };

        match chosen {
            None => chosen = Some(candidate),
            Some(current) if !current.forced && candidate.forced => chosen = Some(candidate),
            Some(current) if current.sides != candidate.sides => return Deduction::Ambiguous,
            Some(_) => {}
        }
    }

    chosen.map_or(Deduction::NoFit, |candidate| Deduction::Rotate {
        quarters: candidate.quarters,
    })
}

/// Pending tiles to (re)examine during propagation
///
/// Last in, first out: neighbours of a freshly solved tile are examined
/// before older entries, giving a depth-first sweep without recursion.
#[derive(Debug, Default)]
pub struct PropagationWorklist {
    /// Row-major indices awaiting examination
    pub stack: Vec<usize>,
}

impl PropagationWorklist {
    /// Create an empty worklist
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Create a worklist holding a single tile
    pub fn seeded(index: usize) -> Self {
        Self { stack: vec![index] }
    }

    /// Queue a tile for examination
    pub fn push(&mut self, index: usize) {
        self.stack.push(index);
    }

    /// Queue the unsolved neighbours of `position` so they pop in direction order
    pub fn push_neighbours(&mut self, grid: &Grid, position: Position) {
        for direction in Direction::ALL.into_iter().rev() {
            let Some(next) = grid.neighbour_position(position, direction) else {
                continue;
            };
            if grid.get(next).is_some_and(Tile::is_solved) {
                continue;
            }
            if let Some(index) = grid.index_of(next) {
                self.stack.push(index);
            }
        }
    }

    /// Remove and return the next tile to examine
    pub fn take_next(&mut self) -> Option<usize> {
        self.stack.pop()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.stack.len()
    }
}

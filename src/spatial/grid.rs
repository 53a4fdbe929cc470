//! Rectangular tile grid with row-major addressing and neighbour queries
//!
//! The grid owns its tiles in an `ndarray` matrix indexed `[row, col]`.
//! Positions are exposed as `(x, y)` where `x` is the column and `y` the
//! row, and the row-major index of `(x, y)` is `x + y * width`. Every lookup
//! that falls outside the grid yields `None`, which the solver treats as
//! the boundary: no connector may face it.

use ndarray::Array2;
use rand::Rng;
use std::fmt;

use crate::io::configuration::{MAX_GRID_DIMENSION, TILE_GLYPHS};
use crate::io::error::{Result, SolverError, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::Tile;

/// Column and row of a tile within a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column, counted from the left
    pub x: usize,
    /// Row, counted from the top
    pub y: usize,
}

impl Position {
    /// Create a position from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Position one step away in a direction, if it doesn't underflow
    ///
    /// Upper bounds are not checked here; see [`Grid::neighbour_position`].
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let [dx, dy] = direction.offset();
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };
        Some(Self { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid of connector tiles with a fixed shape
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Create a grid filled with empty tiles
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn new(width: usize, height: usize) -> Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            tiles: Array2::from_elem((height, width), Tile::empty()),
        })
    }

    /// Create a grid from tiles listed in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or the number of tiles
    /// differs from `width * height`
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self> {
        validate_dimensions(width, height)?;
        let expected = width * height;
        if tiles.len() != expected {
            return Err(SolverError::TileCountMismatch {
                expected,
                actual: tiles.len(),
            });
        }

        let tiles = Array2::from_shape_vec((height, width), tiles)
            .map_err(|error| invalid_parameter("tiles", &expected, &error))?;
        Ok(Self { tiles })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.tiles.nrows()
    }

    /// Total number of tiles
    pub fn total(&self) -> usize {
        self.tiles.len()
    }

    /// Check whether a coordinate lies inside the grid
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Row-major index of a coordinate, or `None` outside the grid
    pub fn tile_position(&self, x: usize, y: usize) -> Option<usize> {
        self.contains(x, y).then(|| x + y * self.width())
    }

    /// Row-major index of a position, or `None` outside the grid
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.tile_position(position.x, position.y)
    }

    /// Coordinates of a row-major index, or `None` when out of range
    pub fn coordinates(&self, index: usize) -> Option<Position> {
        (index < self.total()).then(|| Position::new(index % self.width(), index / self.width()))
    }

    /// Tile at a coordinate
    pub fn tile(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.get([y, x])
    }

    /// Mutable tile at a coordinate
    pub fn tile_mut(&mut self, x: usize, y: usize) -> Option<&mut Tile> {
        self.tiles.get_mut([y, x])
    }

    /// Tile at a position
    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.tile(position.x, position.y)
    }

    /// Mutable tile at a position
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.tile_mut(position.x, position.y)
    }

    /// Tile at a row-major index
    pub fn tile_at(&self, index: usize) -> Option<&Tile> {
        self.coordinates(index)
            .and_then(|position| self.get(position))
    }

    /// Mutable tile at a row-major index
    pub fn tile_at_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.coordinates(index)
            .and_then(|position| self.get_mut(position))
    }

    /// Replace the tile at a coordinate
    ///
    /// Returns `false` without changing anything if the coordinate is outside
    /// the grid.
    pub fn set_tile(&mut self, x: usize, y: usize, tile: Tile) -> bool {
        let Some(slot) = self.tile_mut(x, y) else {
            return false;
        };
        *slot = tile;
        true
    }

    /// Replace the tile at a row-major index
    pub fn set_tile_at(&mut self, index: usize, tile: Tile) -> bool {
        let Some(slot) = self.tile_at_mut(index) else {
            return false;
        };
        *slot = tile;
        true
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// All tiles in row-major order, mutably
    pub fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width();
        (0..self.total()).map(move |index| Position::new(index % width, index / width))
    }

    /// Replace every tile with a fresh empty tile
    pub fn fill_with_empty(&mut self) {
        self.tiles.fill(Tile::empty());
    }

    /// Replace every tile with a fresh random tile
    pub fn fill_with_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for tile in &mut self.tiles {
            *tile = Tile::random(rng);
        }
    }

    /// Rotate every tile by a random number of quarter turns
    ///
    /// Shapes are preserved, so a solvable grid stays solvable.
    pub fn scramble<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for tile in &mut self.tiles {
            tile.rotate(rng.random_range(0..4_u8));
        }
    }

    /// Number of tiles whose rotation is final
    pub fn solved_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_solved()).count()
    }

    /// Check whether every tile is solved
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(Tile::is_solved)
    }

    /// Position adjacent to `position` in a direction, or `None` at the boundary
    pub fn neighbour_position(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|next| self.contains(next.x, next.y))
    }

    /// Tile adjacent to `position` in a direction
    pub fn neighbour(&self, position: Position, direction: Direction) -> Option<&Tile> {
        self.neighbour_position(position, direction)
            .and_then(|next| self.get(next))
    }

    /// Positions of all existing neighbours, in direction order
    pub fn neighbour_positions(&self, position: Position) -> Vec<Position> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbour_position(position, direction))
            .collect()
    }

    /// All existing neighbour tiles, in direction order
    pub fn neighbours(&self, position: Position) -> Vec<&Tile> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbour(position, direction))
            .collect()
    }

    /// Check whether the neighbour in a direction is certain to connect back
    ///
    /// The boundary never connects.
    pub fn side_must_connect_neighbour(&self, position: Position, direction: Direction) -> bool {
        self.neighbour(position, direction)
            .is_some_and(|neighbour| neighbour.side_must_connect(direction.opposite()))
    }

    /// Check whether the neighbour in a direction could connect back
    pub fn side_can_connect_neighbour(&self, position: Position, direction: Direction) -> bool {
        self.neighbour(position, direction)
            .is_some_and(|neighbour| neighbour.side_can_connect(direction.opposite()))
    }

    /// Check whether the neighbour in a direction is certain not to connect back
    ///
    /// The boundary can never connect, so this holds there.
    pub fn side_can_not_connect_neighbour(&self, position: Position, direction: Direction) -> bool {
        self.neighbour(position, direction)
            .is_none_or(|neighbour| neighbour.side_can_not_connect(direction.opposite()))
    }

    /// Check whether one side of a tile agrees with what its neighbour is known to do
    pub fn is_side_correct(&self, position: Position, direction: Direction) -> bool {
        let Some(tile) = self.get(position) else {
            return false;
        };
        if tile.side(direction) {
            self.side_must_connect_neighbour(position, direction)
        } else {
            self.side_can_not_connect_neighbour(position, direction)
        }
    }

    /// Check whether every side of a tile agrees with its neighbours
    pub fn is_correct(&self, position: Position) -> bool {
        Direction::ALL
            .into_iter()
            .all(|direction| self.is_side_correct(position, direction))
    }

    /// Number of sides whose neighbour is certain to connect
    pub fn must_connect_neighbour_count(&self, position: Position) -> usize {
        self.count_sides(position, Self::side_must_connect_neighbour)
    }

    /// Number of sides whose neighbour could connect
    pub fn can_connect_neighbour_count(&self, position: Position) -> usize {
        self.count_sides(position, Self::side_can_connect_neighbour)
    }

    /// Number of sides whose neighbour is certain not to connect
    pub fn can_not_connect_neighbour_count(&self, position: Position) -> usize {
        self.count_sides(position, Self::side_can_not_connect_neighbour)
    }

    /// Number of sides facing the boundary or an empty tile
    pub fn empty_neighbour_count(&self, position: Position) -> usize {
        self.count_sides(position, |grid, position, direction| {
            grid.neighbour(position, direction)
                .is_none_or(Tile::is_empty)
        })
    }

    fn count_sides(
        &self,
        position: Position,
        predicate: impl Fn(&Self, Position, Direction) -> bool,
    ) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|&direction| predicate(self, position, direction))
            .count()
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(SolverError::InvalidDimensions { width, height });
    }
    Ok(())
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                let glyph = TILE_GLYPHS
                    .get(usize::from(tile.mask()))
                    .copied()
                    .unwrap_or('?');
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

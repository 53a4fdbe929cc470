//! Connector tiles and their rotation and shape classification
//!
//! A tile stores one connector bit per side plus a solved flag. Rotation is
//! a cyclic shift of the side bits, where whatever sat on side N moves to
//! side N + 1 (clockwise). Any edit of the sides clears the solved flag.

use bitvec::prelude::*;
use num_traits::{Euclid, PrimInt};
use rand::Rng;

use crate::spatial::direction::{Direction, SIDES};

type SideBits = BitArr!(for SIDES, in u8, Lsb0);

/// Shape category of a tile, derived from its connectible sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// No connectors
    Empty,
    /// One connector
    End,
    /// Two connectors on adjacent sides
    Corner,
    /// Two connectors on opposite sides
    Straight,
    /// Three connectors
    TShape,
    /// Connectors on all four sides
    Cross,
}

/// A grid cell with up to four connector stubs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    sides: SideBits,
    solved: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self::empty()
    }
}

impl Tile {
    /// Create a tile from the connector state of each side
    pub fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self::from_sides([top, right, bottom, left])
    }

    /// Create a tile with no connectors
    pub const fn empty() -> Self {
        Self {
            sides: SideBits::ZERO,
            solved: false,
        }
    }

    /// Create a tile from a side array in clockwise order starting at the top
    pub fn from_sides(sides: [bool; SIDES]) -> Self {
        let mut tile = Self::empty();
        tile.set_sides(sides);
        tile
    }

    /// Create a tile from a 4-bit mask (bit 0 top, 1 right, 2 bottom, 3 left)
    ///
    /// Bits above the lowest four are ignored.
    pub fn from_mask(mask: u8) -> Self {
        Self::from_sides(Direction::ALL.map(|direction| mask & direction.mask_bit() != 0))
    }

    /// Create a tile with each side independently connectible at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_sides([rng.random(), rng.random(), rng.random(), rng.random()])
    }

    /// Check whether the given side is connectible
    pub fn side(&self, direction: Direction) -> bool {
        self.sides
            .get(direction.index())
            .is_some_and(|bit| *bit)
    }

    /// Check a side by integer index, normalised modulo four
    pub fn side_at<T>(&self, side: T) -> bool
    where
        T: PrimInt + Euclid,
    {
        self.side(Direction::normalize(side))
    }

    /// Set whether a side is connectible
    ///
    /// Clears the solved flag.
    pub fn set_side(&mut self, direction: Direction, connectible: bool) {
        self.sides.set(direction.index(), connectible);
        self.solved = false;
    }

    /// Replace all sides at once
    ///
    /// Clears the solved flag.
    pub fn set_sides(&mut self, sides: [bool; SIDES]) {
        for (index, connectible) in sides.into_iter().enumerate() {
            self.sides.set(index, connectible);
        }
        self.solved = false;
    }

    /// Side states in clockwise order starting from the top
    pub fn sides(&self) -> [bool; SIDES] {
        Direction::ALL.map(|direction| self.side(direction))
    }

    /// Side states packed into a 4-bit mask (bit 0 top, 1 right, 2 bottom, 3 left)
    pub fn mask(&self) -> u8 {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.side(direction))
            .fold(0, |mask, direction| mask | direction.mask_bit())
    }

    /// Number of connectible sides
    pub fn connectible_sides(&self) -> usize {
        self.sides.count_ones()
    }

    /// Check whether the tile has no connectors
    pub fn is_empty(&self) -> bool {
        self.sides.not_any()
    }

    /// Make this tile empty
    pub fn clear(&mut self) {
        self.set_sides([false; SIDES]);
    }

    /// Rotate by a number of quarter turns clockwise, normalised modulo four
    ///
    /// Clears the solved flag; callers that consider the new rotation final
    /// must set it again afterwards.
    pub fn rotate<T>(&mut self, amount: T)
    where
        T: PrimInt + Euclid,
    {
        let quarters = Direction::normalize(amount).index();
        if let Some(bits) = self.sides.get_mut(..SIDES) {
            bits.rotate_right(quarters);
        }
        self.solved = false;
    }

    /// Rotate a quarter turn clockwise
    pub fn rotate_clockwise(&mut self) {
        self.rotate(1);
    }

    /// Copy of this tile rotated by a number of quarter turns clockwise
    #[must_use]
    pub fn rotated<T>(&self, amount: T) -> Self
    where
        T: PrimInt + Euclid,
    {
        let mut tile = *self;
        tile.rotate(amount);
        tile
    }

    /// Shape category of the tile
    pub fn shape(&self) -> Shape {
        match self.connectible_sides() {
            0 => Shape::Empty,
            1 => Shape::End,
            2 if self.is_straight() => Shape::Straight,
            2 => Shape::Corner,
            3 => Shape::TShape,
            _ => Shape::Cross,
        }
    }

    /// Check whether the tile is a straight piece (two opposite connectors)
    pub fn is_straight(&self) -> bool {
        self.is_horizontal() || self.is_vertical()
    }

    /// Check whether the tile is a straight piece running left to right
    pub fn is_horizontal(&self) -> bool {
        self.sides() == [false, true, false, true]
    }

    /// Check whether the tile is a straight piece running top to bottom
    pub fn is_vertical(&self) -> bool {
        self.sides() == [true, false, true, false]
    }

    /// Check whether the tile is a corner piece (two adjacent connectors)
    pub fn is_corner(&self) -> bool {
        self.connectible_sides() == 2 && !self.is_straight()
    }

    /// Check whether the tile is an end piece
    pub fn is_end(&self) -> bool {
        self.connectible_sides() == 1
    }

    /// Check whether the tile is T-shaped
    pub fn is_t_shape(&self) -> bool {
        self.connectible_sides() == 3
    }

    /// Check whether the tile is cross shaped
    pub fn is_cross(&self) -> bool {
        self.connectible_sides() == SIDES
    }

    /// Check whether the tile's rotation is considered final
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    /// Mark the tile's rotation as final or not
    pub const fn set_solved(&mut self, solved: bool) {
        self.solved = solved;
    }

    /// First non-connectible side found clockwise directly after a connectible one
    ///
    /// Scans two full turns so a connector on the left side wraps around to
    /// the top. Returns `None` for empty tiles and for crosses.
    pub fn first_empty_side(&self) -> Option<Direction> {
        if self.is_empty() {
            return None;
        }

        let mut passed_connector = false;
        for step in 0..SIDES * 2 {
            let connectible = self.side_at(step);
            if passed_connector && !connectible {
                return Some(Direction::from_index(step));
            }
            passed_connector |= connectible;
        }
        None
    }

    /// Check whether this tile is certain to connect on a side
    ///
    /// Crosses always connect; other tiles only once solved.
    pub fn side_must_connect(&self, direction: Direction) -> bool {
        if self.is_cross() {
            return true;
        }
        self.solved && self.side(direction)
    }

    /// Check whether this tile could connect on a side
    ///
    /// Unsolved tiles are over-approximated: anything with a connector might
    /// end up facing this side.
    pub fn side_can_connect(&self, direction: Direction) -> bool {
        if self.is_cross() {
            return true;
        }
        if self.solved {
            return self.side(direction);
        }
        !self.is_empty()
    }

    /// Check whether this tile is certain not to connect on a side
    pub fn side_can_not_connect(&self, direction: Direction) -> bool {
        if self.is_cross() {
            return false;
        }
        if self.solved {
            return !self.side(direction);
        }
        self.is_empty()
    }
}

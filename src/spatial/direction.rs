//! Cardinal directions around a tile with cyclic arithmetic
//!
//! Sides are indexed clockwise starting from the top. All index arithmetic
//! goes through [`Direction::normalize`] so negative offsets such as
//! `side - 1` resolve to the same side as `side + 3`.

use num_traits::{Euclid, NumCast, PrimInt};
use std::fmt;

/// Number of sides on a tile
pub const SIDES: usize = 4;

/// One of the four sides of a tile, in clockwise order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Side facing the previous row
    Top,
    /// Side facing the next column
    Right,
    /// Side facing the next row
    Bottom,
    /// Side facing the previous column
    Left,
}

impl Direction {
    /// All directions in clockwise order starting from the top
    pub const ALL: [Self; SIDES] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Index of this side within a tile's side vector
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Direction for an index already known to lie in `0..4`, wrapping larger values
    pub const fn from_index(index: usize) -> Self {
        match index % SIDES {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// Direction for any integer side offset, taken modulo four
    ///
    /// Works for signed and unsigned integer types alike, so `normalize(-1)`
    /// and `normalize(3)` both yield [`Direction::Left`].
    pub fn normalize<T>(side: T) -> Self
    where
        T: PrimInt + Euclid,
    {
        let Some(sides) = <T as NumCast>::from(SIDES) else {
            return Self::Top;
        };
        let index = Euclid::rem_euclid(&side, &sides).to_usize().unwrap_or(0);
        Self::from_index(index)
    }

    /// The side facing this one on an adjacent tile
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Next side in clockwise order
    #[must_use]
    pub const fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Next side in counter-clockwise order
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        Self::from_index(self.index() + SIDES - 1)
    }

    /// Coordinate step `[dx, dy]` taken when moving one tile in this direction
    ///
    /// The y axis grows downward, matching row-major grid order.
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Top => [0, -1],
            Self::Right => [1, 0],
            Self::Bottom => [0, 1],
            Self::Left => [-1, 0],
        }
    }

    /// Bit assigned to this side in the 4-bit side mask
    pub const fn mask_bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        f.write_str(name)
    }
}

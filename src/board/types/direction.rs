//! Diagonal directions.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the four diagonal directions. North is toward row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All directions in mask-table order
    pub const ALL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Direction::NorthEast => 0,
            Direction::NorthWest => 1,
            Direction::SouthEast => 2,
            Direction::SouthWest => 3,
        }
    }

    /// Row and column delta of one step.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::NorthEast => (-1, 1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
        }
    }

    /// Left-rotation amount that moves every bit one step this way.
    #[inline]
    #[must_use]
    pub(crate) const fn rotation(self) -> u32 {
        match self {
            Direction::NorthEast => 1,
            Direction::NorthWest => 7,
            Direction::SouthEast => 32 - 7,
            Direction::SouthWest => 32 - 1,
        }
    }
}

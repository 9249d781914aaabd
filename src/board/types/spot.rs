//! Spot indices and their translation to bit positions.
//!
//! The 32 dark squares are numbered two ways:
//! - spot index (0-31), row-major from the top-left, used at every external
//!   boundary (UI, wire protocol, textual formats)
//! - bit position (0-31), laid out so that each diagonal step is a fixed
//!   rotation of the 32-bit word
//!
//! Row 0 is Black's home row and holds spots 0-3 on columns 1, 3, 5, 7.
//! Odd rows start on column 0.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SpotError;

use super::bitboard::Bitboard;

/// Number of playable squares.
pub const SPOTS_NUMBER: usize = 32;

/// Bit position for every spot index.
const SPOT_TO_BIT: [u8; SPOTS_NUMBER] = [
    11, 5, 31, 25, //
    10, 4, 30, 24, //
    3, 29, 23, 17, //
    2, 28, 22, 16, //
    27, 21, 15, 9, //
    26, 20, 14, 8, //
    19, 13, 7, 1, //
    18, 12, 6, 0, //
];

/// Inverse of `SPOT_TO_BIT`.
const BIT_TO_SPOT: [u8; SPOTS_NUMBER] = invert(SPOT_TO_BIT);

const fn invert(table: [u8; SPOTS_NUMBER]) -> [u8; SPOTS_NUMBER] {
    let mut result = [0u8; SPOTS_NUMBER];
    let mut spot = 0;
    while spot < SPOTS_NUMBER {
        result[table[spot] as usize] = spot as u8;
        spot += 1;
    }
    result
}

/// Bit position of a spot index.
#[inline]
#[must_use]
pub const fn spot_to_bit(spot: usize) -> usize {
    SPOT_TO_BIT[spot] as usize
}

/// Spot index of a bit position.
#[inline]
#[must_use]
pub const fn bit_to_spot(bit: usize) -> usize {
    BIT_TO_SPOT[bit] as usize
}

/// One of the 32 playable squares, addressed by spot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spot(u8);

impl Spot {
    /// Create a spot, returning `None` when `index` is not below 32.
    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < SPOTS_NUMBER {
            Some(Spot(index))
        } else {
            None
        }
    }

    /// Build a spot from a row (0-7) and column (0-7); `None` for light or
    /// off-board squares.
    #[must_use]
    pub const fn from_coords(row: isize, col: isize) -> Option<Self> {
        if row < 0 || row >= 8 || col < 0 || col >= 8 || (row + col) % 2 == 0 {
            return None;
        }
        Some(Spot((row * 4 + col / 2) as u8))
    }

    /// Spot from the low five bits of `raw`; always in range.
    #[inline]
    #[must_use]
    pub(crate) const fn from_low_bits(raw: u16) -> Self {
        Spot((raw & 0x1F) as u8)
    }

    /// Spot of the lowest set bit, `None` for an empty bitboard.
    #[inline]
    #[must_use]
    pub const fn from_lowest_bit(bb: Bitboard) -> Option<Self> {
        if bb.0 == 0 {
            return None;
        }
        Some(Spot(BIT_TO_SPOT[bb.0.trailing_zeros() as usize]))
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Single-bit bitboard for this spot.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> Bitboard {
        Bitboard(1 << SPOT_TO_BIT[self.0 as usize])
    }

    /// Board row, 0 at the top (Black's side).
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.0 as usize / 4
    }

    /// Board column; even rows use the odd columns.
    #[inline]
    #[must_use]
    pub const fn col(self) -> usize {
        let offset = if self.row() % 2 == 0 { 1 } else { 0 };
        2 * (self.0 as usize % 4) + offset
    }

    /// All spots in index order.
    pub fn all() -> impl Iterator<Item = Spot> {
        (0..SPOTS_NUMBER as u8).map(Spot)
    }
}

impl TryFrom<u8> for Spot {
    type Error = SpotError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Spot::new(index).ok_or(SpotError::OutOfRange { index })
    }
}

impl From<Spot> for u8 {
    fn from(spot: Spot) -> Self {
        spot.0
    }
}

impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

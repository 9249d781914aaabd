//! Bitboard type and operations.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use super::direction::Direction;
use super::spot::Spot;

/// A 32-bit bitboard, one bit per playable square, indexed by bit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(pub u32);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    /// Row 0, where White men promote
    pub const TOP_ROW: Bitboard = Bitboard(0x8200_0820);
    /// Row 7, where Black men promote
    pub const BOTTOM_ROW: Bitboard = Bitboard(0x0004_1041);

    /// Black's twelve starting squares (spots 0-11)
    pub const BLACK_START: Bitboard = Bitboard(0xe382_0c38);
    /// White's twelve starting squares (spots 20-31)
    pub const WHITE_START: Bitboard = Bitboard(0x041c_71c3);
}

impl Bitboard {
    /// Returns an iterator over the spots set in this bitboard, in bit order
    #[inline]
    #[must_use]
    pub fn iter(self) -> SpotIter {
        SpotIter(self)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn any(self) -> bool {
        self.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, spot: Spot) -> bool {
        self.0 & spot.bit().0 != 0
    }

    /// Rotate every bit one diagonal step in `dir`.
    ///
    /// Bits without a neighbour in `dir` wrap around to unrelated squares,
    /// so callers mask the source first (see `masks`).
    #[inline]
    #[must_use]
    pub const fn shift(self, dir: Direction) -> Self {
        Bitboard(self.0.rotate_left(dir.rotation()))
    }

    #[inline]
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Bitboard(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Bitboard(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(self) -> Self {
        Bitboard::not(self)
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Spot> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Spot>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::EMPTY, |bb, spot| bb | spot.bit())
    }
}

/// Draws the bitboard as an 8x8 grid, row 0 on top.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                let ch = match Spot::from_coords(row, col) {
                    Some(spot) if self.contains(spot) => '1',
                    Some(_) => '.',
                    None => ' ',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over set bits of a `Bitboard`, yielding spot indices
#[derive(Clone, Debug)]
pub struct SpotIter(Bitboard);

impl Iterator for SpotIter {
    type Item = Spot;

    fn next(&mut self) -> Option<Self::Item> {
        let spot = Spot::from_lowest_bit(self.0)?;
        self.0 .0 &= self.0 .0 - 1;
        Some(spot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.popcount() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SpotIter {}

impl IntoIterator for Bitboard {
    type Item = Spot;
    type IntoIter = SpotIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

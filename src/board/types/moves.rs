//! Move types and move list.

use std::fmt;
use std::ops::{BitOr, Index};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::spot::Spot;

/// Move kind as a two-bit flag set: capture and promotion are independent.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveKind(u8);

impl MoveKind {
    pub const NORMAL: MoveKind = MoveKind(0);
    pub const CAPTURE: MoveKind = MoveKind(1);
    pub const PROMOTION: MoveKind = MoveKind(2);
    pub const CAPTURE_PROMOTION: MoveKind = MoveKind(3);

    /// Parse the wire flag byte; `None` when bits other than 0 and 1 are set
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits <= Self::CAPTURE_PROMOTION.0 {
            Some(MoveKind(bits))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.0 & Self::CAPTURE.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.0 & Self::PROMOTION.0 != 0
    }
}

impl BitOr for MoveKind {
    type Output = MoveKind;

    fn bitor(self, rhs: Self) -> Self {
        MoveKind(self.0 | rhs.0)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            MoveKind::NORMAL => "NORMAL",
            MoveKind::CAPTURE => "CAPTURE",
            MoveKind::PROMOTION => "PROMOTION",
            _ => "CAPTURE_PROMOTION",
        };
        f.write_str(name)
    }
}

/// Compact 16-bit move representation.
///
/// Encoding:
/// - bits 0-4:   from spot (0-31)
/// - bits 5-9:   to spot (0-31)
/// - bits 10-11: kind flags
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u16);

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Spot, to: Spot, kind: MoveKind) -> Self {
        Move(from.as_u8() as u16 | (to.as_u8() as u16) << 5 | (kind.bits() as u16) << 10)
    }

    /// Create a non-capturing, non-promoting move
    #[inline]
    #[must_use]
    pub const fn normal(from: Spot, to: Spot) -> Self {
        Move::new(from, to, MoveKind::NORMAL)
    }

    /// Create a single jump
    #[inline]
    #[must_use]
    pub const fn capture(from: Spot, to: Spot) -> Self {
        Move::new(from, to, MoveKind::CAPTURE)
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Spot {
        Spot::from_low_bits(self.0)
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Spot {
        Spot::from_low_bits(self.0 >> 5)
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> MoveKind {
        MoveKind((self.0 >> 10) as u8 & 0b11)
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        self.kind().is_capture()
    }

    #[inline]
    #[must_use]
    pub const fn is_promotion(self) -> bool {
        self.kind().is_promotion()
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} {})", self.kind())
    }
}

/// Draughts notation on spot indices: `21-17` for a step, `21x14` for a jump.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from(), sep, self.to())
    }
}

/// Upper bound on moves in any position: four directions per piece.
pub(crate) const MAX_MOVES: usize = 128;
pub(crate) const EMPTY_MOVE: Move = Move(0);

/// List of moves with fixed-size backing array.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub(crate) fn new() -> Self {
        MoveList {
            moves: [EMPTY_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, mv: Move) {
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.as_slice().contains(mv)
    }

    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Move> {
        self.as_slice().get(idx).copied()
    }

    #[must_use]
    pub fn first(&self) -> Option<Move> {
        self.get(0)
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl PartialEq for MoveList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for MoveList {}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

/// Owning iterator over moves in a `MoveList`
pub struct MoveListIntoIter {
    list: MoveList,
    idx: usize,
}

impl Iterator for MoveListIntoIter {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        let mv = self.list.get(self.idx)?;
        self.idx += 1;
        Some(mv)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MoveListIntoIter {}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = MoveListIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        MoveListIntoIter { list: self, idx: 0 }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, idx: usize) -> &Self::Output {
        assert!(
            idx < self.len,
            "MoveList index {} out of bounds (len {})",
            idx,
            self.len
        );
        &self.moves[idx]
    }
}

//! Piece and color types.

use std::fmt;
use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::bitboard::Bitboard;
use super::direction::Direction;
use super::spot::Spot;

/// Checkers piece types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceType {
    Man,
    King,
}

impl PieceType {
    /// Diagram letter: `w`/`b` for men, uppercase for kings
    #[inline]
    #[must_use]
    pub const fn to_char(self, color: Color) -> char {
        match (self, color) {
            (PieceType::Man, Color::White) => 'w',
            (PieceType::King, Color::White) => 'W',
            (PieceType::Man, Color::Black) => 'b',
            (PieceType::King, Color::Black) => 'B',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Man => write!(f, "man"),
            PieceType::King => write!(f, "king"),
        }
    }
}

/// Side colors. White starts on spots 20-31 and moves first.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The two directions a man of this color moves and captures in
    #[inline]
    #[must_use]
    pub const fn forward(self) -> [Direction; 2] {
        match self {
            Color::White => [Direction::NorthEast, Direction::NorthWest],
            Color::Black => [Direction::SouthEast, Direction::SouthWest],
        }
    }

    /// Row where men of this color are crowned (the opponent's home row)
    #[inline]
    #[must_use]
    pub const fn promotion_row(self) -> Bitboard {
        match self {
            Color::White => Bitboard::TOP_ROW,
            Color::Black => Bitboard::BOTTOM_ROW,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn start_squares(self) -> Bitboard {
        match self {
            Color::White => Bitboard::WHITE_START,
            Color::Black => Bitboard::BLACK_START,
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// One entry of a board listing: which piece stands on which spot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OccupiedSpot {
    pub color: Color,
    pub piece: PieceType,
    pub spot: Spot,
}

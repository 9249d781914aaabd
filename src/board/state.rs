use std::fmt;

use super::{Bitboard, Color, OccupiedSpot, PieceType, Spot};

/// Whether the game can continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// No side to move yet: the position was never reset.
    Idle,
    Ongoing,
    /// The other side has no legal move on its turn.
    Won(Color),
}

/// Full game state: one bitboard per color, a king mask and the side to move.
///
/// Invariants: the color boards are disjoint, every king bit sits on an
/// occupied square, and `chain` (when set) names a piece of the side to move.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) pieces: [Bitboard; 2],
    pub(crate) kings: Bitboard,
    pub(crate) turn: Option<Color>,
    /// Piece in the middle of a multi-jump; it is the only one allowed to move.
    pub(crate) chain: Option<Spot>,
}

impl Position {
    /// An empty board with no side to move.
    #[must_use]
    pub const fn new() -> Self {
        Position {
            pieces: [Bitboard::EMPTY; 2],
            kings: Bitboard::EMPTY,
            turn: None,
            chain: None,
        }
    }

    /// The standard starting position with White to move.
    #[must_use]
    pub fn starting() -> Self {
        let mut position = Position::new();
        position.reset();
        position
    }

    /// Twelve men per side on the three home rows, no kings, White to move.
    pub fn reset(&mut self) {
        for color in Color::BOTH {
            self.pieces[color.index()] = color.start_squares();
        }
        self.kings = Bitboard::EMPTY;
        self.turn = Some(Color::White);
        self.chain = None;
    }

    /// Side to move, `None` before the first `reset`.
    #[inline]
    #[must_use]
    pub const fn turn(&self) -> Option<Color> {
        self.turn
    }

    #[inline]
    #[must_use]
    pub const fn pieces(&self, color: Color) -> Bitboard {
        self.pieces[color.index()]
    }

    #[inline]
    #[must_use]
    pub const fn kings(&self) -> Bitboard {
        self.kings
    }

    #[inline]
    #[must_use]
    pub const fn occupied(&self) -> Bitboard {
        self.pieces[0].or(self.pieces[1])
    }

    #[inline]
    #[must_use]
    pub(crate) const fn empty_squares(&self) -> Bitboard {
        self.occupied().not()
    }

    /// The piece that must keep jumping this turn, if a multi-jump is underway.
    #[inline]
    #[must_use]
    pub const fn pending_capture(&self) -> Option<Spot> {
        self.chain
    }

    #[must_use]
    pub fn piece_at(&self, spot: Spot) -> Option<(Color, PieceType)> {
        let color = Color::BOTH
            .into_iter()
            .find(|&color| self.pieces(color).contains(spot))?;
        let piece = if self.kings.contains(spot) {
            PieceType::King
        } else {
            PieceType::Man
        };
        Some((color, piece))
    }

    /// Snapshot of every occupied spot: white men, white kings, black men,
    /// black kings, each group in bit order.
    #[must_use]
    pub fn board(&self) -> Vec<OccupiedSpot> {
        let mut listing = Vec::with_capacity(self.occupied().popcount() as usize);
        for color in Color::BOTH {
            let own = self.pieces(color);
            for (piece, group) in [(PieceType::Man, own & !self.kings), (PieceType::King, own & self.kings)] {
                listing.extend(group.iter().map(|spot| OccupiedSpot { color, piece, spot }));
            }
        }
        listing
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.turn {
            None => GameStatus::Idle,
            Some(color) if self.legal_moves().is_empty() => GameStatus::Won(color.opponent()),
            Some(_) => GameStatus::Ongoing,
        }
    }

    /// Place a piece, replacing whatever stood on `spot`.
    pub(crate) fn set_piece(&mut self, spot: Spot, color: Color, piece: PieceType) {
        self.remove_piece(spot);
        self.pieces[color.index()] |= spot.bit();
        if piece == PieceType::King {
            self.kings |= spot.bit();
        }
    }

    pub(crate) fn remove_piece(&mut self, spot: Spot) {
        let keep = !spot.bit();
        self.pieces[0] &= keep;
        self.pieces[1] &= keep;
        self.kings &= keep;
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

/// Draws the board with row 0 on top; `w`/`b` men, `W`/`B` kings.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  +-----------------+")?;
        for row in 0..8isize {
            write!(f, "  |")?;
            for col in 0..8isize {
                let ch = match Spot::from_coords(row, col) {
                    None => ' ',
                    Some(spot) => match self.piece_at(spot) {
                        Some((color, piece)) => piece.to_char(color),
                        None => '.',
                    },
                };
                write!(f, " {ch}")?;
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "  +-----------------+")?;
        match self.turn {
            Some(color) => write!(f, "  {color} to move"),
            None => write!(f, "  no game in progress"),
        }
    }
}

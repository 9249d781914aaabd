//! Move application and multi-jump continuation.

use super::masks::{attack_mask, step};
use super::{Bitboard, Direction, Move, Position, Spot};

impl Position {
    /// Direction of a two-step jump from `from` to `to`, if they are one.
    fn jump_direction(from: Bitboard, to: Bitboard) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| (from & attack_mask(dir)).shift(dir).shift(dir) == to)
    }

    /// Bit of the square jumped over by a capture, empty for other moves.
    fn jumped_square(mv: Move) -> Bitboard {
        if !mv.is_capture() {
            return Bitboard::EMPTY;
        }
        let from = mv.from().bit();
        Self::jump_direction(from, mv.to().bit()).map_or(Bitboard::EMPTY, |dir| step(from, dir))
    }

    /// Spot of the piece a capture jumps over; `None` for non-captures.
    ///
    /// Wire and UI consumers that need the numeric sentinel use
    /// `captured_index(mv).map_or(SPOTS_NUMBER, Spot::index)`.
    #[must_use]
    pub fn captured_index(&self, mv: Move) -> Option<Spot> {
        Spot::from_lowest_bit(Self::jumped_square(mv))
    }

    /// Play `mv` for the side to move.
    ///
    /// The move is trusted: validate it with `is_valid` or take it from
    /// `legal_moves` first. After a capture the same side keeps the move
    /// while the jumping piece can capture again; a man crowned by the
    /// capture ends the turn.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.is_valid(mv), "apply_move called with illegal move {mv:?}");
        let Some(color) = self.turn else {
            return;
        };
        let from = mv.from().bit();
        let to = mv.to().bit();
        let was_king = self.kings & from == from;
        let own = color.index();

        self.pieces[own] = (self.pieces[own] & !from) | to;
        self.kings &= !from;
        if was_king || mv.is_promotion() {
            self.kings |= to;
        }

        if mv.is_capture() {
            let jumped = Self::jumped_square(mv);
            self.pieces[color.opponent().index()] &= !jumped;
            self.kings &= !jumped;

            let more = if was_king {
                self.king_captures(to, color)
            } else if mv.is_promotion() {
                Bitboard::EMPTY
            } else {
                self.man_captures(to, color)
            };
            if more.any() {
                self.chain = Some(mv.to());
                return;
            }
        }
        self.chain = None;
        self.turn = Some(color.opponent());
    }
}

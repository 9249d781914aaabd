//! Legal move generation with the forced-capture rule.
//!
//! Everything is computed on whole bitboards: a step is a masked rotation,
//! a jump is "step onto an opponent, step again onto an empty square".

use super::masks::{attack_mask, step};
use super::{Bitboard, Color, Direction, Move, MoveKind, MoveList, Position, Spot};

const KING_DIRECTIONS: [Direction; 4] = Direction::ALL;

impl Position {
    /// Empty squares reachable in one step from `from` along `dirs`.
    fn steps(&self, from: Bitboard, dirs: &[Direction]) -> Bitboard {
        let empty = self.empty_squares();
        dirs.iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | (step(from, dir) & empty))
    }

    /// Landing squares of single jumps by `color` from `from` along `dirs`.
    fn jumps(&self, from: Bitboard, color: Color, dirs: &[Direction]) -> Bitboard {
        let empty = self.empty_squares();
        let opponent = self.pieces(color.opponent());
        dirs.iter().fold(Bitboard::EMPTY, |acc, &dir| {
            let over = (from & attack_mask(dir)).shift(dir) & opponent;
            acc | (over.shift(dir) & empty)
        })
    }

    pub(crate) fn man_moves(&self, from: Bitboard, color: Color) -> Bitboard {
        self.steps(from, &color.forward())
    }

    pub(crate) fn king_moves(&self, from: Bitboard) -> Bitboard {
        self.steps(from, &KING_DIRECTIONS)
    }

    pub(crate) fn man_captures(&self, from: Bitboard, color: Color) -> Bitboard {
        self.jumps(from, color, &color.forward())
    }

    pub(crate) fn king_captures(&self, from: Bitboard, color: Color) -> Bitboard {
        self.jumps(from, color, &KING_DIRECTIONS)
    }

    /// All jump landings for `color`, men and kings together.
    pub(crate) fn captures(&self, color: Color) -> Bitboard {
        let own = self.pieces(color);
        self.king_captures(own & self.kings, color) | self.man_captures(own & !self.kings, color)
    }

    /// Whether the side to move is obliged to capture.
    #[must_use]
    pub fn has_captures(&self) -> bool {
        match (self.turn, self.chain) {
            (None, _) => false,
            (Some(_), Some(_)) => true,
            (Some(color), None) => self.captures(color).any(),
        }
    }

    /// Kind of a move landing on `to`; only men are crowned.
    fn landing_kind(color: Color, is_king: bool, to: Spot, base: MoveKind) -> MoveKind {
        if !is_king && color.promotion_row().contains(to) {
            base | MoveKind::PROMOTION
        } else {
            base
        }
    }

    /// Append the moves of the single piece on `from` to `list`.
    fn push_piece_moves(&self, list: &mut MoveList, from: Spot, color: Color, forced: bool) {
        let bit = from.bit();
        let is_king = self.kings.contains(from);
        let (targets, base) = match (forced, is_king) {
            (true, true) => (self.king_captures(bit, color), MoveKind::CAPTURE),
            (true, false) => (self.man_captures(bit, color), MoveKind::CAPTURE),
            (false, true) => (self.king_moves(bit), MoveKind::NORMAL),
            (false, false) => (self.man_moves(bit, color), MoveKind::NORMAL),
        };
        for to in targets {
            list.push(Move::new(from, to, Self::landing_kind(color, is_king, to, base)));
        }
    }

    /// Every legal move for the side to move.
    ///
    /// When any capture exists only captures are returned; during a
    /// multi-jump only the jumping piece's captures are returned.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        let Some(color) = self.turn else {
            return list;
        };
        if let Some(chain) = self.chain {
            self.push_piece_moves(&mut list, chain, color, true);
            return list;
        }
        let forced = self.captures(color).any();
        let own = self.pieces(color);
        for from in (own & self.kings).iter().chain((own & !self.kings).iter()) {
            self.push_piece_moves(&mut list, from, color, forced);
        }
        list
    }

    /// Legal moves of the piece on `from`, under the same capture priority
    /// as `legal_moves`. Empty when the spot holds no piece of the side to
    /// move, or when another piece must capture instead.
    #[must_use]
    pub fn legal_moves_for(&self, from: Spot) -> MoveList {
        let mut list = MoveList::new();
        let Some(color) = self.turn else {
            return list;
        };
        if !self.pieces(color).contains(from) || self.chain.is_some_and(|chain| chain != from) {
            return list;
        }
        let forced = self.has_captures();
        self.push_piece_moves(&mut list, from, color, forced);
        list
    }

    /// True iff `mv` is one of `legal_moves_for(mv.from())`, kind included.
    #[must_use]
    pub fn is_valid(&self, mv: Move) -> bool {
        self.legal_moves_for(mv.from()).contains(&mv)
    }

    /// The legal move from `from` to `to`, with its kind filled in.
    #[must_use]
    pub fn find_move(&self, from: Spot, to: Spot) -> Option<Move> {
        self.legal_moves_for(from)
            .into_iter()
            .find(|mv| mv.to() == to)
    }
}

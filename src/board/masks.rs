//! Pre-computed direction masks.
//!
//! `Bitboard::shift` rotates the whole word, so a square without a neighbour
//! in the shifted direction would wrap onto an unrelated square. Sources are
//! masked before shifting:
//! - the move mask keeps squares with a neighbour one step away
//! - the attack mask keeps squares with a landing square two steps away

use once_cell::sync::Lazy;

use super::types::{Bitboard, Direction, Spot};

fn build_masks(steps: isize) -> [Bitboard; 4] {
    let mut masks = [Bitboard::EMPTY; 4];
    for dir in Direction::ALL {
        let (dr, dc) = dir.delta();
        masks[dir.index()] = Spot::all()
            .filter(|spot| {
                let row = spot.row() as isize + dr * steps;
                let col = spot.col() as isize + dc * steps;
                Spot::from_coords(row, col).is_some()
            })
            .collect();
    }
    masks
}

pub(crate) static MOVE_MASKS: Lazy<[Bitboard; 4]> = Lazy::new(|| build_masks(1));

pub(crate) static ATTACK_MASKS: Lazy<[Bitboard; 4]> = Lazy::new(|| build_masks(2));

/// Squares that have a neighbour one step in `dir`
#[inline]
pub(crate) fn move_mask(dir: Direction) -> Bitboard {
    MOVE_MASKS[dir.index()]
}

/// Squares that have a landing square two steps in `dir`
#[inline]
pub(crate) fn attack_mask(dir: Direction) -> Bitboard {
    ATTACK_MASKS[dir.index()]
}

/// Destinations one step from `from` in `dir`, with no wraparound.
#[inline]
pub(crate) fn step(from: Bitboard, dir: Direction) -> Bitboard {
    (from & move_mask(dir)).shift(dir)
}

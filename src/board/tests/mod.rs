//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `spots.rs` - Spot/bit translation tables
//! - `movegen.rs` - Legal move generation and the forced-capture rule
//! - `make_move.rs` - Move application, multi-jumps and promotion
//! - `fen.rs` - Position strings and move notation
//! - `edge_cases.rs` - Board snapshots, game end and rendering
//! - `proptest.rs` - Property-based tests

mod make_move;

use crate::board::{Move, MoveList, Spot};

pub(super) fn spot(index: u8) -> Spot {
    Spot::new(index).unwrap()
}

/// Moves as sorted `(from, to)` index pairs, kind dropped.
pub(super) fn pairs(moves: &MoveList) -> Vec<(u8, u8)> {
    let mut pairs: Vec<(u8, u8)> = moves
        .iter()
        .map(|mv: &Move| (mv.from().as_u8(), mv.to().as_u8()))
        .collect();
    pairs.sort_unstable();
    pairs
}

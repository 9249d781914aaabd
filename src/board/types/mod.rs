//! Core checkers types.
//!
//! This module contains the fundamental types used throughout the engine:
//! - `Spot` - external 0-31 square numbering, plus the spot/bit translation
//! - `Bitboard` - 32-bit board representation indexed by bit position
//! - `Direction` - the four diagonals, each a fixed word rotation
//! - `Color`, `PieceType`, `OccupiedSpot` - pieces and board listings
//! - `Move`, `MoveKind` and `MoveList` - move representation

mod bitboard;
mod direction;
mod moves;
mod piece;
mod spot;

pub use bitboard::{Bitboard, SpotIter};
pub use direction::Direction;
pub use moves::{Move, MoveKind, MoveList, MoveListIntoIter};
pub use piece::{Color, OccupiedSpot, PieceType};
pub use spot::{bit_to_spot, spot_to_bit, Spot, SPOTS_NUMBER};


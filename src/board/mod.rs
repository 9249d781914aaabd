//! Checkers board representation and game rules.
//!
//! The 32 playable squares live in one `u32`: every diagonal step is a
//! masked word rotation, so move generation works on whole bitboards.
//! Supports forced captures, multi-jumps and promotion of men to kings.
//!
//! # Example
//! ```
//! use checkers_relay::board::Position;
//!
//! let mut position = Position::starting();
//! let moves = position.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! position.apply_move(moves.as_slice()[0]);
//! ```

mod builder;
mod error;
mod fen;
mod make_move;
mod masks;
mod movegen;
pub mod prelude;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::PositionBuilder;
pub use error::{FenError, MoveParseError, SpotError};
pub use state::{GameStatus, Position};
pub use types::{
    bit_to_spot, spot_to_bit, Bitboard, Color, Direction, Move, MoveKind, MoveList,
    MoveListIntoIter, OccupiedSpot, PieceType, Spot, SpotIter, SPOTS_NUMBER,
};

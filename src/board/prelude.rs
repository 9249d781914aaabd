//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! # Example
//! ```
//! use checkers_relay::board::prelude::*;
//!
//! let position = Position::starting();
//! assert_eq!(position.turn(), Some(Color::White));
//! ```

pub use super::{
    Bitboard, Color, FenError, GameStatus, Move, MoveKind, MoveList, MoveParseError, PieceType,
    Position, PositionBuilder, Spot, SpotError,
};

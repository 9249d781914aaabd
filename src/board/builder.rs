//! Fluent builder for constructing checkers positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings.
//!
//! # Example
//! ```
//! use checkers_relay::board::{Color, PieceType, PositionBuilder, Spot};
//!
//! let position = PositionBuilder::new()
//!     .piece(Spot::new(21).unwrap(), Color::White, PieceType::Man)
//!     .piece(Spot::new(17).unwrap(), Color::Black, PieceType::Man)
//!     .side_to_move(Color::White)
//!     .build();
//! assert_eq!(position.legal_moves().len(), 1);
//! ```

use super::{Color, PieceType, Position, Spot};

/// A fluent builder for constructing `Position` values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Spot, Color, PieceType)>,
    side_to_move: Color,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty board builder with White to move.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        for color in Color::BOTH {
            for spot in color.start_squares() {
                builder.pieces.push((spot, color, PieceType::Man));
            }
        }
        builder
    }

    /// Place a piece, replacing any piece already on `spot`.
    #[must_use]
    pub fn piece(mut self, spot: Spot, color: Color, piece: PieceType) -> Self {
        self.pieces.retain(|(s, _, _)| *s != spot);
        self.pieces.push((spot, color, piece));
        self
    }

    /// Place a man on each spot index in `spots`; indices above 31 are ignored.
    #[must_use]
    pub fn men(self, color: Color, spots: &[u8]) -> Self {
        self.place_all(color, PieceType::Man, spots)
    }

    /// Place a king on each spot index in `spots`; indices above 31 are ignored.
    #[must_use]
    pub fn kings(self, color: Color, spots: &[u8]) -> Self {
        self.place_all(color, PieceType::King, spots)
    }

    fn place_all(self, color: Color, piece: PieceType, spots: &[u8]) -> Self {
        spots
            .iter()
            .filter_map(|&index| Spot::new(index))
            .fold(self, |builder, spot| builder.piece(spot, color, piece))
    }

    /// Remove a piece from a spot.
    #[must_use]
    pub fn clear(mut self, spot: Spot) -> Self {
        self.pieces.retain(|(s, _, _)| *s != spot);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Build the position.
    #[must_use]
    pub fn build(self) -> Position {
        let mut position = Position::new();
        for (spot, color, piece) in self.pieces {
            position.set_piece(spot, color, piece);
        }
        position.turn = Some(self.side_to_move);
        position
    }
}

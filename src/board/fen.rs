//! Textual position format and move parsing.
//!
//! Positions use the draughts FEN layout `W:W21,22,K23:B1-12`: the side to
//! move, then one section per color listing 1-based square numbers
//! (spot index + 1). A `K` prefix marks a king; `a-b` ranges are accepted
//! when parsing.

use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{Color, Move, PieceType, Position, Spot};

fn color_from_letter(letter: char) -> Option<Color> {
    match letter {
        'W' => Some(Color::White),
        'B' => Some(Color::Black),
        _ => None,
    }
}

fn color_letter(color: Color) -> char {
    match color {
        Color::White => 'W',
        Color::Black => 'B',
    }
}

/// Parse a 1-based square number into a spot.
fn parse_square(token: &str) -> Result<Spot, FenError> {
    token
        .parse::<u8>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(Spot::new)
        .ok_or_else(|| FenError::InvalidSquare {
            found: token.to_string(),
        })
}

/// Spots named by one list entry: a single square or an inclusive range.
fn parse_entry(token: &str) -> Result<Vec<Spot>, FenError> {
    match token.split_once('-') {
        None => Ok(vec![parse_square(token)?]),
        Some((first, last)) => {
            let (first, last) = (parse_square(first)?, parse_square(last)?);
            if first > last {
                return Err(FenError::InvalidSquare {
                    found: token.to_string(),
                });
            }
            Ok((first.as_u8()..=last.as_u8()).filter_map(Spot::new).collect())
        }
    }
}

impl Position {
    /// Parse a position from draughts FEN.
    ///
    /// Returns an error if the string is malformed or a square repeats.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.trim().split(':').collect();
        if parts.len() != 3 {
            return Err(FenError::WrongPartCount { found: parts.len() });
        }

        let mut position = Position::new();
        let mut turn = parts[0].trim().chars();
        position.turn = match (turn.next().and_then(color_from_letter), turn.next()) {
            (Some(color), None) => Some(color),
            _ => {
                return Err(FenError::InvalidSideToMove {
                    found: parts[0].to_string(),
                })
            }
        };

        let mut seen_colors = Vec::with_capacity(2);
        for section in &parts[1..] {
            let mut chars = section.trim().chars();
            let color = chars.next().and_then(color_from_letter);
            let rest = chars.as_str();
            let color = color.ok_or_else(|| FenError::InvalidColor {
                found: (*section).to_string(),
            })?;
            if seen_colors.contains(&color) {
                return Err(FenError::DuplicateColor {
                    color: color_letter(color),
                });
            }
            seen_colors.push(color);

            for token in rest.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let (piece, squares) = match token.strip_prefix('K') {
                    Some(squares) => (PieceType::King, squares),
                    None => (PieceType::Man, token),
                };
                for spot in parse_entry(squares)? {
                    if position.occupied().contains(spot) {
                        return Err(FenError::SquareTaken {
                            square: spot.as_u8() + 1,
                        });
                    }
                    position.set_piece(spot, color, piece);
                }
            }
        }
        Ok(position)
    }

    /// Draughts FEN of this position; the side to move defaults to White
    /// for a position that was never reset.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let turn = color_letter(self.turn.unwrap_or(Color::White));
        let mut fen = turn.to_string();
        for color in Color::BOTH {
            fen.push(':');
            fen.push(color_letter(color));
            let own = self.pieces(color);
            let mut spots: Vec<Spot> = own.iter().collect();
            spots.sort_unstable();
            let entries: Vec<String> = spots
                .into_iter()
                .map(|spot| {
                    let prefix = if self.kings.contains(spot) { "K" } else { "" };
                    format!("{prefix}{}", spot.as_u8() + 1)
                })
                .collect();
            fen.push_str(&entries.join(","));
        }
        fen
    }

    /// Parse a move in spot-index notation (`21-17`, `21x14`) and resolve
    /// its kind against the legal moves.
    pub fn parse_move(&self, notation: &str) -> Result<Move, MoveParseError> {
        let (from, to) = notation
            .split_once(|c: char| c == '-' || c == 'x')
            .ok_or_else(|| MoveParseError::InvalidFormat {
                notation: notation.to_string(),
            })?;

        let spot = |s: &str| {
            s.trim()
                .parse::<u8>()
                .ok()
                .and_then(Spot::new)
                .ok_or_else(|| MoveParseError::InvalidSpot {
                    notation: notation.to_string(),
                })
        };
        let (from, to) = (spot(from)?, spot(to)?);

        self.find_move(from, to)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: notation.to_string(),
            })
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

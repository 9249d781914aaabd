//! Error types for board operations.

use std::fmt;

/// Error type for spot index conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotError {
    /// Spot index is not in 0..32
    OutOfRange { index: u8 },
}

impl fmt::Display for SpotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotError::OutOfRange { index } => {
                write!(f, "Spot index {index} out of range (must be 0-31)")
            }
        }
    }
}

impl std::error::Error for SpotError {}

/// Error type for position string parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Position string must have exactly 3 colon-separated parts
    WrongPartCount { found: usize },
    /// Invalid side to move (must be 'W' or 'B')
    InvalidSideToMove { found: String },
    /// Piece section does not start with 'W' or 'B'
    InvalidColor { found: String },
    /// Both piece sections name the same color
    DuplicateColor { color: char },
    /// Square number is not a number in 1-32
    InvalidSquare { found: String },
    /// Same square listed twice
    SquareTaken { square: u8 },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongPartCount { found } => {
                write!(f, "Position must have 3 ':'-separated parts, found {found}")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'W' or 'B'")
            }
            FenError::InvalidColor { found } => {
                write!(f, "Invalid piece section '{found}', expected 'W' or 'B' prefix")
            }
            FenError::DuplicateColor { color } => {
                write!(f, "Piece section for '{color}' given twice")
            }
            FenError::InvalidSquare { found } => {
                write!(f, "Invalid square '{found}', expected 1-32")
            }
            FenError::SquareTaken { square } => {
                write!(f, "Square {square} listed more than once")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for textual move parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    /// Move is not of the form `from-to` or `fromxto`
    InvalidFormat { notation: String },
    /// A spot number is not a valid spot index
    InvalidSpot { notation: String },
    /// Move is not legal in the current position
    IllegalMove { notation: String },
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::InvalidFormat { notation } => {
                write!(f, "Move '{notation}' must look like '21-17' or '21x14'")
            }
            MoveParseError::InvalidSpot { notation } => {
                write!(f, "Invalid spot in '{notation}'")
            }
            MoveParseError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for MoveParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_error_mentions_index() {
        let err = SpotError::OutOfRange { index: 40 };
        assert!(err.to_string().contains("40"));
    }

    #[test]
    fn test_fen_error_part_count() {
        let err = FenError::WrongPartCount { found: 2 };
        assert!(err.to_string().contains('2'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_fen_error_invalid_square() {
        let err = FenError::InvalidSquare {
            found: "33".to_string(),
        };
        assert!(err.to_string().contains("'33'"));
    }

    #[test]
    fn test_move_error_illegal_move() {
        let err = MoveParseError::IllegalMove {
            notation: "21-16".to_string(),
        };
        assert!(err.to_string().contains("21-16"));
    }

    #[test]
    fn test_error_clone() {
        let err = FenError::SquareTaken { square: 5 };
        assert_eq!(err.clone(), err);
    }
}

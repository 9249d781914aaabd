pub mod board;
pub mod logging;
pub mod protocol;
pub mod server;
pub mod sync;

pub use board::{Color, Move, MoveKind, PieceType, Position, Spot};
pub use server::{Server, ServerConfig};

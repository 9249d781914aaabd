//! Two-player relay server.
//!
//! A player opens a lobby and receives its id; a second player joins with
//! that id and a `GameSession` referees the game between them, relaying
//! every legal move and ending the game on the first illegal one.

mod config;
mod listener;
mod lobby;
mod session;

pub use config::{ConfigError, ServerConfig, DEFAULT_PORT, USAGE};
pub use listener::Server;
pub use lobby::LobbyRegistry;
pub use session::{GameSession, SessionOutcome};

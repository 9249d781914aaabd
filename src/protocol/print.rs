//! Human-readable rendering of protocol messages for logs.
//!
//! Format: `MOVE (3 bytes) [from: 21, to: 17, move_type: NORMAL]`.

use std::fmt;

use super::{ErrorCode, Frame, Handshake, Message, MessageType};

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageType::Handshake => "HANDSHAKE",
            MessageType::LobbyCreated => "LOBBY_CREATED",
            MessageType::Disconnect => "DISCONNECT",
            MessageType::Move => "MOVE",
            MessageType::Resign => "RESIGN",
            MessageType::Error => "ERROR",
            MessageType::GameStarted => "GAME_STARTED",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::LobbyNotExists => "LOBBY_NOT_EXISTS",
            ErrorCode::OpponentDisconnected => "OPPONENT_DISCONNECTED",
            ErrorCode::ServerDisconnected => "SERVER_DISCONNECTED",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::InvalidMove => "INVALID_MOVE",
        };
        f.write_str(name)
    }
}

fn write_details(f: &mut fmt::Formatter<'_>, message: &Message) -> fmt::Result {
    match message {
        Message::Handshake(Handshake::CreateSession) => write!(f, "CREATE_SESSION"),
        Message::Handshake(Handshake::ConnectToSession { lobby_id }) => {
            write!(f, "CONNECT_TO_SESSION, lobby_id: {lobby_id}")
        }
        Message::LobbyCreated { lobby_id } => write!(f, "lobby_id: {lobby_id}"),
        Message::Move(mv) => write!(
            f,
            "from: {}, to: {}, move_type: {}",
            mv.from(),
            mv.to(),
            mv.kind()
        ),
        Message::Error(code) => write!(f, "{code}"),
        Message::GameStarted(flags) if flags.is_white() => write!(f, "IM_WHITE"),
        Message::GameStarted(_) | Message::Disconnect | Message::Resign => Ok(()),
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.encode().len;
        write!(f, "{} ({len} bytes) [", self.message_type())?;
        write_details(f, self)?;
        write!(f, "]")
    }
}

/// Renders the decoded message, or the raw bytes when it does not decode.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match MessageType::try_from(self.message_type) {
            Ok(kind) => write!(f, "{kind} ({} bytes) [", self.len)?,
            Err(_) => write!(f, "UNKNOWN({}) ({} bytes) [", self.message_type, self.len)?,
        }
        match Message::decode(self) {
            Ok(message) => write_details(f, &message)?,
            Err(_) => {
                let raw: Vec<String> = self.payload().iter().map(|b| format!("{b:02x}")).collect();
                write!(f, "raw: {}", raw.join(" "))?;
            }
        }
        write!(f, "]")
    }
}

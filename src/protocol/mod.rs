//! Binary wire protocol shared by the relay server and its clients.
//!
//! Every message travels as a small frame: one type byte, one length byte
//! and up to `MAX_PAYLOAD_LEN` payload bytes. Lobby ids are big-endian.

mod codec;
mod error;
mod print;

pub use codec::{read_frame, read_message, write_frame, write_message};
pub use error::ProtocolError;

use crate::board::{Move, MoveKind, Spot};

/// Largest payload a frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 10;
/// Type byte plus length byte.
pub const HEADER_LEN: usize = 2;

/// Message type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Handshake = 0,
    LobbyCreated = 1,
    Disconnect = 2,
    Move = 3,
    Resign = 4,
    Error = 5,
    GameStarted = 6,
}

impl TryFrom<u8> for MessageType {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        Ok(match value {
            0 => MessageType::Handshake,
            1 => MessageType::LobbyCreated,
            2 => MessageType::Disconnect,
            3 => MessageType::Move,
            4 => MessageType::Resign,
            5 => MessageType::Error,
            6 => MessageType::GameStarted,
            other => return Err(ProtocolError::UnknownMessageType(other)),
        })
    }
}

/// Error code carried by an ERROR message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    LobbyNotExists = 0,
    OpponentDisconnected = 1,
    ServerDisconnected = 2,
    ServerError = 3,
    InvalidMove = 4,
}

impl TryFrom<u8> for ErrorCode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, ProtocolError> {
        Ok(match value {
            0 => ErrorCode::LobbyNotExists,
            1 => ErrorCode::OpponentDisconnected,
            2 => ErrorCode::ServerDisconnected,
            3 => ErrorCode::ServerError,
            4 => ErrorCode::InvalidMove,
            other => return Err(ProtocolError::UnknownErrorCode(other)),
        })
    }
}

/// First message a client sends: open a lobby or join one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handshake {
    CreateSession,
    ConnectToSession { lobby_id: u32 },
}

impl Handshake {
    const CREATE_SESSION: u8 = 0;
    const CONNECT_TO_SESSION: u8 = 1;
}

/// GAME_STARTED flag byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct GameFlags(u8);

impl GameFlags {
    pub const NONE: GameFlags = GameFlags(0);
    /// The receiving peer plays White and moves first.
    pub const IM_WHITE: GameFlags = GameFlags(1);

    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        GameFlags(bits)
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_white(self) -> bool {
        self.0 & Self::IM_WHITE.0 != 0
    }
}

/// One undecoded frame as read from or written to the wire.
///
/// The type byte is kept raw so frames of unknown type can still be
/// logged and relayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub(crate) message_type: u8,
    pub(crate) len: u8,
    pub(crate) payload: [u8; MAX_PAYLOAD_LEN],
}

impl Frame {
    fn with_payload(message_type: MessageType, bytes: &[u8]) -> Self {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        payload[..bytes.len()].copy_from_slice(bytes);
        Frame {
            message_type: message_type as u8,
            len: bytes.len() as u8,
            payload,
        }
    }

    #[inline]
    #[must_use]
    pub const fn raw_type(&self) -> u8 {
        self.message_type
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload[..usize::from(self.len)]
    }
}

/// A decoded protocol message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    Handshake(Handshake),
    LobbyCreated { lobby_id: u32 },
    Disconnect,
    Move(Move),
    Resign,
    Error(ErrorCode),
    GameStarted(GameFlags),
}

fn require(payload: &[u8], message: MessageType, needed: usize) -> Result<(), ProtocolError> {
    if payload.len() < needed {
        return Err(ProtocolError::ShortPayload {
            message,
            len: payload.len() as u8,
        });
    }
    Ok(())
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

impl Message {
    #[must_use]
    pub const fn message_type(&self) -> MessageType {
        match self {
            Message::Handshake(_) => MessageType::Handshake,
            Message::LobbyCreated { .. } => MessageType::LobbyCreated,
            Message::Disconnect => MessageType::Disconnect,
            Message::Move(_) => MessageType::Move,
            Message::Resign => MessageType::Resign,
            Message::Error(_) => MessageType::Error,
            Message::GameStarted(_) => MessageType::GameStarted,
        }
    }

    #[must_use]
    pub fn encode(&self) -> Frame {
        let kind = self.message_type();
        match *self {
            Message::Handshake(Handshake::CreateSession) => {
                Frame::with_payload(kind, &[Handshake::CREATE_SESSION])
            }
            Message::Handshake(Handshake::ConnectToSession { lobby_id }) => {
                let id = lobby_id.to_be_bytes();
                Frame::with_payload(kind, &[Handshake::CONNECT_TO_SESSION, id[0], id[1], id[2], id[3]])
            }
            Message::LobbyCreated { lobby_id } => Frame::with_payload(kind, &lobby_id.to_be_bytes()),
            Message::Move(mv) => Frame::with_payload(
                kind,
                &[mv.from().as_u8(), mv.to().as_u8(), mv.kind().bits()],
            ),
            Message::Error(code) => Frame::with_payload(kind, &[code as u8]),
            Message::GameStarted(flags) => Frame::with_payload(kind, &[flags.bits()]),
            Message::Disconnect | Message::Resign => Frame::with_payload(kind, &[]),
        }
    }

    /// Decode a frame. Extra payload bytes beyond what a type needs are ignored.
    pub fn decode(frame: &Frame) -> Result<Self, ProtocolError> {
        let kind = MessageType::try_from(frame.message_type)?;
        let payload = frame.payload();
        Ok(match kind {
            MessageType::Handshake => {
                require(payload, kind, 1)?;
                match payload[0] {
                    Handshake::CREATE_SESSION => Message::Handshake(Handshake::CreateSession),
                    Handshake::CONNECT_TO_SESSION => {
                        require(payload, kind, 5)?;
                        Message::Handshake(Handshake::ConnectToSession {
                            lobby_id: read_u32(&payload[1..5]),
                        })
                    }
                    other => return Err(ProtocolError::UnknownHandshake(other)),
                }
            }
            MessageType::LobbyCreated => {
                require(payload, kind, 4)?;
                Message::LobbyCreated {
                    lobby_id: read_u32(payload),
                }
            }
            MessageType::Disconnect => Message::Disconnect,
            MessageType::Move => {
                require(payload, kind, 3)?;
                let (from, to, bits) = (payload[0], payload[1], payload[2]);
                let invalid = || ProtocolError::InvalidMove { from, to, kind: bits };
                let from_spot = Spot::new(from).ok_or_else(invalid)?;
                let to_spot = Spot::new(to).ok_or_else(invalid)?;
                let move_kind = MoveKind::from_bits(bits).ok_or_else(invalid)?;
                Message::Move(Move::new(from_spot, to_spot, move_kind))
            }
            MessageType::Resign => Message::Resign,
            MessageType::Error => {
                require(payload, kind, 1)?;
                Message::Error(ErrorCode::try_from(payload[0])?)
            }
            MessageType::GameStarted => {
                require(payload, kind, 1)?;
                Message::GameStarted(GameFlags::from_bits(payload[0]))
            }
        })
    }
}

impl From<Message> for Frame {
    fn from(message: Message) -> Self {
        message.encode()
    }
}

impl TryFrom<&Frame> for Message {
    type Error = ProtocolError;

    fn try_from(frame: &Frame) -> Result<Self, ProtocolError> {
        Message::decode(frame)
    }
}

//! Error type for the wire protocol.

use std::fmt;
use std::io;

use super::MessageType;

/// Error type for reading, writing and decoding frames
#[derive(Debug)]
pub enum ProtocolError {
    /// Underlying socket failure
    Io(io::Error),
    /// Peer closed the stream cleanly between frames
    Closed,
    /// Stream ended in the middle of a frame
    Truncated,
    /// Declared payload length exceeds the frame capacity
    PayloadTooLong { len: u8 },
    /// Message type byte is not a known type
    UnknownMessageType(u8),
    /// ERROR payload carries an unknown code
    UnknownErrorCode(u8),
    /// HANDSHAKE payload carries an unknown kind
    UnknownHandshake(u8),
    /// Payload is shorter than its message type requires
    ShortPayload { message: MessageType, len: u8 },
    /// MOVE payload names a spot or kind that does not exist
    InvalidMove { from: u8, to: u8, kind: u8 },
}

impl ProtocolError {
    /// True when the peer went away rather than sending garbage.
    #[must_use]
    pub fn is_disconnect(&self) -> bool {
        matches!(self, ProtocolError::Io(_) | ProtocolError::Closed | ProtocolError::Truncated)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Io(e) => write!(f, "I/O error: {e}"),
            ProtocolError::Closed => write!(f, "Connection closed by peer"),
            ProtocolError::Truncated => write!(f, "Connection closed in the middle of a frame"),
            ProtocolError::PayloadTooLong { len } => {
                write!(f, "Payload length {len} exceeds {} bytes", super::MAX_PAYLOAD_LEN)
            }
            ProtocolError::UnknownMessageType(t) => write!(f, "Unknown message type {t}"),
            ProtocolError::UnknownErrorCode(c) => write!(f, "Unknown error code {c}"),
            ProtocolError::UnknownHandshake(h) => write!(f, "Unknown handshake type {h}"),
            ProtocolError::ShortPayload { message, len } => {
                write!(f, "{message} payload too short ({len} bytes)")
            }
            ProtocolError::InvalidMove { from, to, kind } => {
                write!(f, "Invalid move encoding from {from} to {to} kind {kind}")
            }
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ProtocolError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => ProtocolError::Truncated,
            _ => ProtocolError::Io(e),
        }
    }
}

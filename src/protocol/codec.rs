//! Frame transport over any byte stream.
//!
//! A frame is `[type, len, payload[len]]` with `len <= MAX_PAYLOAD_LEN`.

use std::io::{ErrorKind, Read, Write};

use super::{Frame, Message, ProtocolError, HEADER_LEN, MAX_PAYLOAD_LEN};

/// Read one frame. A clean end of stream before the first byte is
/// `Closed`; anywhere later it is `Truncated`.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Frame, ProtocolError> {
    let mut header = [0u8; HEADER_LEN];
    loop {
        match reader.read(&mut header[..1]) {
            Ok(0) => return Err(ProtocolError::Closed),
            Ok(_) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    reader.read_exact(&mut header[1..])?;

    let [message_type, len] = header;
    if usize::from(len) > MAX_PAYLOAD_LEN {
        return Err(ProtocolError::PayloadTooLong { len });
    }
    let mut payload = [0u8; MAX_PAYLOAD_LEN];
    reader.read_exact(&mut payload[..usize::from(len)])?;
    Ok(Frame {
        message_type,
        len,
        payload,
    })
}

/// Write one frame with a single `write_all` and flush.
pub fn write_frame<W: Write>(writer: &mut W, frame: &Frame) -> Result<(), ProtocolError> {
    let mut buf = [0u8; HEADER_LEN + MAX_PAYLOAD_LEN];
    let len = usize::from(frame.len);
    buf[0] = frame.message_type;
    buf[1] = frame.len;
    buf[HEADER_LEN..HEADER_LEN + len].copy_from_slice(frame.payload());
    writer.write_all(&buf[..HEADER_LEN + len])?;
    writer.flush()?;
    Ok(())
}

/// Read and decode one message.
pub fn read_message<R: Read>(reader: &mut R) -> Result<Message, ProtocolError> {
    Message::decode(&read_frame(reader)?)
}

/// Encode and write one message.
pub fn write_message<W: Write>(writer: &mut W, message: &Message) -> Result<(), ProtocolError> {
    write_frame(writer, &message.encode())
}

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{ProtoError, Result};
use crate::opcode::Status;

/// Fixed part of every reply: length prefix (4) + status (1).
pub const REPLY_HEADER_SIZE: usize = 5;

/// One decoded PINE reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Result code reported by the peer.
    pub status: Status,
    /// Payload bytes after the status byte. Interpretation (width,
    /// string encoding) is the caller's concern.
    pub payload: Bytes,
}

impl Reply {
    /// Total wire size of this reply, length prefix included.
    #[must_use]
    pub fn wire_size(&self) -> usize {
        REPLY_HEADER_SIZE + self.payload.len()
    }
}

/// Decode a reply from a buffer.
///
/// Returns `Ok(None)` while the buffer holds less than the declared
/// length. The declared length is validated against `max_size` as soon
/// as the 4-byte prefix is available, before any payload is buffered.
/// On success, consumes the reply bytes from the buffer.
pub fn decode_reply(src: &mut BytesMut, max_size: usize) -> Result<Option<Reply>> {
    if src.len() < 4 {
        return Ok(None);
    }

    let total = u32::from_le_bytes(src[0..4].try_into().expect("slice is 4 bytes")) as usize;
    if total > max_size {
        return Err(ProtoError::ReplyTooLarge {
            size: total,
            max: max_size,
        });
    }
    if total < REPLY_HEADER_SIZE {
        return Err(ProtoError::MalformedReply { len: total });
    }
    if src.len() < total {
        return Ok(None);
    }

    let status = Status::from_u8(src[4]);
    src.advance(REPLY_HEADER_SIZE);
    let payload = src.split_to(total - REPLY_HEADER_SIZE).freeze();

    Ok(Some(Reply { status, payload }))
}

/// Encode a reply into the wire format, appending to `dst`.
///
/// The client never sends replies; this is the peer half of the codec,
/// used by test harnesses standing in for the emulator.
pub fn encode_reply(status: Status, payload: &[u8], dst: &mut BytesMut) {
    let total = REPLY_HEADER_SIZE + payload.len();
    dst.reserve(total);
    dst.put_u32_le(total as u32);
    dst.put_u8(status.as_u8());
    dst.put_slice(payload);
}

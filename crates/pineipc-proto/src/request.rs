use bytes::{Buf, BufMut, BytesMut};

use crate::error::{ProtoError, Result};
use crate::opcode::{DataSize, Opcode};
use crate::MAX_REQUEST_SIZE;

/// Fixed part of every request: length prefix (4) + opcode (1) + address (4).
pub const REQUEST_HEADER_SIZE: usize = 9;

/// One PINE request, built per call and discarded after sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Command to execute.
    pub opcode: Opcode,
    /// Target address in emulated memory. Zero for metadata commands;
    /// range checking is the peer's concern.
    pub address: u32,
    /// Write operand, present only for write opcodes.
    pub payload: Option<(DataSize, u64)>,
}

impl Request {
    /// Build a memory read request.
    #[must_use]
    pub fn read(size: DataSize, address: u32) -> Self {
        Self {
            opcode: size.read_opcode(),
            address,
            payload: None,
        }
    }

    /// Build a memory write request. The value is truncated to the
    /// operand width when encoded.
    #[must_use]
    pub fn write(size: DataSize, address: u32, value: u64) -> Self {
        Self {
            opcode: size.write_opcode(),
            address,
            payload: Some((size, value)),
        }
    }

    /// Build a zero-payload metadata request (VERSION, TITLE, ...).
    #[must_use]
    pub fn command(opcode: Opcode) -> Self {
        Self {
            opcode,
            address: 0,
            payload: None,
        }
    }

    /// Total wire size of this request, length prefix included.
    ///
    /// This is the single source of truth for the `total_length` field:
    /// 9 for reads and metadata commands, 9 + width for writes.
    #[must_use]
    pub fn wire_size(&self) -> usize {
        REQUEST_HEADER_SIZE + self.payload.map_or(0, |(size, _)| size.bytes())
    }

    /// Encode into the wire format, appending to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        let total = self.wire_size();
        if total > MAX_REQUEST_SIZE {
            return Err(ProtoError::RequestTooLarge {
                size: total,
                max: MAX_REQUEST_SIZE,
            });
        }
        dst.reserve(total);
        dst.put_u32_le(total as u32);
        dst.put_u8(self.opcode.as_u8());
        dst.put_u32_le(self.address);
        if let Some((size, value)) = self.payload {
            dst.put_slice(&value.to_le_bytes()[..size.bytes()]);
        }
        Ok(())
    }
}

/// Decode one request from a buffer.
///
/// Returns `Ok(None)` if the buffer does not hold a complete request
/// yet. On success, consumes the request bytes from the buffer. The
/// payload width is taken from the opcode, and the declared length must
/// agree with it.
pub fn decode_request(src: &mut BytesMut) -> Result<Option<Request>> {
    if src.len() < REQUEST_HEADER_SIZE {
        return Ok(None);
    }

    let total = u32::from_le_bytes(src[0..4].try_into().expect("slice is 4 bytes")) as usize;
    if total > MAX_REQUEST_SIZE {
        return Err(ProtoError::RequestTooLarge {
            size: total,
            max: MAX_REQUEST_SIZE,
        });
    }

    let opcode = Opcode::from_u8(src[4]).ok_or(ProtoError::InvalidOpcode { byte: src[4] })?;
    let expected = REQUEST_HEADER_SIZE
        + if opcode.is_write() {
            opcode.width().map_or(0, DataSize::bytes)
        } else {
            0
        };
    if total != expected {
        return Err(ProtoError::MalformedRequest { len: total });
    }
    if src.len() < total {
        return Ok(None);
    }

    let address = u32::from_le_bytes(src[5..9].try_into().expect("slice is 4 bytes"));
    let payload = if opcode.is_write() {
        let size = opcode.width().expect("write opcodes carry a width");
        let mut raw = [0u8; 8];
        raw[..size.bytes()].copy_from_slice(&src[9..9 + size.bytes()]);
        Some((size, u64::from_le_bytes(raw)))
    } else {
        None
    };

    src.advance(total);
    Ok(Some(Request {
        opcode,
        address,
        payload,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_request_layout() {
        let mut buf = BytesMut::new();
        Request::read(DataSize::U32, 0x0044_D8A0).encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 9);
        assert_eq!(&buf[0..4], &9u32.to_le_bytes());
        assert_eq!(buf[4], Opcode::Read32.as_u8());
        assert_eq!(&buf[5..9], &0x0044_D8A0u32.to_le_bytes());
    }

    #[test]
    fn write_request_layout() {
        let mut buf = BytesMut::new();
        Request::write(DataSize::U16, 0x1000, 0xBEEF).encode(&mut buf).unwrap();

        assert_eq!(buf.len(), 11);
        assert_eq!(&buf[0..4], &11u32.to_le_bytes());
        assert_eq!(buf[4], Opcode::Write16.as_u8());
        assert_eq!(&buf[5..9], &0x1000u32.to_le_bytes());
        assert_eq!(&buf[9..11], &0xBEEFu16.to_le_bytes());
    }

    #[test]
    fn write_value_truncated_to_width() {
        let mut buf = BytesMut::new();
        Request::write(DataSize::U8, 0, 0x1234).encode(&mut buf).unwrap();
        assert_eq!(buf[9], 0x34);
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn metadata_request_is_nine_bytes() {
        let mut buf = BytesMut::new();
        Request::command(Opcode::Title).encode(&mut buf).unwrap();
        assert_eq!(buf.len(), 9);
        assert_eq!(buf[4], Opcode::Title.as_u8());
        assert_eq!(&buf[5..9], &[0, 0, 0, 0]);
    }

    #[test]
    fn encode_decode_roundtrip_all_commands() {
        let mut requests = vec![
            Request::command(Opcode::Version),
            Request::command(Opcode::Status),
            Request::command(Opcode::SaveState),
        ];
        for size in DataSize::ALL {
            requests.push(Request::read(size, 0xCAFE_F00D));
            requests.push(Request::write(size, 0x0012_3456, 0x0102_0304_0506_0708));
        }

        for req in requests {
            let mut buf = BytesMut::new();
            req.encode(&mut buf).unwrap();
            let decoded = decode_request(&mut buf).unwrap().unwrap();

            assert_eq!(decoded.opcode, req.opcode);
            assert_eq!(decoded.address, req.address);
            if let Some((size, value)) = req.payload {
                let (dsize, dvalue) = decoded.payload.unwrap();
                assert_eq!(dsize, size);
                // Truncation to the operand width is part of the format.
                let mask = if size.bytes() == 8 {
                    u64::MAX
                } else {
                    (1u64 << (size.bytes() * 8)) - 1
                };
                assert_eq!(dvalue, value & mask);
            } else {
                assert!(decoded.payload.is_none());
            }
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn decode_incomplete_request() {
        let mut buf = BytesMut::new();
        Request::write(DataSize::U64, 1, 2).encode(&mut buf).unwrap();
        buf.truncate(12);
        assert!(decode_request(&mut buf).unwrap().is_none());
    }

    #[test]
    fn decode_rejects_unknown_opcode() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(9);
        buf.put_u8(0x42);
        buf.put_u32_le(0);
        assert!(matches!(
            decode_request(&mut buf),
            Err(ProtoError::InvalidOpcode { byte: 0x42 })
        ));
    }

    #[test]
    fn decode_rejects_inconsistent_length() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(10); // READ32 must be exactly 9
        buf.put_u8(Opcode::Read32.as_u8());
        buf.put_u32_le(0);
        buf.put_u8(0);
        assert!(decode_request(&mut buf).is_err());
    }
}

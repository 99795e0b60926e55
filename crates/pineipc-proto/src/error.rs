/// Errors that can occur while encoding or decoding PINE frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// The opcode byte does not name a known command.
    #[error("unknown opcode {byte:#04x}")]
    InvalidOpcode { byte: u8 },

    /// The requested operand width is not one of 1, 2, 4 or 8 bytes.
    #[error("invalid data size ({bytes} bytes, expected 1, 2, 4 or 8)")]
    InvalidDataSize { bytes: usize },

    /// The request exceeds the protocol's maximum message size.
    #[error("request too large ({size} bytes, max {max})")]
    RequestTooLarge { size: usize, max: usize },

    /// The request's declared length disagrees with its opcode.
    #[error("malformed request (declared length {len} does not match opcode)")]
    MalformedRequest { len: usize },

    /// The reply's declared length exceeds the configured maximum.
    #[error("reply too large ({size} bytes, max {max})")]
    ReplyTooLarge { size: usize, max: usize },

    /// The reply's declared length cannot hold its own header.
    #[error("malformed reply (declared length {len}, minimum 5)")]
    MalformedReply { len: usize },
}

pub type Result<T> = std::result::Result<T, ProtoError>;

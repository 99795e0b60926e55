use pineipc_proto::ProtoError;

/// Errors surfaced by [`crate::PineClient`] operations.
///
/// `ConnectionLost`, `InvalidResponse` and `OversizedResponse` all
/// reset the connection; the next call attempts a lazy reconnect.
/// `ResponseTimeout` leaves the connection as-is. A failed reconnect
/// attempt itself is never surfaced — the call that needed it fails
/// with `ConnectionLost` and the one after retries.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Slot outside `1..=65536`, rejected at construction.
    #[error("slot {slot} is outside the valid range (1..=65536)")]
    InvalidSlot { slot: u32 },

    /// Protocol-level encoding/decoding error (includes unsupported
    /// operand widths).
    #[error("protocol error: {0}")]
    Proto(#[from] ProtoError),

    /// Transport-level send or receive failure; the connection has
    /// been marked disconnected.
    #[error("lost connection to the emulator: {0}")]
    ConnectionLost(std::io::Error),

    /// The peer closed the stream before a complete reply arrived, or
    /// the reply frame was inconsistent.
    #[error("invalid response from the emulator")]
    InvalidResponse,

    /// The reply's declared length exceeds the maximum reply size;
    /// treated as a protocol violation.
    #[error("oversized response from the emulator ({size} bytes, max {max})")]
    OversizedResponse { size: usize, max: usize },

    /// No complete reply within the receive timeout.
    #[error(
        "response timed out; this can be caused by two clients connected to the same slot"
    )]
    ResponseTimeout,

    /// The reply arrived intact but the peer reported failure.
    #[error("emulator reported failure for {opcode}")]
    PeerFailure { opcode: pineipc_proto::Opcode },
}

impl ClientError {
    /// Whether this failure invalidates the transport handle.
    /// Timeouts leave the connection as-is; the caller may retry on
    /// the same stream.
    pub(crate) fn resets_connection(&self) -> bool {
        matches!(
            self,
            Self::ConnectionLost(_) | Self::InvalidResponse | Self::OversizedResponse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

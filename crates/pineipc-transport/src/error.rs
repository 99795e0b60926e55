/// Errors that can occur in PINE transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to connect to the resolved endpoint.
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        source: std::io::Error,
    },

    /// The slot does not fit a TCP port on the loopback transport.
    #[error("slot {slot} is not a valid loopback port (max 65535)")]
    PortOutOfRange { slot: u32 },

    /// An I/O error occurred on the transport stream.
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;

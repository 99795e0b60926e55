use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tracing::{debug, warn};

use pineipc_proto::{
    decode_reply, DataSize, Opcode, ProtoError, Reply, Request, Status, MAX_REPLY_SIZE,
};
use pineipc_transport::{Endpoint, PineStream};

use crate::connection::{Connection, ConnectionState};
use crate::error::{ClientError, Result};

/// Default slot the emulator listens on.
pub const DEFAULT_SLOT: u32 = 28011;

/// Default connect and receive timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

const READ_CHUNK_SIZE: usize = 4096;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Slot number selecting the emulator instance, `1..=65536`.
    pub slot: u32,
    /// Connect and receive timeout.
    pub timeout: Duration,
    /// Explicit endpoint, overriding platform resolution. Mainly for
    /// tests and non-standard socket locations.
    pub endpoint: Option<Endpoint>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT,
            timeout: DEFAULT_TIMEOUT,
            endpoint: None,
        }
    }
}

/// Blocking PINE client.
///
/// One client owns one connection, established lazily on first use and
/// re-established transparently after a detected fault. Every
/// operation takes `&mut self`, so a connection can only ever carry
/// one in-flight request.
///
/// Failed calls are never retried internally; the caller decides
/// whether to re-invoke, which triggers the lazy reconnect.
#[derive(Debug)]
pub struct PineClient {
    connection: Connection,
    send_buf: BytesMut,
    recv_buf: BytesMut,
}

impl PineClient {
    /// Create a client for a slot with default settings.
    pub fn new(slot: u32) -> Result<Self> {
        Self::with_config(ClientConfig {
            slot,
            ..ClientConfig::default()
        })
    }

    /// Create a client with explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        if config.slot == 0 || config.slot > 65536 {
            return Err(ClientError::InvalidSlot { slot: config.slot });
        }
        let endpoint = config
            .endpoint
            .unwrap_or_else(|| Endpoint::resolve(config.slot));
        Ok(Self {
            connection: Connection::new(endpoint, config.timeout),
            send_buf: BytesMut::new(),
            recv_buf: BytesMut::with_capacity(READ_CHUNK_SIZE),
        })
    }

    /// Current connection lifecycle state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Read `size` bytes of emulated memory at `address`.
    ///
    /// Returns the raw little-endian payload; the typed helpers below
    /// do the integer decoding.
    pub fn read(&mut self, size: DataSize, address: u32) -> Result<Bytes> {
        let reply = self.exchange(Request::read(size, address))?;
        Ok(reply.payload)
    }

    /// Read one byte at `address`.
    pub fn read_u8(&mut self, address: u32) -> Result<u8> {
        let payload = self.read(DataSize::U8, address)?;
        payload.first().copied().ok_or(ClientError::InvalidResponse)
    }

    /// Read a little-endian u16 at `address`.
    pub fn read_u16(&mut self, address: u32) -> Result<u16> {
        let payload = self.read(DataSize::U16, address)?;
        Ok(u16::from_le_bytes(take_exact(&payload)?))
    }

    /// Read a little-endian u32 at `address`.
    pub fn read_u32(&mut self, address: u32) -> Result<u32> {
        let payload = self.read(DataSize::U32, address)?;
        Ok(u32::from_le_bytes(take_exact(&payload)?))
    }

    /// Read a little-endian u64 at `address`.
    pub fn read_u64(&mut self, address: u32) -> Result<u64> {
        let payload = self.read(DataSize::U64, address)?;
        Ok(u64::from_le_bytes(take_exact(&payload)?))
    }

    /// Write `value` to emulated memory at `address`, truncated to
    /// `size`.
    pub fn write(&mut self, size: DataSize, address: u32, value: u64) -> Result<()> {
        self.exchange(Request::write(size, address, value))?;
        Ok(())
    }

    /// Write one byte at `address`.
    pub fn write_u8(&mut self, address: u32, value: u8) -> Result<()> {
        self.write(DataSize::U8, address, u64::from(value))
    }

    /// Write a little-endian u16 at `address`.
    pub fn write_u16(&mut self, address: u32, value: u16) -> Result<()> {
        self.write(DataSize::U16, address, u64::from(value))
    }

    /// Write a little-endian u32 at `address`.
    pub fn write_u32(&mut self, address: u32, value: u32) -> Result<()> {
        self.write(DataSize::U32, address, u64::from(value))
    }

    /// Write a little-endian u64 at `address`.
    pub fn write_u64(&mut self, address: u32, value: u64) -> Result<()> {
        self.write(DataSize::U64, address, value)
    }

    /// Issue a zero-payload metadata command and return the raw reply
    /// payload. Interpretation is the caller's concern.
    pub fn command(&mut self, opcode: Opcode) -> Result<Bytes> {
        let reply = self.exchange(Request::command(opcode))?;
        Ok(reply.payload)
    }

    /// Emulator version string payload.
    pub fn version(&mut self) -> Result<Bytes> {
        self.command(Opcode::Version)
    }

    /// Running game's title payload.
    pub fn title(&mut self) -> Result<Bytes> {
        self.command(Opcode::Title)
    }

    /// Running game's serial ID payload.
    pub fn game_id(&mut self) -> Result<Bytes> {
        self.command(Opcode::Id)
    }

    /// Running game's UUID/CRC payload.
    pub fn game_uuid(&mut self) -> Result<Bytes> {
        self.command(Opcode::Uuid)
    }

    /// Running game's version payload.
    pub fn game_version(&mut self) -> Result<Bytes> {
        self.command(Opcode::GameVersion)
    }

    /// Emulation status payload.
    pub fn status(&mut self) -> Result<Bytes> {
        self.command(Opcode::Status)
    }

    /// Ask the emulator to save state.
    pub fn save_state(&mut self) -> Result<()> {
        self.command(Opcode::SaveState)?;
        Ok(())
    }

    /// Ask the emulator to load state.
    pub fn load_state(&mut self) -> Result<()> {
        self.command(Opcode::LoadState)?;
        Ok(())
    }

    /// One request/response exchange, with the full connectivity and
    /// framing policy applied.
    fn exchange(&mut self, request: Request) -> Result<Reply> {
        self.connection.ensure_connected();

        self.send_buf.clear();
        request.encode(&mut self.send_buf)?;
        self.recv_buf.clear();

        let stream = self
            .connection
            .stream_mut()
            .map_err(ClientError::ConnectionLost)?;

        debug!(opcode = %request.opcode, address = request.address, "sending request");
        let result = transact(stream, &self.send_buf, &mut self.recv_buf);

        if let Err(err) = &result {
            if err.resets_connection() {
                warn!(opcode = %request.opcode, %err, "exchange failed");
                self.connection.reset();
            }
        }
        let reply = result?;

        if reply.status == Status::Fail {
            // Frame was intact; the operation failed on the peer side.
            // The payload carries nothing meaningful and is discarded.
            return Err(ClientError::PeerFailure {
                opcode: request.opcode,
            });
        }
        Ok(reply)
    }
}

/// Send one encoded request and block until a complete reply frame is
/// assembled or a terminal condition is reached.
fn transact(stream: &mut PineStream, request: &[u8], recv_buf: &mut BytesMut) -> Result<Reply> {
    let mut offset = 0usize;
    while offset < request.len() {
        match stream.write(&request[offset..]) {
            Ok(0) => {
                return Err(ClientError::ConnectionLost(std::io::Error::new(
                    ErrorKind::WriteZero,
                    "emulator closed the connection",
                )))
            }
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ClientError::ConnectionLost(err)),
        }
    }
    if let Err(err) = stream.flush() {
        return Err(ClientError::ConnectionLost(err));
    }

    loop {
        match decode_reply(recv_buf, MAX_REPLY_SIZE) {
            Ok(Some(reply)) => return Ok(reply),
            Ok(None) => {}
            Err(ProtoError::ReplyTooLarge { size, max }) => {
                return Err(ClientError::OversizedResponse { size, max })
            }
            Err(_) => return Err(ClientError::InvalidResponse),
        }

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        match stream.read(&mut chunk) {
            Ok(0) => return Err(ClientError::InvalidResponse),
            Ok(n) => recv_buf.extend_from_slice(&chunk[..n]),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err)
                if err.kind() == ErrorKind::WouldBlock || err.kind() == ErrorKind::TimedOut =>
            {
                return Err(ClientError::ResponseTimeout)
            }
            Err(err) => return Err(ClientError::ConnectionLost(err)),
        }
    }
}

fn take_exact<const N: usize>(payload: &[u8]) -> Result<[u8; N]> {
    payload
        .get(..N)
        .and_then(|s| s.try_into().ok())
        .ok_or(ClientError::InvalidResponse)
}

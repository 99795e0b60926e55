//! Blocking PINE IPC client.
//!
//! Exposes the memory of a game running inside a PINE-speaking
//! emulator (PCSX2 and friends) to an external tool. The protocol is
//! strictly request-then-response over a local socket; this client
//! keeps one connection, reconnects lazily after faults, and maps
//! every failure mode to a typed [`ClientError`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use pineipc_client::{DataSize, PineClient};
//!
//! let mut client = PineClient::new(28011)?;
//! let hp = client.read_u16(0x0044_D8A0)?;
//! client.write_u16(0x0044_D8A0, hp.saturating_add(100))?;
//! # Ok::<(), pineipc_client::ClientError>(())
//! ```

pub mod client;
pub mod connection;
pub mod error;

pub use client::{ClientConfig, PineClient, DEFAULT_SLOT, DEFAULT_TIMEOUT};
pub use connection::{Connection, ConnectionState};
pub use error::{ClientError, Result};

// Protocol vocabulary, re-exported so most callers only need this crate.
pub use pineipc_proto::{DataSize, Opcode, Status};
pub use pineipc_transport::{Endpoint, Platform};

//! Platform endpoint resolution and blocking streams for PINE IPC.
//!
//! The emulator listens on a loopback TCP port on Windows and on a
//! filesystem Unix socket elsewhere. [`Endpoint`] captures that choice
//! as data, [`PineStream`] is the connected stream either way.
//!
//! This is the lowest layer of the workspace; the client crate builds
//! on the [`PineStream`] type provided here.

pub mod endpoint;
pub mod error;
pub mod stream;

pub use endpoint::{Endpoint, Platform, SOCKET_FILE_NAME};
pub use error::{Result, TransportError};
pub use stream::PineStream;

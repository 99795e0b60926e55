//! Wire format for the PINE emulator IPC protocol.
//!
//! Every exchange is a single length-prefixed frame, all integers
//! little-endian:
//!
//! ```text
//! Request:  [total_length:4][opcode:1][address:4][payload:w]   (w only for writes)
//! Reply:    [reply_length:4][status:1][payload:...]
//! ```
//!
//! Both length prefixes count the whole frame, their own four bytes
//! included. A read or metadata request is always 9 bytes; a write
//! request is 9 plus the operand width.

pub mod error;
pub mod opcode;
pub mod request;
pub mod response;

pub use error::{ProtoError, Result};
pub use opcode::{DataSize, Opcode, Status};
pub use request::{decode_request, Request, REQUEST_HEADER_SIZE};
pub use response::{decode_reply, encode_reply, Reply, REPLY_HEADER_SIZE};

/// Maximum size of one request message.
/// Sized for 50,000 WRITE64 requests in a single batch message.
pub const MAX_REQUEST_SIZE: usize = 650_000;

/// Maximum size of one reply message.
/// Sized for 50,000 READ64 replies in a single batch message.
pub const MAX_REPLY_SIZE: usize = 450_000;

/// Maximum number of commands in a batch message.
///
/// Reserved by the protocol; no batching wire format is currently
/// defined, so nothing in this workspace consumes it yet.
pub const MAX_BATCH_COMMANDS: usize = 50_000;

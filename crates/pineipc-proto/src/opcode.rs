use std::fmt;

use crate::error::{ProtoError, Result};

/// PINE command opcodes.
///
/// The opcode is the single byte following the length prefix of every
/// request. Read/write variants carry a fixed operand width; the
/// remaining commands are fixed 9-byte requests whose reply payload is
/// interpreted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// Read 1 byte of emulated memory.
    Read8 = 0x00,
    /// Read 2 bytes of emulated memory.
    Read16 = 0x01,
    /// Read 4 bytes of emulated memory.
    Read32 = 0x02,
    /// Read 8 bytes of emulated memory.
    Read64 = 0x03,
    /// Write 1 byte of emulated memory.
    Write8 = 0x04,
    /// Write 2 bytes of emulated memory.
    Write16 = 0x05,
    /// Write 4 bytes of emulated memory.
    Write32 = 0x06,
    /// Write 8 bytes of emulated memory.
    Write64 = 0x07,
    /// Query the emulator version string.
    Version = 0x08,
    /// Ask the emulator to save state.
    SaveState = 0x09,
    /// Ask the emulator to load state.
    LoadState = 0x0A,
    /// Query the running game's title.
    Title = 0x0B,
    /// Query the running game's serial ID.
    Id = 0x0C,
    /// Query the running game's UUID/CRC.
    Uuid = 0x0D,
    /// Query the running game's version.
    GameVersion = 0x0E,
    /// Query the emulation status.
    Status = 0x0F,
    /// Placeholder the peer answers with for unknown commands.
    Unimplemented = 0xFF,
}

impl Opcode {
    /// Convert from the wire byte.
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Read8),
            0x01 => Some(Self::Read16),
            0x02 => Some(Self::Read32),
            0x03 => Some(Self::Read64),
            0x04 => Some(Self::Write8),
            0x05 => Some(Self::Write16),
            0x06 => Some(Self::Write32),
            0x07 => Some(Self::Write64),
            0x08 => Some(Self::Version),
            0x09 => Some(Self::SaveState),
            0x0A => Some(Self::LoadState),
            0x0B => Some(Self::Title),
            0x0C => Some(Self::Id),
            0x0D => Some(Self::Uuid),
            0x0E => Some(Self::GameVersion),
            0x0F => Some(Self::Status),
            0xFF => Some(Self::Unimplemented),
            _ => None,
        }
    }

    /// Convert to the wire byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this opcode reads emulated memory.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read8 | Self::Read16 | Self::Read32 | Self::Read64)
    }

    /// Whether this opcode writes emulated memory.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(
            self,
            Self::Write8 | Self::Write16 | Self::Write32 | Self::Write64
        )
    }

    /// Operand width for read/write variants, `None` for the rest.
    #[must_use]
    pub const fn width(self) -> Option<DataSize> {
        match self {
            Self::Read8 | Self::Write8 => Some(DataSize::U8),
            Self::Read16 | Self::Write16 => Some(DataSize::U16),
            Self::Read32 | Self::Write32 => Some(DataSize::U32),
            Self::Read64 | Self::Write64 => Some(DataSize::U64),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read8 => "READ8",
            Self::Read16 => "READ16",
            Self::Read32 => "READ32",
            Self::Read64 => "READ64",
            Self::Write8 => "WRITE8",
            Self::Write16 => "WRITE16",
            Self::Write32 => "WRITE32",
            Self::Write64 => "WRITE64",
            Self::Version => "VERSION",
            Self::SaveState => "SAVE_STATE",
            Self::LoadState => "LOAD_STATE",
            Self::Title => "TITLE",
            Self::Id => "ID",
            Self::Uuid => "UUID",
            Self::GameVersion => "GAME_VERSION",
            Self::Status => "STATUS",
            Self::Unimplemented => "UNIMPLEMENTED",
        };
        write!(f, "{name}")
    }
}

/// Operand width for memory read/write commands, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataSize {
    /// 1-byte operand.
    U8 = 1,
    /// 2-byte operand.
    U16 = 2,
    /// 4-byte operand.
    U32 = 4,
    /// 8-byte operand.
    U64 = 8,
}

impl DataSize {
    /// All widths, smallest first.
    pub const ALL: [Self; 4] = [Self::U8, Self::U16, Self::U32, Self::U64];

    /// Width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Map a byte count to a width.
    pub fn from_bytes(bytes: usize) -> Result<Self> {
        match bytes {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            8 => Ok(Self::U64),
            _ => Err(ProtoError::InvalidDataSize { bytes }),
        }
    }

    /// The READ opcode for this width.
    #[must_use]
    pub const fn read_opcode(self) -> Opcode {
        match self {
            Self::U8 => Opcode::Read8,
            Self::U16 => Opcode::Read16,
            Self::U32 => Opcode::Read32,
            Self::U64 => Opcode::Read64,
        }
    }

    /// The WRITE opcode for this width.
    #[must_use]
    pub const fn write_opcode(self) -> Opcode {
        match self {
            Self::U8 => Opcode::Write8,
            Self::U16 => Opcode::Write16,
            Self::U32 => Opcode::Write32,
            Self::U64 => Opcode::Write64,
        }
    }
}

impl fmt::Display for DataSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.bytes())
    }
}

/// Result code carried in the status byte of every reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Command completed on the peer.
    Ok = 0x00,
    /// Command failed on the peer.
    Fail = 0xFF,
}

impl Status {
    /// Convert from the wire byte. Any byte other than 0 is a failure;
    /// the peer only ever emits 0x00 or 0xFF.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x00 => Self::Ok,
            _ => Self::Fail,
        }
    }

    /// Convert to the wire byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_roundtrip() {
        let all = [
            Opcode::Read8,
            Opcode::Read16,
            Opcode::Read32,
            Opcode::Read64,
            Opcode::Write8,
            Opcode::Write16,
            Opcode::Write32,
            Opcode::Write64,
            Opcode::Version,
            Opcode::SaveState,
            Opcode::LoadState,
            Opcode::Title,
            Opcode::Id,
            Opcode::Uuid,
            Opcode::GameVersion,
            Opcode::Status,
            Opcode::Unimplemented,
        ];
        for op in all {
            assert_eq!(Opcode::from_u8(op.as_u8()), Some(op));
        }
    }

    #[test]
    fn unknown_opcode_rejected() {
        assert_eq!(Opcode::from_u8(0x10), None);
        assert_eq!(Opcode::from_u8(0xFE), None);
    }

    #[test]
    fn widths_line_up_with_opcodes() {
        for size in DataSize::ALL {
            assert_eq!(size.read_opcode().width(), Some(size));
            assert_eq!(size.write_opcode().width(), Some(size));
            assert!(size.read_opcode().is_read());
            assert!(size.write_opcode().is_write());
        }
        assert_eq!(Opcode::Status.width(), None);
    }

    #[test]
    fn data_size_from_bytes() {
        assert_eq!(DataSize::from_bytes(4).unwrap(), DataSize::U32);
        assert!(matches!(
            DataSize::from_bytes(3),
            Err(ProtoError::InvalidDataSize { bytes: 3 })
        ));
        assert!(DataSize::from_bytes(0).is_err());
    }

    #[test]
    fn status_from_wire() {
        assert_eq!(Status::from_u8(0x00), Status::Ok);
        assert_eq!(Status::from_u8(0xFF), Status::Fail);
        assert_eq!(Status::from_u8(0x01), Status::Fail);
    }
}

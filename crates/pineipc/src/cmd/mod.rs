use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};

use pineipc_client::{ClientConfig, PineClient, DEFAULT_SLOT};
use pineipc_transport::Endpoint;

use crate::exit::{client_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod info;
pub mod read;
pub mod state;
pub mod status;
pub mod version;
pub mod write;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read emulated memory.
    Read(ReadArgs),
    /// Write emulated memory.
    Write(WriteArgs),
    /// Query emulator and game metadata.
    Info(InfoArgs),
    /// Query the emulation status.
    Status(StatusArgs),
    /// Ask the emulator to save state.
    SaveState(StateArgs),
    /// Ask the emulator to load state.
    LoadState(StateArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Read(args) => read::run(args, connect, format),
        Command::Write(args) => write::run(args, connect, format),
        Command::Info(args) => info::run(args, connect, format),
        Command::Status(args) => status::run(args, connect, format),
        Command::SaveState(args) => state::run_save(args, connect, format),
        Command::LoadState(args) => state::run_load(args, connect, format),
        Command::Version(args) => version::run(args, format),
    }
}

/// Connection options shared by every emulator-facing subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectArgs {
    /// Slot number of the target emulator instance (1..=65536).
    #[arg(long, global = true, default_value_t = DEFAULT_SLOT)]
    pub slot: u32,

    /// Socket path, overriding platform endpoint resolution.
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,

    /// Connect and receive timeout (e.g. 1s, 500ms).
    #[arg(long, global = true, default_value = "1s", value_name = "DURATION")]
    pub timeout: String,
}

impl ConnectArgs {
    pub fn client(&self) -> CliResult<PineClient> {
        let timeout = parse_duration(&self.timeout)?;
        let endpoint = self
            .socket
            .as_ref()
            .map(|path| Endpoint::Socket { path: path.clone() });
        PineClient::with_config(ClientConfig {
            slot: self.slot,
            timeout,
            endpoint,
        })
        .map_err(|err| client_error("invalid configuration", err))
    }
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Address in emulated memory (decimal or 0x-prefixed hex).
    pub address: String,

    /// Operand width in bytes (1, 2, 4 or 8).
    #[arg(long, short = 'w', default_value_t = 4)]
    pub width: usize,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Address in emulated memory (decimal or 0x-prefixed hex).
    pub address: String,

    /// Value to write (decimal or 0x-prefixed hex), truncated to the width.
    pub value: String,

    /// Operand width in bytes (1, 2, 4 or 8).
    #[arg(long, short = 'w', default_value_t = 4)]
    pub width: usize,
}

#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Args, Debug, Default)]
pub struct StatusArgs {}

#[derive(Args, Debug, Default)]
pub struct StateArgs {}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {}

/// Parse a timeout like `250ms`, `2s`, or a bare second count.
pub fn parse_duration(input: &str) -> CliResult<Duration> {
    let text = input.trim();
    let (digits, millis_per_unit) = match text.strip_suffix("ms") {
        Some(head) => (head, 1),
        None => (text.strip_suffix('s').unwrap_or(text), 1000),
    };
    match digits.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Duration::from_millis(n.saturating_mul(millis_per_unit))),
        _ => Err(CliError::new(
            USAGE,
            format!("timeout must be a positive count of seconds or milliseconds, got {input:?}"),
        )),
    }
}

/// Parse an address or value, accepting `0x` hex or plain decimal.
pub fn parse_number(input: &str) -> CliResult<u64> {
    let input = input.trim();
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        input.parse()
    };
    parsed.map_err(|_| CliError::new(USAGE, format!("invalid number: {input}")))
}

pub fn parse_address(input: &str) -> CliResult<u32> {
    let value = parse_number(input)?;
    u32::try_from(value)
        .map_err(|_| CliError::new(USAGE, format!("address out of 32-bit range: {input}")))
}

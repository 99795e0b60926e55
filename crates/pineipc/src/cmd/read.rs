use pineipc_proto::DataSize;

use crate::cmd::{parse_address, ConnectArgs, ReadArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_record, OutputFormat};

pub fn run(args: ReadArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let address = parse_address(&args.address)?;
    let size = DataSize::from_bytes(args.width)
        .map_err(|err| CliError::new(USAGE, err.to_string()))?;

    let mut client = connect.client()?;
    let payload = client
        .read(size, address)
        .map_err(|err| client_error("read failed", err))?;

    let mut raw = [0u8; 8];
    let copied = payload.len().min(8);
    raw[..copied].copy_from_slice(&payload[..copied]);
    let value = u64::from_le_bytes(raw);

    let width_hex = size.bytes() * 2;
    print_record(
        &[
            ("command", size.read_opcode().to_string()),
            ("address", format!("{address:#010x}")),
            ("value", format!("{value:#0width$x}", width = width_hex + 2)),
            ("decimal", value.to_string()),
        ],
        Some(payload.as_ref()),
        format,
    );
    Ok(SUCCESS)
}

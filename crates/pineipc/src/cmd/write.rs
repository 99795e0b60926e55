use pineipc_proto::DataSize;

use crate::cmd::{parse_address, parse_number, ConnectArgs, WriteArgs};
use crate::exit::{client_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_record, OutputFormat};

pub fn run(args: WriteArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let address = parse_address(&args.address)?;
    let value = parse_number(&args.value)?;
    let size = DataSize::from_bytes(args.width)
        .map_err(|err| CliError::new(USAGE, err.to_string()))?;

    let mut client = connect.client()?;
    client
        .write(size, address, value)
        .map_err(|err| client_error("write failed", err))?;

    print_record(
        &[
            ("command", size.write_opcode().to_string()),
            ("address", format!("{address:#010x}")),
            ("value", format!("{value:#x}")),
            ("result", "ok".to_string()),
        ],
        None,
        format,
    );
    Ok(SUCCESS)
}

use pineipc_client::{ClientError, PineClient};
use pineipc_proto::Opcode;

use crate::cmd::{ConnectArgs, InfoArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{payload_preview, print_record, OutputFormat};

const QUERIES: [(&str, Opcode); 5] = [
    ("version", Opcode::Version),
    ("title", Opcode::Title),
    ("id", Opcode::Id),
    ("uuid", Opcode::Uuid),
    ("game_version", Opcode::GameVersion),
];

pub fn run(_args: InfoArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connect.client()?;

    let mut rows: Vec<(&str, String)> = Vec::with_capacity(QUERIES.len());
    for (label, opcode) in QUERIES {
        rows.push((label, probe(&mut client, opcode)?));
    }

    print_record(&rows, None, format);
    Ok(SUCCESS)
}

/// One metadata query. A peer-side FAIL just means the field is not
/// available right now (e.g. no game running); anything else aborts.
fn probe(client: &mut PineClient, opcode: Opcode) -> CliResult<String> {
    match client.command(opcode) {
        Ok(payload) => Ok(payload_preview(payload.as_ref())),
        Err(ClientError::PeerFailure { .. }) => Ok("(unavailable)".to_string()),
        Err(err) => Err(client_error("info query failed", err)),
    }
}

use crate::cmd::{ConnectArgs, StatusArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{payload_preview, print_record, OutputFormat};

pub fn run(_args: StatusArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connect.client()?;
    let payload = client
        .status()
        .map_err(|err| client_error("status query failed", err))?;

    print_record(
        &[
            ("status", status_name(payload.as_ref())),
            ("payload", payload_preview(payload.as_ref())),
        ],
        Some(payload.as_ref()),
        format,
    );
    Ok(SUCCESS)
}

/// The status payload is a little-endian u32 on current emulators;
/// anything else is shown as-is.
fn status_name(payload: &[u8]) -> String {
    let code = match payload.first_chunk::<4>() {
        Some(bytes) => u32::from_le_bytes(*bytes),
        None => return payload_preview(payload),
    };
    match code {
        0 => "running".to_string(),
        1 => "paused".to_string(),
        2 => "shutdown".to_string(),
        other => format!("unknown ({other})"),
    }
}

use pineipc_proto::{MAX_REPLY_SIZE, MAX_REQUEST_SIZE};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

pub fn run(_args: VersionArgs, format: OutputFormat) -> CliResult<i32> {
    print_record(
        &[
            ("version", env!("CARGO_PKG_VERSION").to_string()),
            ("max_request_size", MAX_REQUEST_SIZE.to_string()),
            ("max_reply_size", MAX_REPLY_SIZE.to_string()),
        ],
        None,
        format,
    );
    Ok(SUCCESS)
}

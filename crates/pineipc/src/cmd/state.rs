use crate::cmd::{ConnectArgs, StateArgs};
use crate::exit::{client_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

pub fn run_save(_args: StateArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connect.client()?;
    client
        .save_state()
        .map_err(|err| client_error("save state failed", err))?;
    print_record(
        &[("command", "SAVE_STATE".to_string()), ("result", "ok".to_string())],
        None,
        format,
    );
    Ok(SUCCESS)
}

pub fn run_load(_args: StateArgs, connect: &ConnectArgs, format: OutputFormat) -> CliResult<i32> {
    let mut client = connect.client()?;
    client
        .load_state()
        .map_err(|err| client_error("load state failed", err))?;
    print_record(
        &[("command", "LOAD_STATE".to_string()), ("result", "ok".to_string())],
        None,
        format,
    );
    Ok(SUCCESS)
}

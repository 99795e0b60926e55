mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::{Command, ConnectArgs};
use crate::logging::{init_logging, verbosity_filter, LogFormat};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "pineipc", version, about = "PINE emulator IPC client")]
struct Cli {
    #[command(flatten)]
    connect: ConnectArgs,

    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Increase log verbosity (-v: requests, -vv: everything).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, verbosity_filter(cli.verbose, cli.quiet));

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, &cli.connect, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_read_subcommand() {
        let cli = Cli::try_parse_from(["pineipc", "read", "0x0044D8A0", "--width", "2"])
            .expect("read args should parse");
        assert!(matches!(cli.command, Command::Read(_)));
        assert_eq!(cli.connect.slot, pineipc_client::DEFAULT_SLOT);
    }

    #[test]
    fn parses_write_with_slot_override() {
        let cli = Cli::try_parse_from([
            "pineipc", "write", "0x1000", "0xBEEF", "--width", "2", "--slot", "28012",
        ])
        .expect("write args should parse");
        assert!(matches!(cli.command, Command::Write(_)));
        assert_eq!(cli.connect.slot, 28012);
    }

    #[test]
    fn parses_socket_override() {
        let cli = Cli::try_parse_from(["pineipc", "info", "--socket", "/tmp/pine.sock"])
            .expect("info args should parse");
        assert!(matches!(cli.command, Command::Info(_)));
        assert_eq!(
            cli.connect.socket.as_deref(),
            Some(std::path::Path::new("/tmp/pine.sock"))
        );
    }

    #[test]
    fn rejects_missing_write_value() {
        let err = Cli::try_parse_from(["pineipc", "write", "0x1000"])
            .expect_err("write without value should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_verbosity_flags() {
        let cli = Cli::try_parse_from(["pineipc", "status", "-vv", "--log-format", "json"])
            .expect("verbosity flags should parse");
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(cli.log_format, LogFormat::Json);

        let err = Cli::try_parse_from(["pineipc", "status", "-v", "-q"])
            .expect_err("verbose and quiet should conflict");
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_state_subcommands() {
        assert!(matches!(
            Cli::try_parse_from(["pineipc", "save-state"]).unwrap().command,
            Command::SaveState(_)
        ));
        assert!(matches!(
            Cli::try_parse_from(["pineipc", "load-state"]).unwrap().command,
            Command::LoadState(_)
        ));
    }
}

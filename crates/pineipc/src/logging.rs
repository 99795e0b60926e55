use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

/// Encoding of the stderr log stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Map `-v` occurrences onto a tracing filter.
///
/// The client library logs connection faults at `warn` and
/// per-request traces at `debug`, so the ladder is short: quiet
/// silences everything, the default shows faults, one `-v` adds the
/// request traces, more enables whatever `trace` events exist.
pub fn verbosity_filter(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global stderr subscriber. Safe to call once per
/// process; a second call is ignored.
pub fn init_logging(format: LogFormat, filter: LevelFilter) {
    let base = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false);
    let _ = match format {
        LogFormat::Text => base.compact().try_init(),
        LogFormat::Json => base.json().try_init(),
    };
}

//! Diagnostic logging to stderr.

use std::io::IsTerminal;

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Log level for our own crates given `-v` count and `--quiet`.
fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the flag-derived level.
pub fn init_logging(verbose: u8, quiet: bool, no_color: bool) {
    let level = level_for(verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,fitlog={level},fitlog_core={level}")));

    let show_src = matches!(level, "debug" | "trace");
    let ansi = !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_timer(ChronoLocal::rfc_3339())
        .with_target(true)
        .with_file(show_src)
        .with_line_number(show_src)
        .compact()
        .try_init();
}

use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVE: &str = "info";

/// Installs a JSON subscriber for the process.
///
/// - `RUST_LOG` selects levels (falls back to `info`)
/// - one JSON object per line, with event fields flattened to the top level so
///   fields such as `id`, `status` or `side` can be queried directly
///
/// Only the first subscriber installed in a process wins. Returns `false` when one
/// was already in place (a host application's, typically), which is left untouched.
pub fn init_logging() -> bool {
    init_logging_for(LogMode::Raw)
}

pub fn init_logging_for(mode: LogMode) -> bool {
    let builder = fmt().with_env_filter(env_filter());
    let installed = match mode {
        LogMode::Raw => builder.json().flatten_event(true).try_init(),
        LogMode::Pretty => builder.pretty().try_init(),
    };
    installed.is_ok()
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Pretty output on a terminal, JSON lines otherwise.
pub fn default_log_mode() -> LogMode {
    if io::stdout().is_terminal() {
        LogMode::Pretty
    } else {
        LogMode::Raw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Raw,
    Pretty,
}

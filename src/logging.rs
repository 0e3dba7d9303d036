#![cfg(feature = "std")]

use log::{LevelFilter, Metadata, Record};
use std::env;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "ARCADE_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // stdout belongs to the board display
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Parses a level name, falling back to `Info`.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Initialize logging with a level taken from `ARCADE_LOG`. Defaults to
/// `info` when unset or invalid. Calling it twice is harmless.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(level_from(Some("chatty")), LevelFilter::Info);
        assert_eq!(level_from(None), LevelFilter::Info);
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
    }
}

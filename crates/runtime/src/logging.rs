use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

/// Stderr logger for the `log` facade.
///
/// Records are written as `<timestamp> <LEVEL> [<target>] <message>`.
pub struct Logger {
    level: Level,
}

impl Logger {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

fn format_record(record: &Record<'_>) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!(
        "{} {:<5} [{}] {}",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", format_record(record));
        }
    }

    fn flush(&self) {}
}

/// Parse a level name; `off` and unknown names yield `None`.
fn parse_level(value: &str) -> Option<Level> {
    value
        .trim()
        .parse::<LevelFilter>()
        .ok()
        .and_then(|filter| filter.to_level())
}

fn get_level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(Level::Warn)
}

/// Install the stderr logger, with the level taken from `GLINT_LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(get_level_from_env())
}

/// Install the stderr logger at `level`.
///
/// Only the first call installs anything; later calls are no-ops.
pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    let first_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger::new(level));

    if first_call {
        log::set_logger(logger)?;
        // Use the stored level so a racing second caller cannot diverge.
        log::set_max_level(logger.level().to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

//! Minimal stderr backend for the `log` facade

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger. `verbose` turns on debug output from the engine.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose { Level::Debug } else { Level::Warn };
    log::set_boxed_logger(Box::new(StderrLogger { level }))?;
    log::set_max_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    Ok(())
}

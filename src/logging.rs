//! Process-wide log sink for the relay binary.
//!
//! Lines go to stderr as `[   1.234s INFO  checkers_relay::server] message`.

use std::io::Write;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;

static START: Lazy<Instant> = Lazy::new(Instant::now);

/// Writes every enabled record to stderr with the time since startup.
pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = START.elapsed();
        let mut stderr = std::io::stderr().lock();
        // Write errors on stderr are dropped.
        let _ = writeln!(
            stderr,
            "[{:>4}.{:03}s {:<5} {}] {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the stderr logger at `level`. Fails if a logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    Lazy::force(&START);
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

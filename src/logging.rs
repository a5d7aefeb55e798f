#![cfg(feature = "std")]

use std::env;
use std::sync::OnceLock;
use std::time::Instant;

use log::{self, Level, LevelFilter, Metadata, Record};

/// Stderr logger stamping each line with the seconds since start-up.
///
/// Records from other crates only pass at `warn` and above, so `SWEEPER_LOG=trace`
/// shows the solver's own refresh and deduction chatter without runtime noise.
struct SolverLogger {
    started: OnceLock<Instant>,
}

fn admits(level: Level, target: &str, max: LevelFilter) -> bool {
    level <= max && (target.starts_with("sweeper") || level <= Level::Warn)
}

impl log::Log for SolverLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        admits(metadata.level(), metadata.target(), log::max_level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let since = self.started.get_or_init(Instant::now).elapsed();
            eprintln!(
                "{:>9.3} {:<5} [{}] {}",
                since.as_secs_f64(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: SolverLogger = SolverLogger {
    started: OnceLock::new(),
};

/// Initialize logging with a level taken from the `SWEEPER_LOG` environment variable.
/// Falls back to `default` if the variable is not set or invalid.
pub fn init_logging(default: LevelFilter) {
    let level = env::var("SWEEPER_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    LOGGER.started.get_or_init(Instant::now);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

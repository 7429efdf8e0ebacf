//! Module for configuring the logging output.

use std::env;
use std::sync::Mutex;

use log::SetLoggerError;
use slog::{Drain, FilterLevel, Logger};
use slog_envlogger::LogBuilder;
use slog_scope::GlobalLoggerGuard;


/// Logging levels, from the quietest to the most verbose.
const LEVELS: &'static [FilterLevel] = &[
    FilterLevel::Off,
    FilterLevel::Critical,
    FilterLevel::Error,
    FilterLevel::Warning,
    FilterLevel::Info,
    FilterLevel::Debug,
    FilterLevel::Trace,
];
/// Index of the level used when neither -v nor -q is given.
const DEFAULT_LEVEL: isize = 4;  // Info


/// Initialize logging to standard error with given verbosity.
///
/// The `RUST_LOG` environment variable, if set, refines the filtering further.
/// The returned guard must be kept alive for as long as the logging is needed.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let level = level_for(verbosity);

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();

    let mut builder = LogBuilder::new(drain).filter(None, level);
    if let Ok(spec) = env::var("RUST_LOG") {
        builder = builder.parse(&spec);
    }
    let drain = builder.build();

    let logger = Logger::root(Mutex::new(drain).fuse(), slog::o!());
    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log::Level::Trace)?;
    Ok(guard)
}

/// Logging level for given verbosity (the number of -v flags minus the number of -q ones).
fn level_for(verbosity: isize) -> FilterLevel {
    let index = (DEFAULT_LEVEL + verbosity).max(0).min(LEVELS.len() as isize - 1);
    LEVELS[index as usize]
}

//! Process-wide fallback logger
//!
//! Last-resort destination for failures of the logging path itself, such as
//! a sink rejecting a record. It is never used for application logging.
//!
//! The fallback is built lazily on first use (stderr, `Debug` threshold,
//! default keys). Call [`init`] before anything is logged to replace it;
//! once it has been built, `init` hands the logger back unchanged.

use super::error::LoggerError;
use super::log_level::LogLevel;
use super::logger::{Logger, LoggerBuilder};
use crate::sinks::StderrSink;
use std::cell::Cell;
use std::sync::OnceLock;

static FALLBACK: OnceLock<Logger> = OnceLock::new();

thread_local! {
    static REPORTING: Cell<bool> = const { Cell::new(false) };
}

/// Install `logger` as the fallback. Fails, returning it, if a fallback is
/// already in place.
pub fn init(logger: Logger) -> Result<(), Logger> {
    FALLBACK.set(logger)
}

/// The fallback logger, building the default one if none was installed.
pub fn get() -> &'static Logger {
    FALLBACK.get_or_init(|| LoggerBuilder::new(LogLevel::Debug, StderrSink).build())
}

/// Report a logging failure at ERROR severity.
///
/// A failure raised while already reporting (the fallback's own sink is
/// broken) is dropped instead of recursing.
pub(crate) fn report(err: &LoggerError) {
    REPORTING.with(|reporting| {
        if reporting.replace(true) {
            return;
        }
        let _reset = ResetOnDrop(reporting);
        let _ = get().logf(LogLevel::Error, format_args!("{}", err));
    });
}

struct ResetOnDrop<'a>(&'a Cell<bool>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

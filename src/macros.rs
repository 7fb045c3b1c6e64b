//! Logging macros with `println!`-style formatting.
//!
//! Each macro forwards to the method of the same name on a [`Logger`] or an
//! [`Entry`], passing the message as `format_args!` so nothing is formatted
//! unless the level passes the logger's filter.
//!
//! [`Logger`]: crate::Logger
//! [`Entry`]: crate::Entry
//!
//! # Examples
//!
//! ```
//! use json_line_logger::prelude::*;
//! use json_line_logger::infof;
//!
//! let logger = Logger::builder(LogLevel::Info, MemorySink::new()).build();
//!
//! // Basic logging
//! infof!(logger, "Server started");
//!
//! // With format arguments and fields
//! let port = 8080;
//! infof!(logger.string("scheme", "http"), "listening on port {}", port);
//! ```

/// Log at an explicit level. Evaluates to the emit result.
///
/// # Examples
///
/// ```
/// # use json_line_logger::prelude::*;
/// # let logger = Logger::builder(LogLevel::Debug, MemorySink::new()).build();
/// use json_line_logger::logf;
/// logf!(logger, LogLevel::Info, "Simple message")?;
/// logf!(logger, LogLevel::Error, "Error code: {}", 500)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! logf {
    ($target:expr, $level:expr, $($arg:tt)+) => {
        $target.logf($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// ```
/// # use json_line_logger::prelude::*;
/// # let logger = Logger::builder(LogLevel::Debug, MemorySink::new()).build();
/// use json_line_logger::debugf;
/// debugf!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debugf {
    ($target:expr, $($arg:tt)+) => {
        $target.debugf(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! infof {
    ($target:expr, $($arg:tt)+) => {
        $target.infof(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # use json_line_logger::prelude::*;
/// # let logger = Logger::builder(LogLevel::Debug, MemorySink::new()).build();
/// use json_line_logger::warnf;
/// warnf!(logger.uint("attempt", 3), "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warnf {
    ($target:expr, $($arg:tt)+) => {
        $target.warnf(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! errorf {
    ($target:expr, $($arg:tt)+) => {
        $target.errorf(::std::format_args!($($arg)+))
    };
}

//! Core encoder types and traits

pub mod caller;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod fallback;
pub mod field_value;
pub mod log_level;
pub mod logger;
pub mod pool;
pub mod sink;
pub mod timestamp;

pub use caller::CallerFrame;
pub use entry::{Entry, ERROR_KEY};
pub use error::{LoggerError, Result};
pub use field_value::FieldValue;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder, DEFAULT_CALLER_SKIP};
pub use sink::Sink;
pub use timestamp::{TimestampFormat, TimestampZone};

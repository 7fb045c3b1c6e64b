//! # JSON Line Logger
//!
//! A structured logger that writes one JSON object per record with as few
//! allocations as possible.
//!
//! ## Features
//!
//! - **Pooled Buffers**: Records are built in recycled byte buffers
//! - **Fluent Fields**: Typed field methods chained on an [`Entry`]
//! - **Persistent Context**: Child loggers carry pre-encoded fields
//! - **Caller Attribution**: Optional `file:line` of the logging call site
//!
//! ## Example
//!
//! ```
//! use json_line_logger::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder(LogLevel::Info, sink.clone())
//!     .timestamp_key("")
//!     .caller_key("")
//!     .build();
//!
//! let request = logger.string("request_id", "r-17").logger();
//! request.int("status", 200).infof(format_args!("handled"));
//!
//! assert_eq!(
//!     sink.contents_string(),
//!     "{\"severity\":\"INFO\",\"message\":\"handled\",\"request_id\":\"r-17\",\"status\":200}\n"
//! );
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Entry, FieldValue, LogLevel, Logger, LoggerBuilder, LoggerError, Result, Sink,
        TimestampFormat, TimestampZone,
    };
    pub use crate::sinks::{FileSink, MemorySink, StderrSink, StdoutSink, WriterSink};
}

pub use crate::core::{
    CallerFrame, Entry, FieldValue, LogLevel, Logger, LoggerBuilder, LoggerError, Result, Sink,
    TimestampFormat, TimestampZone, DEFAULT_CALLER_SKIP, ERROR_KEY,
};
pub use sinks::{FileSink, MemorySink, StderrSink, StdoutSink, WriterSink};

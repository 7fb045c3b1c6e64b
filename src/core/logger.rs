//! Main logger implementation

use super::entry::Entry;
use super::error::Result;
use super::field_value::FieldValue;
use super::log_level::LogLevel;
use super::sink::Sink;
use super::timestamp::{TimestampFormat, TimestampZone};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::hint;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Frames between the caller resolver and the call site for the built-in
/// logging methods: resolver, record assembly, public method, call site.
pub const DEFAULT_CALLER_SKIP: usize = 3;

/// Frozen logger configuration. Copied by value into every derived logger.
#[derive(Clone)]
pub(crate) struct LoggerConfig {
    pub(crate) level_key: String,
    pub(crate) level: LogLevel,
    pub(crate) timestamp_key: String,
    pub(crate) timestamp_format: TimestampFormat,
    pub(crate) timestamp_zone: TimestampZone,
    pub(crate) caller_key: String,
    pub(crate) caller_skip: usize,
    pub(crate) use_long_caller: bool,
    pub(crate) message_key: String,
    pub(crate) separator: String,
    pub(crate) sink: Arc<dyn Sink>,
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("level_key", &self.level_key)
            .field("level", &self.level)
            .field("timestamp_key", &self.timestamp_key)
            .field("timestamp_format", &self.timestamp_format)
            .field("timestamp_zone", &self.timestamp_zone)
            .field("caller_key", &self.caller_key)
            .field("caller_skip", &self.caller_skip)
            .field("use_long_caller", &self.use_long_caller)
            .field("message_key", &self.message_key)
            .field("separator", &self.separator)
            .field("sink", &self.sink.name())
            .finish()
    }
}

/// Structured JSON-line logger.
///
/// Holds an immutable configuration plus a pre-serialized fragment of
/// persistent fields. Every derivation (`with_level`, `add_caller_skip`,
/// [`Entry::logger`], `clone`) produces an independent logger with its own
/// copy of the fields, so a `Logger` can be shared read-only across threads.
///
/// # Example
///
/// ```
/// use json_line_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder(LogLevel::Info, sink.clone()).build();
///
/// let request = logger.string("request_id", "abc-123").logger();
/// request.infof(format_args!("started"));
/// request.debugf(format_args!("filtered out"));
///
/// assert_eq!(sink.lines().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Logger {
    config: LoggerConfig,
    fields: Vec<u8>,
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder<S: Sink + 'static>(level: LogLevel, sink: S) -> LoggerBuilder {
        LoggerBuilder::new(level, sink)
    }

    pub(crate) fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Persistent fields as a trailing-comma-terminated `"key":value,`
    /// fragment, empty when there are none.
    pub fn fields(&self) -> &[u8] {
        &self.fields
    }

    pub(crate) fn with_fields(&self, fields: Vec<u8>) -> Logger {
        Logger {
            config: self.config.clone(),
            fields,
        }
    }

    /// Minimum severity this logger writes.
    pub fn level(&self) -> LogLevel {
        self.config.level
    }

    /// A copy of this logger with a different threshold.
    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Logger {
        let mut logger = self.clone();
        logger.config.level = level;
        logger
    }

    /// A copy of this logger attributing records `skip` frames further up
    /// the stack (negative values move back down). Used by wrappers.
    #[must_use]
    pub fn add_caller_skip(&self, skip: isize) -> Logger {
        let mut logger = self.clone();
        logger.config.caller_skip = logger.config.caller_skip.saturating_add_signed(skip);
        logger
    }

    /// Start a new entry with no fields of its own.
    pub fn entry(&self) -> Entry<'_> {
        Entry::new(self)
    }

    pub fn any<'v>(&self, key: &str, value: impl Into<FieldValue<'v>>) -> Entry<'_> {
        self.entry().any(key, value)
    }

    pub fn bool(&self, key: &str, value: bool) -> Entry<'_> {
        self.entry().bool(key, value)
    }

    pub fn bytes(&self, key: &str, value: &[u8]) -> Entry<'_> {
        self.entry().bytes(key, value)
    }

    pub fn duration(&self, key: &str, value: Duration) -> Entry<'_> {
        self.entry().duration(key, value)
    }

    pub fn err(&self, err: &(dyn Error + '_)) -> Entry<'_> {
        self.entry().err(err)
    }

    pub fn err_with_key(&self, key: &str, err: &(dyn Error + '_)) -> Entry<'_> {
        self.entry().err_with_key(key, err)
    }

    pub fn float32(&self, key: &str, value: f32) -> Entry<'_> {
        self.entry().float32(key, value)
    }

    pub fn float64(&self, key: &str, value: f64) -> Entry<'_> {
        self.entry().float64(key, value)
    }

    pub fn int(&self, key: &str, value: isize) -> Entry<'_> {
        self.entry().int(key, value)
    }

    pub fn int32(&self, key: &str, value: i32) -> Entry<'_> {
        self.entry().int32(key, value)
    }

    pub fn int64(&self, key: &str, value: i64) -> Entry<'_> {
        self.entry().int64(key, value)
    }

    pub fn json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Entry<'_> {
        self.entry().json(key, value)
    }

    pub fn string(&self, key: &str, value: &str) -> Entry<'_> {
        self.entry().string(key, value)
    }

    pub fn time<Tz>(&self, key: &str, value: &DateTime<Tz>) -> Entry<'_>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.entry().time(key, value)
    }

    pub fn uint(&self, key: &str, value: usize) -> Entry<'_> {
        self.entry().uint(key, value)
    }

    pub fn uint32(&self, key: &str, value: u32) -> Entry<'_> {
        self.entry().uint32(key, value)
    }

    pub fn uint64(&self, key: &str, value: u64) -> Entry<'_> {
        self.entry().uint64(key, value)
    }

    #[inline(never)]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.entry().emit(LogLevel::Debug, args));
    }

    #[inline(never)]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.entry().emit(LogLevel::Info, args));
    }

    #[inline(never)]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.entry().emit(LogLevel::Warn, args));
    }

    #[inline(never)]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.entry().emit(LogLevel::Error, args));
    }

    /// Emit at `level`, returning the sink error if the write failed.
    #[inline(never)]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        hint::black_box(self.entry().emit(level, args))
    }
}

/// Each `write` emits one record at the logger's own threshold, with the
/// bytes as the message.
impl io::Write for &Logger {
    #[inline(never)]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let message = String::from_utf8_lossy(buf);
        self.entry()
            .emit(self.config.level, format_args!("{}", message))
            .map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Fluent configuration for a [`Logger`].
///
/// Setters consume and return the builder; clone a base builder to derive
/// variants without touching it.
///
/// # Example
/// ```
/// use json_line_logger::prelude::*;
///
/// let base = LoggerBuilder::new(LogLevel::Info, StderrSink);
/// let audit = base.clone().message_key("msg").separator("\r\n").build();
/// let app = base.build();
/// assert_eq!(audit.level(), app.level());
/// ```
#[derive(Clone, Debug)]
pub struct LoggerBuilder {
    config: LoggerConfig,
}

impl LoggerBuilder {
    /// Create a builder with default keys writing records of at least
    /// `level` to `sink`.
    pub fn new<S: Sink + 'static>(level: LogLevel, sink: S) -> Self {
        Self::with_shared_sink(level, Arc::new(sink))
    }

    /// Like [`LoggerBuilder::new`] for a sink already shared elsewhere.
    pub fn with_shared_sink(level: LogLevel, sink: Arc<dyn Sink>) -> Self {
        Self {
            config: LoggerConfig {
                level_key: "severity".to_string(),
                level,
                timestamp_key: "timestamp".to_string(),
                timestamp_format: TimestampFormat::default(),
                timestamp_zone: TimestampZone::default(),
                caller_key: "caller".to_string(),
                caller_skip: DEFAULT_CALLER_SKIP,
                use_long_caller: false,
                message_key: "message".to_string(),
                separator: "\n".to_string(),
                sink,
            },
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Key of the level field; empty disables the field.
    #[must_use = "builder methods return a new value"]
    pub fn level_key(mut self, key: impl Into<String>) -> Self {
        self.config.level_key = key.into();
        self
    }

    /// Key of the timestamp field; empty disables the field.
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_key(mut self, key: impl Into<String>) -> Self {
        self.config.timestamp_key = key.into();
        self
    }

    /// Format of the timestamp field and of `time` fields.
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_zone(mut self, zone: TimestampZone) -> Self {
        self.config.timestamp_zone = zone;
        self
    }

    /// Key of the caller field; empty disables the field and skips the
    /// stack walk entirely.
    #[must_use = "builder methods return a new value"]
    pub fn caller_key(mut self, key: impl Into<String>) -> Self {
        self.config.caller_key = key.into();
        self
    }

    /// Stack depth attributed as the caller, counted from the resolver.
    #[must_use = "builder methods return a new value"]
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.config.caller_skip = skip;
        self
    }

    /// `true` renders `dir/file.rs:line`, `false` the full path.
    #[must_use = "builder methods return a new value"]
    pub fn use_short_caller(mut self, use_short_caller: bool) -> Self {
        self.config.use_long_caller = !use_short_caller;
        self
    }

    /// Key of the message field; empty disables the field.
    #[must_use = "builder methods return a new value"]
    pub fn message_key(mut self, key: impl Into<String>) -> Self {
        self.config.message_key = key.into();
        self
    }

    /// Bytes written after every record.
    #[must_use = "builder methods return a new value"]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Freeze the configuration into a logger with no persistent fields.
    pub fn build(self) -> Logger {
        Logger {
            config: self.config,
            fields: Vec::with_capacity(1024),
        }
    }
}

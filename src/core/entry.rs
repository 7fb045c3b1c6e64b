//! Per-call field accumulator
//!
//! An [`Entry`] borrows a pooled byte buffer, appends one `"key":value,` pair
//! per field call, and either emits a record through one of its terminal
//! methods or freezes its fields into a child [`Logger`]. The buffer returns
//! to the pool when the entry is dropped, whichever way it ends.

use super::caller::append_caller;
use super::encoding::{
    append_arguments_string, append_bool, append_display_string, append_f32, append_f64,
    append_i64, append_json_string, append_key, append_level, append_u64, close_object,
    JsonEscaper, NULL,
};
use super::error::{LoggerError, Result};
use super::fallback;
use super::field_value::FieldValue;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::pool::{self, Pooled};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::hint;
use std::time::Duration;

/// Key used by [`Entry::err`].
pub const ERROR_KEY: &str = "error";

/// A single in-flight record.
///
/// Not meant to be shared across threads or kept beyond one logging call;
/// use [`Entry::logger`] to keep fields around.
///
/// # Example
///
/// ```
/// use json_line_logger::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = LoggerBuilder::new(LogLevel::Info, sink.clone())
///     .timestamp_key("")
///     .caller_key("")
///     .build();
///
/// logger.entry().int("count", 3).warnf(format_args!("retry {}", 1));
/// assert_eq!(
///     sink.contents_string(),
///     "{\"severity\":\"WARNING\",\"message\":\"retry 1\",\"count\":3}\n"
/// );
/// ```
#[must_use = "an entry writes nothing until a terminal method is called"]
pub struct Entry<'a> {
    logger: &'a Logger,
    buf: Pooled<Vec<u8>>,
}

impl<'a> Entry<'a> {
    pub(crate) fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            buf: pool::bytes_buffer(),
        }
    }

    /// Fields accumulated so far, as a trailing-comma-terminated fragment.
    pub fn fields(&self) -> &[u8] {
        &self.buf
    }

    fn push_field(mut self, key: &str, value: impl FnOnce(&mut Vec<u8>)) -> Self {
        append_key(&mut self.buf, key);
        value(&mut self.buf);
        self.buf.push(b',');
        self
    }

    pub fn null(self, key: &str) -> Self {
        self.push_field(key, |buf| buf.extend_from_slice(NULL))
    }

    pub fn bool(self, key: &str, value: bool) -> Self {
        self.push_field(key, |buf| append_bool(buf, value))
    }

    /// Raw bytes, escaped into a JSON string byte by byte.
    pub fn bytes(self, key: &str, value: &[u8]) -> Self {
        self.push_field(key, |buf| append_json_string(buf, value))
    }

    pub fn duration(self, key: &str, value: Duration) -> Self {
        self.push_field(key, |buf| append_display_string(buf, &format_args!("{:?}", value)))
    }

    /// Shorthand for `err_with_key("error", err)`.
    pub fn err(self, err: &(dyn Error + '_)) -> Self {
        self.err_with_key(ERROR_KEY, err)
    }

    /// The error's message, followed by its `source()` chain when it has one.
    pub fn err_with_key(self, key: &str, err: &(dyn Error + '_)) -> Self {
        self.push_field(key, |buf| append_display_string(buf, &ErrorChain(err)))
    }

    pub fn float32(self, key: &str, value: f32) -> Self {
        self.push_field(key, |buf| append_f32(buf, value))
    }

    pub fn float64(self, key: &str, value: f64) -> Self {
        self.push_field(key, |buf| append_f64(buf, value))
    }

    pub fn int(self, key: &str, value: isize) -> Self {
        self.int64(key, value as i64)
    }

    pub fn int32(self, key: &str, value: i32) -> Self {
        self.int64(key, i64::from(value))
    }

    pub fn int64(self, key: &str, value: i64) -> Self {
        self.push_field(key, |buf| append_i64(buf, value))
    }

    pub fn uint(self, key: &str, value: usize) -> Self {
        self.uint64(key, value as u64)
    }

    pub fn uint32(self, key: &str, value: u32) -> Self {
        self.uint64(key, u64::from(value))
    }

    pub fn uint64(self, key: &str, value: u64) -> Self {
        self.push_field(key, |buf| append_u64(buf, value))
    }

    pub fn string(self, key: &str, value: &str) -> Self {
        self.push_field(key, |buf| append_json_string(buf, value.as_bytes()))
    }

    /// Rendered with the logger's timestamp format, in the value's own zone.
    pub fn time<Tz>(self, key: &str, value: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let logger = self.logger;
        let format = &logger.config().timestamp_format;
        self.push_field(key, |buf| {
            buf.push(b'"');
            let _ = format.write_to(value, &mut JsonEscaper(buf));
            buf.push(b'"');
        })
    }

    /// Embed any serde-serializable value as raw JSON. A value that fails to
    /// serialize is recorded as the error text instead.
    pub fn json<T: Serialize + ?Sized>(self, key: &str, value: &T) -> Self {
        self.push_field(key, |buf| {
            let start = buf.len();
            if let Err(err) = serde_json::to_writer(&mut *buf, value) {
                buf.truncate(start);
                append_display_string(buf, &err);
            }
        })
    }

    /// Dispatch on the kind of `value`.
    ///
    /// Primitives convert directly. Concrete error types go through
    /// [`FieldValue::error`] (only `&dyn Error` converts implicitly), and
    /// types that only offer formatting through [`FieldValue::display`],
    /// [`FieldValue::verbose`] or [`FieldValue::debug`]:
    ///
    /// ```
    /// use json_line_logger::prelude::*;
    ///
    /// let sink = MemorySink::new();
    /// let logger = Logger::builder(LogLevel::Info, sink.clone())
    ///     .timestamp_key("")
    ///     .caller_key("")
    ///     .build();
    ///
    /// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    /// logger.entry().any("e", FieldValue::error(&err)).infof(format_args!("lookup"));
    /// assert!(sink.contents_string().contains(r#""e":"missing""#));
    /// ```
    ///
    /// Values wrapped with [`FieldValue::display`] are always rendered through
    /// their `Display` impl; there is no null check on them.
    pub fn any<'v>(self, key: &str, value: impl Into<FieldValue<'v>>) -> Self {
        match value.into() {
            FieldValue::Null => self.null(key),
            FieldValue::Bool(v) => self.bool(key, v),
            FieldValue::Byte(v) => {
                let mut utf8 = [0; 4];
                self.string(key, char::from(v).encode_utf8(&mut utf8))
            }
            FieldValue::Bytes(v) => self.bytes(key, v),
            FieldValue::Duration(v) => self.duration(key, v),
            FieldValue::Error(v) => self.err_with_key(key, v),
            FieldValue::F32(v) => self.float32(key, v),
            FieldValue::F64(v) => self.float64(key, v),
            FieldValue::Int(v) => self.int64(key, v),
            FieldValue::Uint(v) => self.uint64(key, v),
            FieldValue::Str(v) => self.string(key, v),
            FieldValue::Time(v) => self.time(key, &v),
            FieldValue::Verbose(v) => {
                self.push_field(key, |buf| append_display_string(buf, &format_args!("{:#?}", v)))
            }
            FieldValue::Display(v) => self.push_field(key, |buf| append_display_string(buf, v)),
            FieldValue::Debug(v) => {
                self.push_field(key, |buf| append_display_string(buf, &format_args!("{:?}", v)))
            }
        }
    }

    /// Freeze the logger's persistent fields plus this entry's fields into a
    /// new child logger. The parent is left untouched.
    pub fn logger(self) -> Logger {
        let mut fields = Vec::with_capacity(self.logger.fields().len() + self.buf.len());
        fields.extend_from_slice(self.logger.fields());
        fields.extend_from_slice(&self.buf);
        self.logger.with_fields(fields)
    }

    #[inline(never)]
    pub fn debugf(self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.emit(LogLevel::Debug, args));
    }

    #[inline(never)]
    pub fn infof(self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.emit(LogLevel::Info, args));
    }

    #[inline(never)]
    pub fn warnf(self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.emit(LogLevel::Warn, args));
    }

    #[inline(never)]
    pub fn errorf(self, args: fmt::Arguments<'_>) {
        let _ = hint::black_box(self.emit(LogLevel::Error, args));
    }

    /// Emit at `level`, returning the sink error if the write failed.
    #[inline(never)]
    pub fn logf(self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        hint::black_box(self.emit(level, args))
    }

    /// Assemble the record and write it with one sink call.
    ///
    /// Must be called directly by the public logging method, and not in tail
    /// position (callers pass the result through `hint::black_box`), so the
    /// caller skip depth lands on the call site.
    /// skip depth lands on the call site.
    #[inline(never)]
    pub(crate) fn emit(self, level: LogLevel, args: fmt::Arguments<'_>) -> Result<()> {
        let config = self.logger.config();
        if !level.is_enabled_for(config.level) {
            return Ok(());
        }

        let mut record = pool::bytes_buffer();
        record.push(b'{');

        if !config.level_key.is_empty() {
            append_key(&mut record, &config.level_key);
            append_level(&mut record, level);
            record.push(b',');
        }
        if !config.timestamp_key.is_empty() {
            append_key(&mut record, &config.timestamp_key);
            record.push(b'"');
            let now = config.timestamp_zone.now();
            let _ = config
                .timestamp_format
                .write_to(&now, &mut JsonEscaper(&mut record));
            record.push(b'"');
            record.push(b',');
        }
        if !config.caller_key.is_empty() {
            append_key(&mut record, &config.caller_key);
            record.push(b'"');
            append_caller(&mut record, config.caller_skip, config.use_long_caller);
            record.push(b'"');
            record.push(b',');
        }
        if !config.message_key.is_empty() {
            append_key(&mut record, &config.message_key);
            append_arguments_string(&mut record, args);
            record.push(b',');
        }

        record.extend_from_slice(self.logger.fields());
        record.extend_from_slice(&self.buf);
        close_object(&mut record);

        let object_len = record.len();
        record.extend_from_slice(config.separator.as_bytes());

        if let Err(source) = config.sink.write(&record) {
            let err = LoggerError::sink_write(&record[..object_len], source);
            fallback::report(&err);
            return Err(err);
        }
        Ok(())
    }
}

impl fmt::Debug for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("fields", &String::from_utf8_lossy(&self.buf))
            .finish()
    }
}

/// An entry that was never emitted reads as the "not written" sentinel.
impl fmt::Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&LoggerError::EntryNotWritten, f)
    }
}

impl Error for Entry<'_> {}

/// `msg: cause: cause` rendering of an error and its sources.
struct ErrorChain<'a>(&'a (dyn Error + 'a));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(cause) = source {
            write!(f, ": {}", cause)?;
            source = cause.source();
        }
        Ok(())
    }
}

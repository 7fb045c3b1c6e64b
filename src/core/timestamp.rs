//! Timestamp formatting utilities
//!
//! Renders the timestamp field of a record and the value of `time` fields.
//! Supports RFC 3339, ISO 8601, Unix timestamps, and custom strftime formats,
//! in a configurable zone.

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp format options
///
/// Every variant is written into the record as a JSON string, numeric
/// variants included.
///
/// # Examples
///
/// ```
/// use json_line_logger::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(TimestampFormat::Rfc3339Nano.format(&at), "2024-01-01T00:00:00Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with as much sub-second precision as needed:
    /// `2025-01-08T10:30:45.123456789+09:00`, trailing zero groups trimmed.
    #[default]
    Rfc3339Nano,

    /// RFC 3339 with whole seconds: `2025-01-08T10:30:45Z`
    Rfc3339,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// # Examples
    ///
    /// ```
    /// use json_line_logger::TimestampFormat;
    ///
    /// // Apache log format
    /// let format = TimestampFormat::Custom("%d/%b/%Y:%H:%M:%S %z".to_string());
    /// ```
    Custom(String),
}

impl TimestampFormat {
    /// Write `datetime` in this format to `out`.
    ///
    /// An invalid custom specifier stops the output where it occurs and
    /// surfaces as `fmt::Error`; callers on the logging path ignore it.
    pub fn write_to<Tz, W>(&self, datetime: &DateTime<Tz>, out: &mut W) -> fmt::Result
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
        W: fmt::Write + ?Sized,
    {
        match self {
            TimestampFormat::Rfc3339Nano => {
                out.write_str(&datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            TimestampFormat::Rfc3339 => {
                out.write_str(&datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            TimestampFormat::Iso8601 => {
                out.write_str(&datetime.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            TimestampFormat::Iso8601Micros => {
                out.write_str(&datetime.to_rfc3339_opts(SecondsFormat::Micros, true))
            }
            TimestampFormat::Unix => write!(out, "{}", datetime.timestamp()),
            TimestampFormat::UnixMillis => write!(out, "{}", datetime.timestamp_millis()),
            TimestampFormat::UnixMicros => write!(out, "{}", datetime.timestamp_micros()),
            TimestampFormat::Custom(format_str) => write!(out, "{}", datetime.format(format_str)),
        }
    }

    /// Format a `DateTime` according to this format
    #[must_use]
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let mut out = String::new();
        let _ = self.write_to(datetime, &mut out);
        out
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

/// Zone the record timestamp is rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampZone {
    Utc,
    /// The process-local zone.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl TimestampZone {
    /// Current instant expressed in this zone.
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            TimestampZone::Utc => Utc::now().into(),
            TimestampZone::Local => Local::now().into(),
            TimestampZone::Fixed(offset) => Utc::now().with_timezone(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45.123456 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_rfc3339_nano_trims_precision() {
        let format = TimestampFormat::Rfc3339Nano;
        assert_eq!(format.format(&fixed_datetime()), "2025-01-08T10:30:45.123456Z");

        let whole = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format.format(&whole), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_rfc3339_with_offset() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = fixed_datetime().with_timezone(&tokyo);
        assert_eq!(TimestampFormat::Rfc3339.format(&at), "2025-01-08T19:30:45+09:00");
    }

    #[test]
    fn test_iso8601_format() {
        let result = TimestampFormat::Iso8601.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimestampFormat::Iso8601Micros.format(&fixed_datetime());
        assert_eq!(result, "2025-01-08T10:30:45.123456Z");
    }

    #[test]
    fn test_unix_formats() {
        let at = fixed_datetime();
        assert_eq!(TimestampFormat::Unix.format(&at), "1736332245");
        assert_eq!(TimestampFormat::UnixMillis.format(&at), "1736332245123");
        assert_eq!(TimestampFormat::UnixMicros.format(&at), "1736332245123456");
    }

    #[test]
    fn test_custom_format() {
        let format = TimestampFormat::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(format.format(&fixed_datetime()), "2025/01/08 10:30");
    }

    #[test]
    fn test_invalid_custom_format_does_not_panic() {
        let format = TimestampFormat::Custom("%Y %Q".to_string());
        let mut out = String::new();
        assert!(format.write_to(&fixed_datetime(), &mut out).is_err());
        let _ = format.format(&fixed_datetime());
    }

    #[test]
    fn test_default_is_rfc3339_nano() {
        assert_eq!(TimestampFormat::default(), TimestampFormat::Rfc3339Nano);
        assert_eq!(TimestampZone::default(), TimestampZone::Local);
    }

    #[test]
    fn test_is_numeric() {
        assert!(!TimestampFormat::Rfc3339Nano.is_numeric());
        assert!(!TimestampFormat::Iso8601.is_numeric());
        assert!(TimestampFormat::Unix.is_numeric());
        assert!(TimestampFormat::UnixMillis.is_numeric());
        assert!(TimestampFormat::UnixMicros.is_numeric());
        assert!(!TimestampFormat::Custom("%Y".to_string()).is_numeric());
    }

    #[test]
    fn test_zone_now() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = TimestampZone::Fixed(offset).now();
        assert_eq!(now.offset().local_minus_utc(), -5 * 3600);

        let utc = TimestampZone::Utc.now();
        assert_eq!(utc.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TimestampFormat::Rfc3339Nano).expect("serialize");
        assert_eq!(json, "\"Rfc3339Nano\"");

        let format: TimestampFormat =
            serde_json::from_str(r#"{"Custom":"%Y-%m-%d"}"#).expect("deserialize Custom");
        assert_eq!(format, TimestampFormat::Custom("%Y-%m-%d".to_string()));
    }
}

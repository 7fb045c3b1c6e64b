//! Values accepted by [`Entry::any`](super::entry::Entry::any)
//!
//! `FieldValue` is a closed set of the kinds the encoder knows how to render.
//! Primitive kinds convert with `From`; values that only offer formatting
//! capabilities are wrapped explicitly with [`FieldValue::error`],
//! [`FieldValue::verbose`], [`FieldValue::display`] or [`FieldValue::debug`].
//! Errors convert implicitly only as `&dyn Error`; a concrete error type is
//! passed through [`FieldValue::error`].

use chrono::{DateTime, FixedOffset, TimeZone};
use std::error::Error;
use std::fmt;
use std::time::Duration;

/// A borrowed value of one of the supported field kinds.
///
/// # Example
///
/// ```
/// use json_line_logger::FieldValue;
/// use std::net::Ipv4Addr;
///
/// let addr = Ipv4Addr::LOCALHOST;
/// let values = [
///     FieldValue::from(3_u16),
///     FieldValue::from("text"),
///     FieldValue::from(None::<bool>),
///     FieldValue::display(&addr),
/// ];
/// assert_eq!(values.len(), 4);
/// ```
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Rendered as `null`.
    Null,
    Bool(bool),
    /// A single byte, rendered as the one-character string of that code point.
    Byte(u8),
    /// Raw bytes, escaped into a JSON string (not base64).
    Bytes(&'a [u8]),
    /// Rendered with its `Debug` form, e.g. `1.5s`.
    Duration(Duration),
    Error(&'a (dyn Error + 'a)),
    F32(f32),
    F64(f64),
    /// Any signed integer width, widened to 64 bits.
    Int(i64),
    /// Any unsigned integer width except `u8`, widened to 64 bits.
    Uint(u64),
    Str(&'a str),
    /// Formatted with the logger's timestamp format.
    Time(DateTime<FixedOffset>),
    /// Detailed rendering through alternate `Debug` (`{:#?}`).
    Verbose(&'a (dyn fmt::Debug + 'a)),
    /// Simple rendering through `Display`.
    Display(&'a (dyn fmt::Display + 'a)),
    /// Generic rendering through `Debug` (`{:?}`).
    Debug(&'a (dyn fmt::Debug + 'a)),
}

impl<'a> FieldValue<'a> {
    pub fn error(err: &'a (dyn Error + 'a)) -> Self {
        FieldValue::Error(err)
    }

    pub fn verbose(value: &'a (dyn fmt::Debug + 'a)) -> Self {
        FieldValue::Verbose(value)
    }

    pub fn display(value: &'a (dyn fmt::Display + 'a)) -> Self {
        FieldValue::Display(value)
    }

    pub fn debug(value: &'a (dyn fmt::Debug + 'a)) -> Self {
        FieldValue::Debug(value)
    }

    /// Short name of the kind, as used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Byte(_) => "byte",
            FieldValue::Bytes(_) => "bytes",
            FieldValue::Duration(_) => "duration",
            FieldValue::Error(_) => "error",
            FieldValue::F32(_) => "f32",
            FieldValue::F64(_) => "f64",
            FieldValue::Int(_) => "int",
            FieldValue::Uint(_) => "uint",
            FieldValue::Str(_) => "string",
            FieldValue::Time(_) => "time",
            FieldValue::Verbose(_) => "verbose",
            FieldValue::Display(_) => "display",
            FieldValue::Debug(_) => "debug",
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("Null"),
            FieldValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            FieldValue::Byte(v) => f.debug_tuple("Byte").field(v).finish(),
            FieldValue::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            FieldValue::Duration(v) => f.debug_tuple("Duration").field(v).finish(),
            FieldValue::Error(v) => f.debug_tuple("Error").field(&v.to_string()).finish(),
            FieldValue::F32(v) => f.debug_tuple("F32").field(v).finish(),
            FieldValue::F64(v) => f.debug_tuple("F64").field(v).finish(),
            FieldValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            FieldValue::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            FieldValue::Str(v) => f.debug_tuple("Str").field(v).finish(),
            FieldValue::Time(v) => f.debug_tuple("Time").field(v).finish(),
            FieldValue::Verbose(v) => f.debug_tuple("Verbose").field(v).finish(),
            FieldValue::Display(v) => f.debug_tuple("Display").field(&v.to_string()).finish(),
            FieldValue::Debug(v) => f.debug_tuple("Debug").field(v).finish(),
        }
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<Option<bool>> for FieldValue<'_> {
    fn from(v: Option<bool>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Bool)
    }
}

impl<'a> From<Option<&'a bool>> for FieldValue<'a> {
    fn from(v: Option<&'a bool>) -> Self {
        v.map_or(FieldValue::Null, |b| FieldValue::Bool(*b))
    }
}

impl From<u8> for FieldValue<'_> {
    fn from(v: u8) -> Self {
        FieldValue::Byte(v)
    }
}

impl<'a> From<&'a [u8]> for FieldValue<'a> {
    fn from(v: &'a [u8]) -> Self {
        FieldValue::Bytes(v)
    }
}

impl<'a> From<&'a Vec<u8>> for FieldValue<'a> {
    fn from(v: &'a Vec<u8>) -> Self {
        FieldValue::Bytes(v)
    }
}

impl From<Duration> for FieldValue<'_> {
    fn from(v: Duration) -> Self {
        FieldValue::Duration(v)
    }
}

impl From<f32> for FieldValue<'_> {
    fn from(v: f32) -> Self {
        FieldValue::F32(v)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(v: f64) -> Self {
        FieldValue::F64(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue<'_> {
                fn from(v: $t) -> Self {
                    FieldValue::Int(v as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue<'_> {
                fn from(v: $t) -> Self {
                    FieldValue::Uint(v as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u16, u32, u64, usize);

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(v: &'a str) -> Self {
        FieldValue::Str(v)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(v: &'a String) -> Self {
        FieldValue::Str(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue<'_> {
    fn from(v: DateTime<Tz>) -> Self {
        FieldValue::Time(v.fixed_offset())
    }
}

impl<'a, Tz: TimeZone> From<&'a DateTime<Tz>> for FieldValue<'a> {
    fn from(v: &'a DateTime<Tz>) -> Self {
        FieldValue::Time(v.fixed_offset())
    }
}

impl<'a> From<&'a (dyn Error + 'a)> for FieldValue<'a> {
    fn from(v: &'a (dyn Error + 'a)) -> Self {
        FieldValue::Error(v)
    }
}

impl<'a> From<&'a (dyn Error + Send + Sync + 'a)> for FieldValue<'a> {
    fn from(v: &'a (dyn Error + Send + Sync + 'a)) -> Self {
        FieldValue::Error(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_integer_widths_normalise() {
        assert!(matches!(FieldValue::from(-8_i8), FieldValue::Int(-8)));
        assert!(matches!(FieldValue::from(i32::MIN), FieldValue::Int(v) if v == i32::MIN as i64));
        assert!(matches!(FieldValue::from(u16::MAX), FieldValue::Uint(65535)));
        assert!(matches!(FieldValue::from(u64::MAX), FieldValue::Uint(u64::MAX)));
        assert!(matches!(FieldValue::from(7_usize), FieldValue::Uint(7)));
    }

    #[test]
    fn test_byte_is_not_an_integer() {
        assert!(matches!(FieldValue::from(b'A'), FieldValue::Byte(b'A')));
    }

    #[test]
    fn test_optional_bool() {
        assert!(matches!(FieldValue::from(None::<bool>), FieldValue::Null));
        assert!(matches!(FieldValue::from(Some(true)), FieldValue::Bool(true)));
        let flag = false;
        assert!(matches!(FieldValue::from(Some(&flag)), FieldValue::Bool(false)));
    }

    #[test]
    fn test_time_keeps_offset() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        match FieldValue::from(at) {
            FieldValue::Time(t) => assert_eq!(t.timestamp(), at.timestamp()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let boxed: Box<dyn Error + Send + Sync> = Box::new(io_err);
        let value = FieldValue::from(boxed.as_ref());
        assert_eq!(value.kind(), "error");
        assert_eq!(format!("{:?}", value), r#"Error("missing")"#);
    }

    #[test]
    fn test_capability_wrappers() {
        let addr = std::net::Ipv4Addr::new(10, 0, 0, 1);
        assert_eq!(FieldValue::display(&addr).kind(), "display");
        assert_eq!(FieldValue::verbose(&addr).kind(), "verbose");
        assert_eq!(FieldValue::debug(&addr).kind(), "debug");
    }
}

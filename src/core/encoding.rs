//! JSON encoding helpers
//!
//! Pure append-style functions used by entries and loggers to build records
//! directly into pooled buffers. None of them can fail: every input byte has
//! a defined encoding.

use super::log_level::LogLevel;
use std::fmt;
use std::io::Write as _;

pub(crate) const NULL: &[u8] = b"null";

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Append `s` with JSON string escaping, without surrounding quotes.
///
/// Works byte-wise: `"` and `\` are backslash-escaped, control bytes get
/// their short escape or `\u00XX`, everything else (including multi-byte
/// UTF-8 sequences) is copied through.
pub fn append_json_escaped(dst: &mut Vec<u8>, s: &[u8]) {
    // copy unescaped runs in one go
    let mut start = 0;
    for (i, &b) in s.iter().enumerate() {
        if b != b'"' && b != b'\\' && b > 0x1F {
            continue;
        }
        dst.extend_from_slice(&s[start..i]);
        start = i + 1;

        // cf. https://tools.ietf.org/html/rfc8259#section-7
        match b {
            b'"' | b'\\' => dst.extend_from_slice(&[b'\\', b]),
            0x08 => dst.extend_from_slice(b"\\b"),
            0x0C => dst.extend_from_slice(b"\\f"),
            b'\n' => dst.extend_from_slice(b"\\n"),
            b'\r' => dst.extend_from_slice(b"\\r"),
            b'\t' => dst.extend_from_slice(b"\\t"),
            _ => dst.extend_from_slice(&[
                b'\\',
                b'u',
                b'0',
                b'0',
                HEX[(b >> 4) as usize],
                HEX[(b & 0x0F) as usize],
            ]),
        }
    }
    dst.extend_from_slice(&s[start..]);
}

/// Append `"s"` as a complete JSON string.
pub fn append_json_string(dst: &mut Vec<u8>, s: &[u8]) {
    dst.push(b'"');
    append_json_escaped(dst, s);
    dst.push(b'"');
}

/// Append `"key":`.
pub fn append_key(dst: &mut Vec<u8>, key: &str) {
    append_json_string(dst, key.as_bytes());
    dst.push(b':');
}

/// Append a `Display` value as a complete JSON string, escaping as it is
/// formatted so no intermediate `String` is built.
pub fn append_display_string(dst: &mut Vec<u8>, value: &dyn fmt::Display) {
    dst.push(b'"');
    let _ = fmt::write(&mut JsonEscaper(dst), format_args!("{}", value));
    dst.push(b'"');
}

/// Append formatted arguments as a complete JSON string. A literal with no
/// arguments is copied verbatim, without any formatting pass.
pub fn append_arguments_string(dst: &mut Vec<u8>, args: fmt::Arguments<'_>) {
    dst.push(b'"');
    match args.as_str() {
        Some(literal) => append_json_escaped(dst, literal.as_bytes()),
        None => {
            let _ = fmt::write(&mut JsonEscaper(dst), args);
        }
    }
    dst.push(b'"');
}

/// Append a float, mapping non-finite values to the strings `"NaN"`,
/// `"+Inf"` and `"-Inf"`. Finite values use the shortest decimal form that
/// round-trips at the given width, never an exponent.
pub fn append_f64(dst: &mut Vec<u8>, value: f64) {
    if let Some(special) = non_finite(value) {
        dst.extend_from_slice(special);
        return;
    }
    let _ = write!(dst, "{}", value);
}

/// `f32` counterpart of [`append_f64`]; shortest form at 32-bit precision.
pub fn append_f32(dst: &mut Vec<u8>, value: f32) {
    if let Some(special) = non_finite(f64::from(value)) {
        dst.extend_from_slice(special);
        return;
    }
    let _ = write!(dst, "{}", value);
}

fn non_finite(value: f64) -> Option<&'static [u8]> {
    if value.is_nan() {
        Some(br#""NaN""#)
    } else if value == f64::INFINITY {
        Some(br#""+Inf""#)
    } else if value == f64::NEG_INFINITY {
        Some(br#""-Inf""#)
    } else {
        None
    }
}

pub fn append_i64(dst: &mut Vec<u8>, value: i64) {
    let _ = write!(dst, "{}", value);
}

pub fn append_u64(dst: &mut Vec<u8>, value: u64) {
    let _ = write!(dst, "{}", value);
}

pub fn append_bool(dst: &mut Vec<u8>, value: bool) {
    dst.extend_from_slice(if value { b"true" } else { b"false" });
}

/// Append the quoted level name.
pub fn append_level(dst: &mut Vec<u8>, level: LogLevel) {
    dst.push(b'"');
    dst.extend_from_slice(level.to_str().as_bytes());
    dst.push(b'"');
}

/// Close a record: turn a pending trailing comma into `}` or append `}`.
pub fn close_object(dst: &mut Vec<u8>) {
    match dst.last_mut() {
        Some(last) if *last == b',' => *last = b'}',
        _ => dst.push(b'}'),
    }
}

/// Last two segments of `path` (`dir/file.rs`), or `path` itself when it has
/// fewer than two separators.
pub fn extract_short_path(path: &str) -> &str {
    const SEPARATORS: &[char] = &['/', '\\'];

    // /path/to/directory/file
    //                   ^ idx
    let Some(idx) = path.rfind(SEPARATORS) else {
        return path;
    };
    // /path/to/directory
    //         ^ idx
    let Some(idx) = path[..idx].rfind(SEPARATORS) else {
        return path;
    };
    &path[idx + 1..]
}

/// `fmt::Write` adapter that JSON-escapes everything written through it.
pub(crate) struct JsonEscaper<'a>(pub(crate) &'a mut Vec<u8>);

impl fmt::Write for JsonEscaper<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        append_json_escaped(self.0, s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(s: &str) -> String {
        let mut dst = Vec::new();
        append_json_escaped(&mut dst, s.as_bytes());
        String::from_utf8(dst).unwrap()
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escaped("plain text"), "plain text");
        assert_eq!(escaped("日本語 ✓"), "日本語 ✓");
        assert_eq!(escaped(""), "");
    }

    #[test]
    fn test_escape_specials() {
        assert_eq!(escaped(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escaped(r"C:\dir"), r"C:\\dir");
        assert_eq!(escaped("a\nb\rc\td"), r"a\nb\rc\td");
        assert_eq!(escaped("\u{8}\u{c}"), r"\b\f");
    }

    #[test]
    fn test_escape_other_controls() {
        assert_eq!(escaped("\u{0}"), r"\u0000");
        assert_eq!(escaped("\u{1}x\u{1f}"), r"\u0001x\u001f");
        // DEL is above the control range and passes through
        assert_eq!(escaped("\u{7f}"), "\u{7f}");
    }

    #[test]
    fn test_escape_is_bytewise() {
        let mut dst = Vec::new();
        append_json_escaped(&mut dst, b"\xff\"");
        assert_eq!(dst, b"\xff\\\"");
    }

    #[test]
    fn test_key() {
        let mut dst = Vec::new();
        append_key(&mut dst, "we\"ird");
        assert_eq!(dst, br#""we\"ird":"#);
    }

    #[test]
    fn test_float_specials() {
        let mut dst = Vec::new();
        append_f64(&mut dst, f64::NAN);
        dst.push(b' ');
        append_f64(&mut dst, f64::INFINITY);
        dst.push(b' ');
        append_f32(&mut dst, f32::NEG_INFINITY);
        assert_eq!(dst, br#""NaN" "+Inf" "-Inf""#);
    }

    #[test]
    fn test_float_shortest() {
        let mut dst = Vec::new();
        append_f64(&mut dst, 0.1);
        dst.push(b' ');
        append_f32(&mut dst, 0.1);
        dst.push(b' ');
        append_f64(&mut dst, 1e21);
        assert_eq!(dst, b"0.1 0.1 1000000000000000000000");
    }

    #[test]
    fn test_arguments_literal_is_verbatim() {
        let mut dst = Vec::new();
        append_arguments_string(&mut dst, format_args!("100% done"));
        assert_eq!(dst, br#""100% done""#);

        let mut dst = Vec::new();
        append_arguments_string(&mut dst, format_args!("retry {}\n", 1));
        assert_eq!(dst, br#""retry 1\n""#);
    }

    #[test]
    fn test_display_string_escapes_while_formatting() {
        let mut dst = Vec::new();
        append_display_string(&mut dst, &"tab\there");
        assert_eq!(dst, br#""tab\there""#);
    }

    #[test]
    fn test_level() {
        let mut dst = Vec::new();
        append_level(&mut dst, LogLevel::Warn);
        assert_eq!(dst, br#""WARNING""#);
    }

    #[test]
    fn test_close_object() {
        let mut dst = b"{\"a\":1,".to_vec();
        close_object(&mut dst);
        assert_eq!(dst, b"{\"a\":1}");

        let mut dst = b"{".to_vec();
        close_object(&mut dst);
        assert_eq!(dst, b"{}");
    }

    #[test]
    fn test_short_path() {
        assert_eq!(extract_short_path("/path/to/directory/file.rs"), "directory/file.rs");
        assert_eq!(extract_short_path("src/lib.rs"), "src/lib.rs");
        assert_eq!(extract_short_path("/lib.rs"), "/lib.rs");
        assert_eq!(extract_short_path("lib.rs"), "lib.rs");
        assert_eq!(extract_short_path(""), "");
        assert_eq!(extract_short_path(r"C:\work\src\main.rs"), r"src\main.rs");
    }
}

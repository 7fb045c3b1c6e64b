//! Caller resolution
//!
//! Walks the current stack into a pooled instruction-pointer buffer and
//! renders the attributed frame as `file:line`.
//!
//! Frames are counted from the resolver itself: skip 0 is [`append_caller`],
//! skip 1 the function that called it, and so on. The walk is anchored on
//! the address of the capturing function rather than on a raw depth, so
//! frames belonging to the unwinder never shift the count.

use super::encoding::{append_json_escaped, append_u64, extract_short_path};
use super::pool;
use std::path::Path;

/// Source location of one resolved frame. Unresolved parts stay empty and
/// render as `:0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerFrame {
    pub file: String,
    pub line: u32,
}

impl CallerFrame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Append the caller `skip` frames above the resolver.
#[inline(never)]
pub fn append_caller(dst: &mut Vec<u8>, skip: usize, use_long_caller: bool) {
    let mut frames = pool::frame_buffer();
    let captured = capture(&mut frames);

    let frame = frames[..captured]
        .get(skip)
        .and_then(|&ip| resolve(ip))
        .unwrap_or_default();
    append_caller_from_frame(dst, &frame, use_long_caller);
}

/// Fill `frames` with the instruction pointers of this function's callers,
/// innermost first. Returns how many slots were written; zero when the
/// unwinder cannot locate this function's own frame.
#[inline(never)]
fn capture(frames: &mut [usize]) -> usize {
    let anchor = capture as *const () as usize;
    let mut anchored = false;
    let mut captured = 0;

    backtrace::trace(|frame| {
        if !anchored {
            anchored = frame.symbol_address() as usize == anchor;
            return true;
        }
        frames[captured] = frame.ip() as usize;
        captured += 1;
        captured < frames.len()
    });

    captured
}

/// Source location of the innermost symbol at `ip` that has debug info.
fn resolve(ip: usize) -> Option<CallerFrame> {
    let mut found = None;
    backtrace::resolve(ip as *mut std::ffi::c_void, |symbol| {
        if found.is_some() {
            return;
        }
        if let Some(file) = symbol.filename() {
            found = Some(CallerFrame {
                file: path_to_string(file),
                line: symbol.lineno().unwrap_or(0),
            });
        }
    });
    found
}

/// Render `frame` as `file:line`, JSON-escaped, without quotes. The short
/// form keeps the last two path segments.
pub fn append_caller_from_frame(dst: &mut Vec<u8>, frame: &CallerFrame, use_long_caller: bool) {
    let file = if use_long_caller {
        frame.file.as_str()
    } else {
        extract_short_path(&frame.file)
    };
    append_json_escaped(dst, file.as_bytes());
    dst.push(b':');
    append_u64(dst, u64::from(frame.line));
}

fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

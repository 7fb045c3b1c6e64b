//! In-memory sink

use crate::core::Sink;
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Collects records in a shared buffer. Clones share the same buffer, so a
/// test can hand one clone to a logger and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
    writes: Arc<AtomicUsize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.buf.lock().clone()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    /// Records split on `\n`, without the separator.
    pub fn lines(&self) -> Vec<String> {
        self.contents_string().lines().map(str::to_owned).collect()
    }

    /// Number of `write` calls received.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
        self.writes.store(0, Ordering::Release);
    }
}

impl Sink for MemorySink {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(record);
        self.writes.fetch_add(1, Ordering::AcqRel);
        Ok(record.len())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        handle.write(b"{}\n").unwrap();
        handle.write(b"{\"a\":1}\n").unwrap();

        assert_eq!(sink.write_count(), 2);
        assert_eq!(sink.lines(), vec!["{}".to_string(), "{\"a\":1}".to_string()]);

        sink.clear();
        assert!(handle.contents().is_empty());
        assert_eq!(handle.write_count(), 0);
    }
}

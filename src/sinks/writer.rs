//! Sinks over `io::Write` destinations

use crate::core::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Adapts any `io::Write` into a [`Sink`].
///
/// The writer sits behind a lock so each record reaches it as one
/// uninterrupted `write_all`. Nothing is flushed implicitly; wrap a
/// `BufWriter` only if you call [`WriterSink::flush`] yourself.
pub struct WriterSink<W: Write + Send> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        self.inner.lock().flush()
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        self.inner.lock().write_all(record)?;
        Ok(record.len())
    }

    fn name(&self) -> &str {
        "writer"
    }
}

/// Standard output. Each record is written under the stdout lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        io::stdout().lock().write_all(record)?;
        Ok(record.len())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// Standard error. Each record is written under the stderr lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        io::stderr().lock().write_all(record)?;
        Ok(record.len())
    }

    fn name(&self) -> &str {
        "stderr"
    }
}

//! Sink trait for record destinations

use std::io;
use std::sync::Arc;

/// Destination of serialized records.
///
/// `write` receives one complete record, separator included, and is called
/// exactly once per emitted record. Implementations shared across threads
/// must keep concurrent records from interleaving.
pub trait Sink: Send + Sync {
    fn write(&self, record: &[u8]) -> io::Result<usize>;

    fn name(&self) -> &str {
        "sink"
    }
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, record: &[u8]) -> io::Result<usize> {
        (**self).write(record)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

//! Scratch buffer pools for the encoding path
//!
//! Two process-wide pools: growable byte buffers for serialized records and
//! fixed-length instruction-pointer buffers for caller resolution. A buffer
//! is handed out inside a [`Pooled`] guard and goes back to its pool when the
//! guard drops, so every exit path returns it exactly once.

use parking_lot::Mutex;
use std::ops::{Deref, DerefMut};

/// Initial capacity of a fresh byte buffer.
pub const BYTES_BUFFER_CAPACITY: usize = 1024;

/// Byte buffers that grew beyond this are dropped instead of recycled.
pub const BYTES_BUFFER_RETAIN_LIMIT: usize = 64 * 1024;

/// Number of stack frames a frame buffer can hold.
pub const FRAME_BUFFER_LEN: usize = 64;

static BYTES_POOL: Pool<Vec<u8>> = Pool::new(new_bytes, reset_bytes);
static FRAME_POOL: Pool<Vec<usize>> = Pool::new(new_frames, keep_frames);

fn new_bytes() -> Vec<u8> {
    Vec::with_capacity(BYTES_BUFFER_CAPACITY)
}

fn reset_bytes(buf: &mut Vec<u8>) -> bool {
    buf.clear();
    buf.capacity() <= BYTES_BUFFER_RETAIN_LIMIT
}

fn new_frames() -> Vec<usize> {
    vec![0; FRAME_BUFFER_LEN]
}

fn keep_frames(buf: &mut Vec<usize>) -> bool {
    // length is part of the contract, the walker writes by index
    buf.len() == FRAME_BUFFER_LEN
}

/// Borrow an empty byte buffer. Capacity from earlier use is retained.
pub fn bytes_buffer() -> Pooled<Vec<u8>> {
    BYTES_POOL.get()
}

/// Borrow a frame buffer of exactly [`FRAME_BUFFER_LEN`] slots.
pub fn frame_buffer() -> Pooled<Vec<usize>> {
    FRAME_POOL.get()
}

/// Unbounded free list. Under contention `get` allocates rather than waits
/// on anything but the short critical section of the list itself.
pub struct Pool<T: 'static> {
    free: Mutex<Vec<T>>,
    new: fn() -> T,
    reset: fn(&mut T) -> bool,
}

impl<T: 'static> Pool<T> {
    /// `reset` prepares a returned value for reuse and reports whether it
    /// should be kept.
    pub const fn new(new: fn() -> T, reset: fn(&mut T) -> bool) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            new,
            reset,
        }
    }

    pub fn get(&'static self) -> Pooled<T> {
        let value = self.free.lock().pop().unwrap_or_else(self.new);
        Pooled {
            value: Some(value),
            pool: self,
        }
    }

    fn put(&self, mut value: T) {
        if (self.reset)(&mut value) {
            self.free.lock().push(value);
        }
    }

    /// Number of values currently parked in the pool.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

/// A value on loan from a [`Pool`].
pub struct Pooled<T: 'static> {
    value: Option<T>,
    pool: &'static Pool<T>,
}

impl<T> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        // only `drop` takes the value out
        self.value.as_ref().unwrap_or_else(|| unreachable!())
    }
}

impl<T> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.value.as_mut().unwrap_or_else(|| unreachable!())
    }
}

impl<T> Drop for Pooled<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.put(value);
        }
    }
}

//! `OutputBuffer`: single-syscall accumulator for one tick's ANSI payload.

use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// Each tick accumulates its entire composite payload here, then the actor
/// flushes it to the terminal in one `write` call to prevent tearing.
///
/// Motion is cursor-relative only (`CUU`/`CUD`): the engine never knows an
/// absolute screen position, it only owns the rows between the cursor and
/// the top of the block region.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical tick (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the buffer, yielding the accumulated bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Terminate the current row.
    #[inline]
    pub fn newline(&mut self) {
        self.data.push(b'\n');
    }

    /// Move the cursor up `n` rows (no-op for 0).
    #[inline]
    pub fn cursor_up(&mut self, n: usize) {
        if n > 0 {
            write!(self.data, "\x1b[{n}A").unwrap();
        }
    }

    /// Move the cursor down `n` rows (no-op for 0).
    #[inline]
    pub fn cursor_down(&mut self, n: usize) {
        if n > 0 {
            write!(self.data, "\x1b[{n}B").unwrap();
        }
    }

    /// True when the last byte written is a line break.
    #[inline]
    pub fn ends_with_newline(&self) -> bool {
        self.data.last() == Some(&b'\n')
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

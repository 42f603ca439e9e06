// SPDX-License-Identifier: MIT
//
// Frame output buffering.
//
// A frame is composed entirely in memory and reaches the terminal through a
// single `write_all` followed by one flush. The terminal never sees a
// half-built frame: either every byte goes out together or, if growing the
// buffer fails, the bytes that could not be stored are dropped before they
// ever touch the device.
//
// Lifecycle: create one `OutputBuffer` per frame, append to it, then
// `flush_to` consumes it. There is no reuse across frames.

use std::io::{self, Write};

use log::warn;

/// Enough for a full 80×24 frame of markers and escapes without regrowth.
const DEFAULT_CAPACITY: usize = 4096;

/// An append-only byte buffer for a single frame.
#[derive(Debug)]
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    /// Create an empty buffer with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer, reserving `capacity` bytes up front.
    ///
    /// If the reservation fails the buffer starts empty and grows on demand.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::new();
        if buf.try_reserve(capacity).is_err() {
            warn!("frame buffer: could not reserve {capacity} bytes");
        }
        Self { buf }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append `bytes` to the frame.
    ///
    /// If the buffer cannot grow, the append is dropped and the existing
    /// content is left exactly as it was.
    pub fn append(&mut self, bytes: &[u8]) {
        if self.buf.try_reserve(bytes.len()).is_err() {
            warn!("frame buffer: dropped {} byte append", bytes.len());
            return;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Write the whole frame to `w` in one `write_all`, then flush.
    ///
    /// Consumes the buffer: a frame is flushed once and discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to or flushing `w` fails.
    pub fn flush_to(self, w: &mut impl Write) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        w.write_all(&self.buf)?;
        w.flush()
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Reports full success even when the append was dropped, so callers
        // using `write!` keep going and the frame simply renders short.
        self.append(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing happens in flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

// SPDX-License-Identifier: MIT
//
// Key decoding.
//
// Turns raw terminal bytes into logical keys, one key per call. Bytes are
// pulled from a `ByteSource` one at a time; in raw mode every pull waits at
// most one read timeout (a decisecond by default), so nothing here can block
// forever.
//
// Recognised sequences:
//
//   ESC [ A / B / C / D     arrows (up, down, right, left)
//   ESC [ 3 ~               delete
//
// Anything else that starts with ESC, including an ESC with nothing behind
// it before the timeout, decodes to `Key::Escape`. Bytes already consumed
// by an unrecognised sequence are not replayed.
//
// The first byte of a key is retried until one arrives; "no data yet" is
// the normal idle state, not an error. Follow-up bytes of an escape
// sequence get exactly one bounded attempt each.

use std::io;

use log::{debug, warn};

use crate::error::{Error, Result, is_transient};

/// The escape byte that introduces every control sequence.
pub const ESC: u8 = 0x1B;

/// The byte produced by pressing Ctrl together with `key`.
///
/// The terminal strips the upper three bits: `ctrl(b'q') == 0x11`.
#[inline]
#[must_use]
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1F
}

// ─── Key ─────────────────────────────────────────────────────────────────────

/// A decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable or control byte, delivered as-is.
    Byte(u8),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    /// ESC pressed alone, or an escape sequence we do not understand.
    Escape,
}

impl Key {
    /// True if this is the byte Ctrl+`key` produces.
    #[inline]
    #[must_use]
    pub const fn is_ctrl(self, key: u8) -> bool {
        matches!(self, Self::Byte(b) if b == ctrl(key))
    }
}

// ─── ByteSource ──────────────────────────────────────────────────────────────

/// Somewhere raw input bytes come from.
///
/// `Ok(None)` means the bounded wait elapsed with no data. Implementations
/// should return errors untouched; classification into transient and fatal
/// happens in the decoder.
pub trait ByteSource {
    /// Read at most one byte, waiting no longer than the read timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the read fails.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }
}

// ─── KeyDecoder ──────────────────────────────────────────────────────────────

/// Decodes keys from a [`ByteSource`].
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    /// Wrap a byte source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Unwrap the decoder, returning the source.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Block until one key has been decoded.
    ///
    /// Waits in bounded steps for the first byte, retrying through timeouts
    /// and transient errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if reading the first byte fails with a
    /// non-transient error.
    pub fn read_key(&mut self) -> Result<Key> {
        let first = self.wait_for_byte()?;
        if first != ESC {
            return Ok(Key::Byte(first));
        }

        let Some(intro) = self.try_byte() else {
            return Ok(Key::Escape);
        };
        let Some(code) = self.try_byte() else {
            return Ok(Key::Escape);
        };

        if intro == b'[' {
            if code.is_ascii_digit() {
                let Some(last) = self.try_byte() else {
                    return Ok(Key::Escape);
                };
                if last == b'~' && code == b'3' {
                    return Ok(Key::Delete);
                }
                debug!("unrecognised sequence ESC [ {} {}", code as char, last as char);
            } else {
                match code {
                    b'A' => return Ok(Key::ArrowUp),
                    b'B' => return Ok(Key::ArrowDown),
                    b'C' => return Ok(Key::ArrowRight),
                    b'D' => return Ok(Key::ArrowLeft),
                    _ => debug!("unrecognised sequence ESC [ {}", code as char),
                }
            }
        } else {
            debug!("unrecognised sequence ESC {:#04x} {:#04x}", intro, code);
        }

        Ok(Key::Escape)
    }

    /// Iterate over keys as they arrive.
    ///
    /// The iterator yields the first fatal error it meets and then ends.
    pub fn keys(&mut self) -> Keys<'_, S> {
        Keys {
            decoder: self,
            done: false,
        }
    }

    /// Retry single-byte reads until one byte arrives.
    fn wait_for_byte(&mut self) -> Result<u8> {
        loop {
            match self.source.read_byte() {
                Ok(Some(byte)) => return Ok(byte),
                Ok(None) => {}
                Err(e) if is_transient(&e) => {}
                Err(e) => return Err(Error::Read(e)),
            }
        }
    }

    /// One bounded attempt at the next byte of an escape sequence.
    ///
    /// Any failure, timeout or otherwise, ends the sequence.
    fn try_byte(&mut self) -> Option<u8> {
        match self.source.read_byte() {
            Ok(byte) => byte,
            Err(e) => {
                if !is_transient(&e) {
                    warn!("read inside escape sequence failed: {e}");
                }
                None
            }
        }
    }
}

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Lazy sequence of decoded keys. Created by [`KeyDecoder::keys`].
pub struct Keys<'a, S> {
    decoder: &'a mut KeyDecoder<S>,
    done: bool,
}

impl<S: ByteSource> Iterator for Keys<'_, S> {
    type Item = Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let key = self.decoder.read_key();
        self.done = key.is_err();
        Some(key)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

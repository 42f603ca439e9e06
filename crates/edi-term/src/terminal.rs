// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode and RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), and single-byte reads on stdin. These are
// the standard POSIX interfaces for terminal control; there is no safe
// alternative. Each unsafe block is minimal.
#![allow(unsafe_code)]
//
// `RawMode` is a scoped guard. Enabling it captures the original attributes
// and switches the device to raw, unbuffered input; dropping it (on a normal
// return, an early `?`, or a fatal error unwinding to `main`) puts the
// original attributes back. Restoration on the happy path goes through
// `disable`, which reports failure; the drop path can only log it.
//
// The attribute device is a trait so the raw-mode transform and the restore
// round trip can be exercised without a real TTY.

use std::io::{self, Write};
use std::os::unix::io::RawFd;

use log::{debug, error};

use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::input::ByteSource;

// ─── Read Policy ─────────────────────────────────────────────────────────────

/// How `read()` behaves once raw mode is on (`VMIN` / `VTIME`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Minimum bytes before `read()` returns.
    pub min_bytes: u8,
    /// Maximum wait per `read()`, in tenths of a second.
    pub timeout_ds: u8,
}

impl Default for ReadPolicy {
    /// Return after at most 100ms, with or without data. Keeps the input
    /// loop responsive without spinning.
    fn default() -> Self {
        Self {
            min_bytes: 0,
            timeout_ds: 1,
        }
    }
}

// ─── Attribute Device ────────────────────────────────────────────────────────

/// Something whose termios attributes can be read and replaced.
pub trait AttrDevice {
    /// Capture the current attributes.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the attributes cannot be read.
    fn get_attrs(&self) -> io::Result<libc::termios>;

    /// Apply `attrs`, discarding pending input first.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the attributes cannot be applied.
    fn set_attrs(&mut self, attrs: &libc::termios) -> io::Result<()>;
}

/// Derive the raw attribute set from `original`.
///
/// Input: no break signal, no CR→NL, no parity check, no 8th-bit strip,
/// no XON/XOFF. Output: no post-processing. Control: 8-bit characters.
/// Local: no echo, no canonical mode, no signal keys, no extended input.
#[must_use]
pub fn raw_attrs(original: &libc::termios, policy: ReadPolicy) -> libc::termios {
    let mut raw = *original;
    raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
    raw.c_oflag &= !libc::OPOST;
    raw.c_cflag |= libc::CS8;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
    raw.c_cc[libc::VMIN] = policy.min_bytes;
    raw.c_cc[libc::VTIME] = policy.timeout_ds;
    raw
}

// ─── RawMode ─────────────────────────────────────────────────────────────────

/// Raw mode, held for as long as this guard lives.
///
/// # Example
///
/// ```no_run
/// use edi_term::terminal::{RawMode, ReadPolicy, Tty};
///
/// let mut raw = RawMode::enable(Tty::stdin(), ReadPolicy::default())?;
/// // ... read keys, render frames ...
/// raw.disable()?;
/// # Ok::<(), edi_term::Error>(())
/// ```
pub struct RawMode<D: AttrDevice> {
    device: D,
    /// Attributes captured before raw mode. Never modified.
    original: libc::termios,
    active: bool,
}

impl<D: AttrDevice> RawMode<D> {
    /// Capture the current attributes and switch `device` to raw mode.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GetAttr`] if the capture fails, or
    /// [`Error::SetAttr`] if the raw attributes cannot be applied. In the
    /// latter case the device is left as it was.
    pub fn enable(mut device: D, policy: ReadPolicy) -> Result<Self> {
        let original = device.get_attrs().map_err(Error::GetAttr)?;
        let raw = raw_attrs(&original, policy);
        device.set_attrs(&raw).map_err(Error::SetAttr)?;
        debug!(
            "raw mode on (VMIN={}, VTIME={})",
            policy.min_bytes, policy.timeout_ds
        );

        Ok(Self {
            device,
            original,
            active: true,
        })
    }

    /// Restore the captured attributes.
    ///
    /// Idempotent: calling `disable()` again after success is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetAttr`] if restoration fails. The guard stays
    /// active so the drop path tries once more.
    pub fn disable(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.device
            .set_attrs(&self.original)
            .map_err(Error::SetAttr)?;
        self.active = false;
        debug!("raw mode off");
        Ok(())
    }

    /// Whether raw mode is still in effect.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl<D: AttrDevice> Drop for RawMode<D> {
    fn drop(&mut self) {
        if let Err(e) = self.disable() {
            error!("could not restore terminal attributes: {e}");
        }
    }
}

// ─── Tty ─────────────────────────────────────────────────────────────────────

/// The controlling terminal, seen through stdin's file descriptor.
///
/// Cheap to copy: it is just the descriptor. Reads go straight to
/// `read(2)` so the raw-mode `VMIN`/`VTIME` policy applies to every byte.
#[derive(Debug, Clone, Copy)]
pub struct Tty {
    fd: RawFd,
}

impl Tty {
    /// The terminal on standard input.
    #[must_use]
    pub const fn stdin() -> Self {
        Self {
            fd: libc::STDIN_FILENO,
        }
    }
}

impl AttrDevice for Tty {
    fn get_attrs(&self) -> io::Result<libc::termios> {
        let mut attrs: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(self.fd, &raw mut attrs) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(attrs)
    }

    fn set_attrs(&mut self, attrs: &libc::termios) -> io::Result<()> {
        if unsafe { libc::tcsetattr(self.fd, libc::TCSAFLUSH, attrs) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

impl ByteSource for Tty {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, (&raw mut byte).cast::<libc::c_void>(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => Err(io::Error::last_os_error()),
        }
    }
}

/// Unbuffered stdout.
///
/// Each `write` is one `write(2)` on fd 1. `io::stdout()` is line-buffered
/// and would split a frame at its last `\r\n`; this does not.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawStdout;

impl Write for RawStdout {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                buf.as_ptr().cast::<libc::c_void>(),
                buf.len(),
            )
        };
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Ask the OS for the window size via `ioctl(TIOCGWINSZ)` on stdout.
///
/// Returns `None` if the call fails or reports zero columns.
#[must_use]
pub fn window_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 && ws.ws_col > 0 {
        Some(Size {
            rows: ws.ws_row,
            cols: ws.ws_col,
        })
    } else {
        None
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

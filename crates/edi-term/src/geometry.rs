// SPDX-License-Identifier: MIT
//
// Window geometry — how many rows and columns we can draw into.
//
// Two strategies, tried in order:
//
//   1. ioctl(TIOCGWINSZ). Cheap and exact, but some terminals report
//      zero columns or fail the call entirely.
//
//   2. Cursor report. Push the cursor into the far bottom-right corner with
//      `ESC [ 999 C` and `ESC [ 999 B` (the terminal clamps both at its
//      edge), ask where it ended up with `ESC [ 6 n`, and read the answer
//      `ESC [ rows ; cols R` back from stdin.
//
// Geometry is resolved once at startup. Resize is not tracked.

use std::io::Write;

use log::{debug, warn};

use crate::ansi;
use crate::error::{GeometryError, Result, is_transient};
use crate::input::{ByteSource, ESC};

/// Longest cursor report we are willing to read, terminator excluded.
const REPORT_MAX: usize = 31;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of rows (height in character cells).
    pub rows: u16,
    /// Number of columns (width in character cells).
    pub cols: u16,
}

impl Size {
    /// Construct a size.
    #[inline]
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

// ─── Resolution ─────────────────────────────────────────────────────────────

/// Resolve the window size.
///
/// `primary` is the ioctl answer (see [`crate::terminal::window_size`]).
/// When it is `None`, the cursor-report fallback runs: probe sequences are
/// written to `output` and the report is read from `input`.
///
/// # Errors
///
/// Returns [`crate::Error::WindowSize`] if the fallback cannot write its
/// probe, cannot read the report, or gets a malformed one.
pub fn resolve(
    primary: Option<Size>,
    input: &mut impl ByteSource,
    output: &mut impl Write,
) -> Result<Size> {
    if let Some(size) = primary {
        debug!("window size from ioctl: {}x{}", size.cols, size.rows);
        return Ok(size);
    }

    warn!("ioctl window size unavailable, probing with cursor report");
    let size = probe(input, output)?;
    debug!("window size from cursor report: {}x{}", size.cols, size.rows);
    Ok(size)
}

/// Move the cursor to the far corner and ask where it is.
fn probe(input: &mut impl ByteSource, output: &mut impl Write) -> Result<Size> {
    ansi::cursor_forward(output, ansi::FAR_CORNER)
        .and_then(|()| ansi::cursor_down(output, ansi::FAR_CORNER))
        .and_then(|()| output.flush())
        .map_err(GeometryError::Probe)?;
    cursor_position(input, output)
}

/// Query the cursor position with DSR 6 and parse the reply.
///
/// # Errors
///
/// Returns [`crate::Error::WindowSize`] if the query cannot be written,
/// the reply cannot be read, or the reply is malformed.
pub fn cursor_position(input: &mut impl ByteSource, output: &mut impl Write) -> Result<Size> {
    ansi::request_cursor_position(output)
        .and_then(|()| output.flush())
        .map_err(GeometryError::Probe)?;

    let report = read_report(input)?;
    parse_cursor_report(&report).ok_or_else(|| {
        GeometryError::Malformed(String::from_utf8_lossy(&report).into_owned()).into()
    })
}

/// Read the reply byte by byte until `R`, a timeout, or the length cap.
///
/// The `R` terminator is consumed but not returned.
fn read_report(input: &mut impl ByteSource) -> Result<Vec<u8>> {
    let mut report = Vec::with_capacity(REPORT_MAX);
    while report.len() < REPORT_MAX {
        match input.read_byte() {
            Ok(Some(b'R')) => break,
            Ok(Some(byte)) => report.push(byte),
            Ok(None) => break,
            Err(e) if is_transient(&e) => break,
            Err(e) => return Err(GeometryError::Report(e).into()),
        }
    }
    Ok(report)
}

/// Parse the body of a cursor report: `ESC [ rows ; cols`, optionally
/// followed by the `R` terminator.
///
/// Returns `None` if the `ESC [` prefix is missing or either number is
/// absent.
#[must_use]
pub fn parse_cursor_report(report: &[u8]) -> Option<Size> {
    let body = report.strip_prefix(&[ESC, b'['])?;
    let (rows, rest) = parse_u16_from(body)?;
    let rest = rest.strip_prefix(b";")?;
    let (cols, _) = parse_u16_from(rest)?;
    Some(Size { rows, cols })
}

/// Parse a decimal u16 from the start of `buf`.
/// Returns `(value, remaining_bytes)`, or `None` without a leading digit or
/// on overflow.
fn parse_u16_from(buf: &[u8]) -> Option<(u16, &[u8])> {
    let digits = buf.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let mut val: u16 = 0;
    for &b in &buf[..digits] {
        val = val.checked_mul(10)?.checked_add(u16::from(b - b'0'))?;
    }
    Some((val, &buf[digits..]))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

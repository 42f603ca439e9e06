// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write VT100 control sequences to any `impl Write`.
// No state, no decisions about when to emit: the renderer and the
// geometry resolver decide that. This module only knows the bytes.
//
// Cursor positions are 0-indexed in our API and converted to 1-indexed
// for the terminal (ANSI uses 1-based coordinates).
//
// All functions return `io::Result` propagated from the underlying writer.
// Writing into an `OutputBuffer` never fails.
use std::io::{self, Write};

/// Clear screen followed by cursor home. Written on quit and before every
/// fatal diagnostic.
pub const CLEAR_AND_HOME: &[u8] = b"\x1b[2J\x1b[H";

/// Distance used to push the cursor into the bottom-right corner. Terminals
/// clamp `CUF`/`CUD` at the screen edge, so overshooting is safe.
pub const FAR_CORNER: u16 = 999;

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(col, row)` using CUP.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, col: u16, row: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(row) + 1, u32::from(col) + 1)
}

/// Move the cursor to the top-left corner.
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Move the cursor right by `n` columns (CUF), stopping at the edge.
#[inline]
pub fn cursor_forward(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}C")
}

/// Move the cursor down by `n` rows (CUD), stopping at the edge.
#[inline]
pub fn cursor_down(w: &mut impl Write, n: u16) -> io::Result<()> {
    write!(w, "\x1b[{n}B")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Ask the terminal where the cursor is (DSR 6).
///
/// The answer arrives on stdin as `ESC [ rows ; cols R`.
#[inline]
pub fn request_cursor_position(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[6n")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2). Does not move the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Erase from the cursor to the end of the line (EL 0).
#[inline]
pub fn erase_line(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

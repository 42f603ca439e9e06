//! View — composes one full frame.
//!
//! A frame is built top to bottom into an edi-term [`OutputBuffer`]:
//!
//! ```text
//! ESC[?25l  ESC[H                       hide cursor, home
//! ~ ESC[K \r\n                          one line per row...
//! ~          Edi-The Editor v0.0.1 ESC[K \r\n   ...banner on rows / 3
//! ~ ESC[K                               last row: no line break
//! ESC[row;colH  ESC[?25h                place and show the cursor
//! ```
//!
//! The last row never gets a `\r\n`: that would scroll the screen by one
//! line. Every row ends with erase-to-end-of-line, so the frame repaints
//! over whatever was there without a full clear (and without flicker).
//!
//! Banner width is measured in terminal columns, not bytes, so a banner
//! with wide characters is still clipped and centred correctly.

use std::io::Write;

use unicode_width::UnicodeWidthChar;

use edi_term::ansi;
use edi_term::geometry::Size;
use edi_term::output::OutputBuffer;

use crate::config::Config;
use crate::cursor::Cursor;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The row the banner is drawn on: a third of the way down.
#[inline]
#[must_use]
pub const fn banner_row(size: Size) -> u16 {
    size.rows / 3
}

/// Longest prefix of `text` that fits in `max_width` columns.
///
/// Returns the prefix and its display width. A wide character that would
/// straddle the limit is dropped whole.
#[must_use]
pub fn clip_to_width(text: &str, max_width: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            return (&text[..idx], width);
        }
        width += w;
    }
    (text, width)
}

fn push_char(out: &mut OutputBuffer, ch: char) {
    let mut enc = [0u8; 4];
    out.append(ch.encode_utf8(&mut enc).as_bytes());
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Compose a complete frame for `size` with the cursor at `cursor`.
pub fn render_frame(out: &mut OutputBuffer, size: Size, cursor: Cursor, config: &Config) {
    ansi::cursor_hide(out).ok();
    ansi::cursor_home(out).ok();

    draw_rows(out, size, config);

    ansi::cursor_to(out, cursor.col(), cursor.row()).ok();
    ansi::cursor_show(out).ok();
}

/// Draw every row: margin markers, the banner, erase-to-EOL, line breaks.
pub fn draw_rows(out: &mut OutputBuffer, size: Size, config: &Config) {
    let cols = usize::from(size.cols);

    for y in 0..size.rows {
        if y == banner_row(size) {
            draw_banner(out, cols, config);
        } else {
            push_char(out, config.marker);
        }

        ansi::erase_line(out).ok();
        if y + 1 < size.rows {
            out.append(b"\r\n");
        }
    }
}

/// Centre the banner in `cols` columns, keeping the margin marker when
/// there is room to the left.
fn draw_banner(out: &mut OutputBuffer, cols: usize, config: &Config) {
    let (banner, width) = clip_to_width(&config.banner, cols);
    let mut padding = (cols - width) / 2;

    if padding > 0 {
        push_char(out, config.marker);
        padding -= 1;
    }
    for _ in 0..padding {
        out.append(b" ");
    }
    write!(out, "{banner}").ok();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

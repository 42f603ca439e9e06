// SPDX-License-Identifier: MIT
//
// edi-term — Terminal control for edi.
//
// Everything that touches the terminal device lives here: raw mode via
// termios, byte-at-a-time key decoding with bounded waits, window size
// discovery (ioctl with a cursor-report fallback), and a frame buffer that
// reaches the terminal in exactly one write.
//
// Only ANSI/VT100 escape sequences are spoken. No terminfo, no external
// TUI framework: every byte sent to the terminal is written here.

pub mod ansi;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod output;
#[cfg(unix)]
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};

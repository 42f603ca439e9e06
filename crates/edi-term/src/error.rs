// SPDX-License-Identifier: MIT
//
// Error taxonomy for terminal control.
//
// Only fatal conditions are represented. Transient read timeouts, malformed
// escape sequences, and dropped frame bytes are absorbed where they are
// detected and never become an `Error`.
//
// The `Display` output names the failing call first, perror-style, because
// it is printed verbatim as the diagnostic before the process exits.

use std::io;

use thiserror::Error;

/// A fatal terminal error. The session cannot continue after one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Capturing the current terminal attributes failed.
    #[error("tcgetattr: {0}")]
    GetAttr(#[source] io::Error),

    /// Applying or restoring terminal attributes failed.
    #[error("tcsetattr: {0}")]
    SetAttr(#[source] io::Error),

    /// Reading from the terminal failed with a non-transient error.
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Neither the ioctl nor the cursor-report strategy produced a size.
    #[error("get_window_size: {0}")]
    WindowSize(#[from] GeometryError),
}

/// Why the cursor-report fallback could not determine the window size.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Writing the cursor movement or position query failed.
    #[error("cursor probe failed: {0}")]
    Probe(#[source] io::Error),

    /// Reading the position report failed.
    #[error("cursor report unreadable: {0}")]
    Report(#[source] io::Error),

    /// The report did not have the `ESC [ rows ; cols` shape.
    #[error("malformed cursor report {0:?}")]
    Malformed(String),
}

/// Result alias for terminal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Whether a read error just means "no data yet".
///
/// `EAGAIN` and `EINTR` are retried; everything else is fatal. A zero-byte
/// read never reaches here: byte sources report it as `Ok(None)`.
#[must_use]
pub fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ─── Tests ───────────────────────────────────────────────────────────────────

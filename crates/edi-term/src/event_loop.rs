// SPDX-License-Identifier: MIT
//
// Event loop — render, then read one key, then dispatch. Repeat.
//
// Strict alternation: a whole frame is composed and flushed before the next
// key is decoded, and exactly one key is handled per frame. There is no
// background reader and no tick. The only place the loop waits is inside
// the key decoder, one read timeout at a time, so an idle session costs
// one wakeup per timeout and nothing more.
//
// The loop ends when the application answers a key with `Action::Quit`:
// the screen is cleared, the cursor homed, and `run` returns `Ok`. A fatal
// read error ends it with `Err`; the caller decides how to report it.

use std::io::Write;

use log::{debug, warn};

use crate::ansi;
use crate::error::Result;
use crate::input::{ByteSource, Key, KeyDecoder};
use crate::output::OutputBuffer;

// ─── App Trait ───────────────────────────────────────────────────────────────

/// What the application tells the event loop to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep going: render the next frame.
    Continue,
    /// Clear the screen and leave the loop.
    Quit,
}

/// Application interface for the event loop.
///
/// Each iteration calls [`paint`](App::paint) once, flushes the frame, then
/// calls [`on_key`](App::on_key) once.
pub trait App {
    /// Compose the current frame into `out`.
    ///
    /// `out` is empty and fresh each time. Everything the terminal should
    /// show goes in here, including cursor placement.
    fn paint(&mut self, out: &mut OutputBuffer);

    /// Handle one decoded key.
    ///
    /// Return [`Action::Quit`] to exit the event loop.
    fn on_key(&mut self, _key: Key) -> Action {
        Action::Continue
    }
}

// ─── EventLoop ───────────────────────────────────────────────────────────────

/// The session driver.
///
/// Owns the key decoder. Output goes to whatever writer `run` is given.
///
/// # Example
///
/// ```no_run
/// use edi_term::event_loop::{Action, App, EventLoop};
/// use edi_term::input::Key;
/// use edi_term::output::OutputBuffer;
/// use edi_term::terminal::Tty;
///
/// struct MyApp;
///
/// impl App for MyApp {
///     fn paint(&mut self, out: &mut OutputBuffer) {
///         out.append(b"hello");
///     }
///
///     fn on_key(&mut self, key: Key) -> Action {
///         if key.is_ctrl(b'q') { Action::Quit } else { Action::Continue }
///     }
/// }
///
/// let mut event_loop = EventLoop::new(Tty::stdin());
/// event_loop.run(&mut MyApp, &mut std::io::stdout())?;
/// # Ok::<(), edi_term::Error>(())
/// ```
pub struct EventLoop<S> {
    decoder: KeyDecoder<S>,
    frames: u64,
}

impl<S: ByteSource> EventLoop<S> {
    /// Create an event loop reading keys from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self {
            decoder: KeyDecoder::new(source),
            frames: 0,
        }
    }

    /// Frames flushed so far (including dropped ones).
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Run until the application returns [`Action::Quit`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Read`] if the terminal read fails
    /// non-transiently.
    pub fn run(&mut self, app: &mut impl App, out: &mut impl Write) -> Result<()> {
        loop {
            self.render(app, out);

            let key = self.decoder.read_key()?;
            if app.on_key(key) == Action::Quit {
                debug!("quit after {} frames", self.frames);
                if let Err(e) = out.write_all(ansi::CLEAR_AND_HOME).and_then(|()| out.flush()) {
                    warn!("could not clear screen on quit: {e}");
                }
                return Ok(());
            }
        }
    }

    /// Compose one frame and flush it. A failed flush drops the frame.
    fn render(&mut self, app: &mut impl App, out: &mut impl Write) {
        let mut frame = OutputBuffer::new();
        app.paint(&mut frame);
        self.frames += 1;
        if let Err(e) = frame.flush_to(out) {
            warn!("dropped frame {}: {e}", self.frames);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

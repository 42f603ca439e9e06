// SPDX-License-Identifier: MIT
//
// edi — a small screen-oriented terminal editor.
//
// This is the main binary that wires together the crates:
//
//   edi-term   → raw mode, key decoding, window size, frame output, loop
//   edi-editor → cursor, configuration, frame composition
//
// The Editor struct is the session context: window size, cursor, and
// configuration, created once at startup and handed to edi-term's event
// loop by reference. Each iteration flows through:
//
//   paint → view::render_frame → OutputBuffer → one write() to the terminal
//   stdin → KeyDecoder → on_key → quit, or a clamped cursor step
//
// Exit codes: 0 after Ctrl-Q, 1 after any fatal terminal error. Fatal
// errors travel back here as `Err` so the raw-mode guard is dropped, and
// the terminal restored, before the diagnostic is printed.

#[cfg(not(unix))]
compile_error!("edi drives a POSIX terminal through termios and needs a unix target");

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{debug, error};

use edi_editor::config::Config;
use edi_editor::cursor::{Cursor, Direction};
use edi_editor::view;

use edi_term::ansi;
use edi_term::event_loop::{Action, App, EventLoop};
use edi_term::geometry::{self, Size};
use edi_term::input::Key;
use edi_term::output::OutputBuffer;
use edi_term::terminal::{self, RawMode, RawStdout, ReadPolicy, Tty};

// ─── Command line ───────────────────────────────────────────────────────────

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "edi", version, about = "A small screen-oriented terminal editor")]
struct Args {
    /// Append debug logs to FILE. Nothing is logged otherwise.
    #[arg(long, value_name = "FILE", env = "EDI_LOG")]
    log_file: Option<PathBuf>,
}

/// Route `log` output to `path`, if one was given.
///
/// Never logs to stderr: the screen is ours while raw mode is on. The
/// filter defaults to `debug` and honours `RUST_LOG`.
fn init_logging(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ─── Editor ─────────────────────────────────────────────────────────────────

/// The session context.
struct Editor {
    config: Config,
    /// Window size, resolved once at startup.
    size: Size,
    cursor: Cursor,
}

impl Editor {
    fn new(config: Config, size: Size) -> Self {
        Self {
            config,
            size,
            cursor: Cursor::new(),
        }
    }
}

impl App for Editor {
    fn paint(&mut self, out: &mut OutputBuffer) {
        view::render_frame(out, self.size, self.cursor, &self.config);
    }

    fn on_key(&mut self, key: Key) -> Action {
        if key == Key::Byte(self.config.quit_key) {
            return Action::Quit;
        }
        if let Some(dir) = Direction::from_key(key) {
            self.cursor.step(dir, self.size);
        }
        Action::Continue
    }
}

// ─── Session ────────────────────────────────────────────────────────────────

/// Raw mode on, size resolved, loop until quit, raw mode off.
fn run(config: Config) -> edi_term::Result<()> {
    let mut raw = RawMode::enable(Tty::stdin(), ReadPolicy::default())?;

    let mut tty = Tty::stdin();
    let mut out = RawStdout;
    let size = geometry::resolve(terminal::window_size(), &mut tty, &mut out)?;

    let mut editor = Editor::new(config, size);
    EventLoop::new(tty).run(&mut editor, &mut out)?;

    raw.disable()
}

/// Clear the screen and home the cursor on `screen`, then print the
/// diagnostic on `diag`. Both writes are best effort.
fn report_fatal(err: &edi_term::Error, screen: &mut impl Write, diag: &mut impl Write) {
    screen.write_all(ansi::CLEAR_AND_HOME).ok();
    writeln!(diag, "{err}").ok();
}

/// Clear the screen, print the diagnostic, exit with status 1.
fn die(err: &edi_term::Error) -> ! {
    report_fatal(err, &mut RawStdout, &mut io::stderr().lock());
    process::exit(1);
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("edi: cannot open log file: {e}");
        process::exit(1);
    }
    debug!("starting edi {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(Config::default()) {
        error!("{e}");
        die(&e);
    }

    debug!("clean exit");
}

// ─── Tests ──────────────────────────────────────────────────────────────────

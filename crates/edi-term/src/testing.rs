// SPDX-License-Identifier: MIT
//
// In-memory stand-ins for the terminal device, shared by the unit tests.
#![allow(unsafe_code)]

use std::collections::VecDeque;
use std::io::{self, Write};

use crate::input::ByteSource;

// ─── Scripted input ──────────────────────────────────────────────────────────

#[derive(Debug)]
enum Step {
    Byte(u8),
    Timeout,
    Fail(io::ErrorKind),
}

/// A byte source that replays a fixed script.
///
/// Once the script runs out every read fails with `UnexpectedEof`, which
/// the decoder treats as fatal. Tests that expect a timeout must script it.
#[derive(Debug, Default)]
pub struct Scripted {
    steps: VecDeque<Step>,
}

impl Scripted {
    pub fn bytes(bytes: &[u8]) -> Self {
        Self::default().then_bytes(bytes)
    }

    pub fn then_bytes(mut self, bytes: &[u8]) -> Self {
        self.steps.extend(bytes.iter().copied().map(Step::Byte));
        self
    }

    pub fn then_timeout(mut self) -> Self {
        self.steps.push_back(Step::Timeout);
        self
    }

    pub fn then_error(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(Step::Fail(kind));
        self
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl ByteSource for Scripted {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self.steps.pop_front() {
            Some(Step::Byte(b)) => Ok(Some(b)),
            Some(Step::Timeout) => Ok(None),
            Some(Step::Fail(kind)) => Err(io::Error::from(kind)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "script exhausted",
            )),
        }
    }
}

// ─── Recording output ────────────────────────────────────────────────────────

/// A writer that keeps every `write` call separately.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub writes: Vec<Vec<u8>>,
    pub flushes: usize,
    fail: bool,
}

impl RecordingWriter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn concat(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl Write for RecordingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.writes.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

// ─── Fake attributes ─────────────────────────────────────────────────────────

#[cfg(unix)]
pub use attrs::{FakeAttrs, same_attrs, termios_with};

#[cfg(unix)]
mod attrs {
    use std::cell::{Cell, RefCell};
    use std::io;
    use std::rc::Rc;

    use crate::terminal::AttrDevice;

    /// Build a termios with the given flag words and zeroed control chars.
    pub fn termios_with(
        iflag: libc::tcflag_t,
        oflag: libc::tcflag_t,
        cflag: libc::tcflag_t,
        lflag: libc::tcflag_t,
    ) -> libc::termios {
        let mut t: libc::termios = unsafe { std::mem::zeroed() };
        t.c_iflag = iflag;
        t.c_oflag = oflag;
        t.c_cflag = cflag;
        t.c_lflag = lflag;
        t
    }

    /// Field-wise equality (libc only derives `PartialEq` behind a feature).
    pub fn same_attrs(a: &libc::termios, b: &libc::termios) -> bool {
        a.c_iflag == b.c_iflag
            && a.c_oflag == b.c_oflag
            && a.c_cflag == b.c_cflag
            && a.c_lflag == b.c_lflag
            && a.c_cc == b.c_cc
    }

    /// An attribute device backed by memory.
    pub struct FakeAttrs {
        current: Rc<RefCell<libc::termios>>,
        sets: Rc<Cell<usize>>,
        fail_get: bool,
        fail_set: bool,
    }

    impl FakeAttrs {
        pub fn new(initial: libc::termios) -> Self {
            Self {
                current: Rc::new(RefCell::new(initial)),
                sets: Rc::new(Cell::new(0)),
                fail_get: false,
                fail_set: false,
            }
        }

        pub fn failing_get(mut self) -> Self {
            self.fail_get = true;
            self
        }

        pub fn failing_set(mut self) -> Self {
            self.fail_set = true;
            self
        }

        /// A handle that outlives the device, for checking state after drop.
        pub fn shared(&self) -> Rc<RefCell<libc::termios>> {
            Rc::clone(&self.current)
        }

        pub fn current(&self) -> libc::termios {
            *self.current.borrow()
        }

        pub fn sets(&self) -> usize {
            self.sets.get()
        }
    }

    impl AttrDevice for FakeAttrs {
        fn get_attrs(&self) -> io::Result<libc::termios> {
            if self.fail_get {
                return Err(io::Error::from_raw_os_error(libc::ENOTTY));
            }
            Ok(self.current())
        }

        fn set_attrs(&mut self, attrs: &libc::termios) -> io::Result<()> {
            if self.fail_set {
                return Err(io::Error::from_raw_os_error(libc::EIO));
            }
            *self.current.borrow_mut() = *attrs;
            self.sets.set(self.sets.get() + 1);
            Ok(())
        }
    }
}

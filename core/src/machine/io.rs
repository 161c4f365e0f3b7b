//! Machine I/O endpoints.
//!
//! The machine reads input one line at a time through an [`InputSource`] and
//! writes output bytes to any [`std::io::Write`] sink. Interactive use wires
//! [`StdinSource`] and stdout; programmatic drivers (the adventure adapter,
//! tests) wire an in-memory [`Pipe`] / [`OutputBuffer`] pair instead.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

/// Line-oriented input for the `in` instruction's refill path.
///
/// `Ok(None)` means no line is available right now; it is not a terminal
/// condition. The source must stay re-readable: after more data is supplied
/// behind it, the next call must be able to return a fresh line.
pub trait InputSource {
    /// Read one line, without its trailing newline.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from the process's standard input. EOF yields `Ok(None)`.
pub struct StdinSource;

impl InputSource for StdinSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// In-memory byte channel from a driver into a machine.
///
/// Cloning yields another handle onto the same buffer: the driver keeps one
/// handle for writing commands and the machine consumes lines through the
/// other. Single-threaded by construction, like the rest of the machine.
#[derive(Clone, Default)]
pub struct Pipe {
    buf: Rc<RefCell<VecDeque<u8>>>,
}

impl Pipe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `line` followed by a newline for the machine to read.
    pub fn push_line(&self, line: &str) {
        let mut buf = self.buf.borrow_mut();
        buf.extend(line.bytes());
        buf.push_back(b'\n');
    }
}

impl InputSource for Pipe {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = self.buf.borrow_mut();
        if buf.is_empty() {
            return Ok(None);
        }
        // Everything up to the first newline, or the whole remainder if the
        // final chunk is unterminated.
        let line: Vec<u8> = match buf.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                let line = buf.drain(..pos).collect();
                buf.pop_front();
                line
            }
            None => buf.drain(..).collect(),
        };
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }
}

/// In-memory output sink that a driver can drain between runs.
///
/// Cloning yields another handle onto the same buffer, mirroring [`Pipe`].
#[derive(Clone, Default)]
pub struct OutputBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything written since the last drain.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buf.borrow_mut())
    }

    /// Remove and return the buffered output as text.
    pub fn take_string(&self) -> String {
        String::from_utf8_lossy(&self.take()).into_owned()
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

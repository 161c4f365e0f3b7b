//! Shared helpers for machine integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use synacor_core::machine::Machine;
use synacor_core::machine::io::{OutputBuffer, Pipe};
use synacor_core::trace::NullTracer;

// Register specifiers as they appear in argument position.
pub const R0: u16 = 32768;
pub const R1: u16 = 32769;
pub const R2: u16 = 32770;

/// Encode a word sequence as a little-endian program image.
pub fn image(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// A machine over `words` wired to an in-memory input pipe and output
/// buffer, with tracing suppressed.
pub fn machine(words: &[u16]) -> (Machine, Pipe, OutputBuffer) {
    let pipe = Pipe::new();
    let out = OutputBuffer::new();
    let m = Machine::new(image(words).as_slice())
        .expect("valid test image")
        .with_tracer(Rc::new(NullTracer))
        .with_input(Box::new(pipe.clone()))
        .with_output(Box::new(out.clone()));
    (m, pipe, out)
}

//! Per-step execution tracing.
//!
//! The machine emits one record per executed instruction through an injected
//! sink. Sinks are shared by reference across machine clones, so a whole
//! search tree reports through a single sink.

/// Receives one record per executed instruction.
///
/// `pc` is the program counter before the step. `args` holds the argument
/// slots as read by the step: resolved values, except that a write-target
/// first argument is the raw register specifier.
pub trait Tracer {
    fn step(&self, pc: u16, mnemonic: &str, args: &[u16]);
}

/// Discards all records.
pub struct NullTracer;

impl Tracer for NullTracer {
    fn step(&self, _pc: u16, _mnemonic: &str, _args: &[u16]) {}
}

/// Forwards records to `log::debug!`, one line per step.
pub struct LogTracer;

impl Tracer for LogTracer {
    fn step(&self, pc: u16, mnemonic: &str, args: &[u16]) {
        log::debug!("step pc={pc} op={mnemonic} args={args:?}");
    }
}

//! Fatal machine errors.
//!
//! A machine that stops because the hosted program halted, or because it
//! needs input, is not in error; those outcomes are reported through
//! [`crate::machine::Halt`]. Everything here aborts execution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MachineError {
    /// Opcode word outside 0..=21.
    #[error("unsupported opcode {0}")]
    InvalidOpcode(u16),

    /// Argument code unit outside 0..=32775 (neither a literal word nor a
    /// register specifier).
    #[error("invalid read source {0}")]
    InvalidArgument(u16),

    /// A write-target operand that is not a register specifier.
    #[error("invalid write target {0}")]
    InvalidWriteTarget(u16),

    /// `pop` executed with an empty stack. (`ret` on an empty stack is a
    /// clean halt, not an error.)
    #[error("pop from empty stack")]
    StackUnderflow,

    /// `mod` executed with a zero divisor.
    #[error("modulo by zero at pc {pc}")]
    ModuloByZero { pc: u16 },

    /// Malformed program image: odd byte length, or more words than fit in
    /// memory.
    #[error("bad program image: {0}")]
    BadProgram(String),

    /// Malformed snapshot stream.
    #[error("snapshot: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Underlying stream failure on the program source, input source, or
    /// output sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

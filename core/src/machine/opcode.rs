//! Opcode numbering and static instruction metadata.

use crate::error::MachineError;

/// The 22 opcodes of the instruction set, numbered 0..=21.
#[repr(u16)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Opcode {
    Halt = 0,
    Set,
    Push,
    Pop,
    Eq,
    Gt,
    Jmp,
    Jt,
    Jf,
    Add,
    Mult,
    Mod,
    And,
    Or,
    Not,
    Rmem,
    Wmem,
    Call,
    Ret,
    Out,
    In,
    Noop,
}

/// Static descriptor for one opcode.
pub struct OpInfo {
    /// Assembler mnemonic, used in trace records.
    pub mnemonic: &'static str,
    /// Number of argument slots following the opcode word.
    pub arity: usize,
    /// When set, the first argument is read as a raw register specifier
    /// (the write target) instead of being resolved to its current value.
    pub writes_target: bool,
}

const fn op(mnemonic: &'static str, arity: usize, writes_target: bool) -> OpInfo {
    OpInfo {
        mnemonic,
        arity,
        writes_target,
    }
}

/// Descriptor table, indexed by opcode number.
///
/// `wmem` has `writes_target = false`: its first operand is a resolved
/// destination address, not a register specifier.
pub const OPS: [OpInfo; 22] = [
    op("halt", 0, false),
    op("set", 2, true),
    op("push", 1, false),
    op("pop", 1, true),
    op("eq", 3, true),
    op("gt", 3, true),
    op("jmp", 1, false),
    op("jt", 2, false),
    op("jf", 2, false),
    op("add", 3, true),
    op("mult", 3, true),
    op("mod", 3, true),
    op("and", 3, true),
    op("or", 3, true),
    op("not", 2, true),
    op("rmem", 2, true),
    op("wmem", 2, false),
    op("call", 1, false),
    op("ret", 0, false),
    op("out", 1, false),
    op("in", 1, true),
    op("noop", 0, false),
];

const DECODE: [Opcode; 22] = [
    Opcode::Halt,
    Opcode::Set,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Eq,
    Opcode::Gt,
    Opcode::Jmp,
    Opcode::Jt,
    Opcode::Jf,
    Opcode::Add,
    Opcode::Mult,
    Opcode::Mod,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::Rmem,
    Opcode::Wmem,
    Opcode::Call,
    Opcode::Ret,
    Opcode::Out,
    Opcode::In,
    Opcode::Noop,
];

impl Opcode {
    pub fn decode(word: u16) -> Result<Self, MachineError> {
        DECODE
            .get(word as usize)
            .copied()
            .ok_or(MachineError::InvalidOpcode(word))
    }

    pub fn info(self) -> &'static OpInfo {
        &OPS[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }
}

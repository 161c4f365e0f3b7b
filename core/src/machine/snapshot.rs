//! Machine snapshots: a serializable image of (memory, pc, registers, stack).
//!
//! The pending input buffer is deliberately not captured; a restored machine
//! starts with no buffered input and asks its input source for the next line.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use super::{MEM_WORDS, MODULUS, Machine, NUM_REGISTERS};
use crate::error::MachineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    memory: Vec<u16>,
    pc: u16,
    registers: [u16; NUM_REGISTERS],
    stack: Vec<u16>,
}

impl Snapshot {
    /// Serialize to an owned byte stream.
    pub fn encode(&self) -> Result<Vec<u8>, MachineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from a byte stream previously produced by [`encode`].
    ///
    /// [`encode`]: Snapshot::encode
    pub fn decode(bytes: &[u8]) -> Result<Self, MachineError> {
        let snapshot: Snapshot = bincode::deserialize(bytes)?;
        snapshot.validate()
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), MachineError> {
        Ok(bincode::serialize_into(writer, self)?)
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self, MachineError> {
        let snapshot: Snapshot = bincode::deserialize_from(reader)?;
        snapshot.validate()
    }

    fn validate(self) -> Result<Self, MachineError> {
        if self.memory.len() != MEM_WORDS {
            return Err(MachineError::BadProgram(format!(
                "snapshot memory of {} words",
                self.memory.len()
            )));
        }
        if self.pc >= MODULUS {
            return Err(MachineError::BadProgram(format!(
                "snapshot pc {} out of range",
                self.pc
            )));
        }
        Ok(self)
    }
}

impl Machine {
    /// Capture the machine's execution state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            memory: self.memory.clone(),
            pc: self.pc,
            registers: self.registers,
            stack: self.stack.clone(),
        }
    }

    /// Reconstruct a machine from a snapshot. I/O endpoints and the tracer
    /// come back as defaults; layer `with_*` options on top.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut machine = Self::from_memory(snapshot.memory);
        machine.pc = snapshot.pc;
        machine.registers = snapshot.registers;
        machine.stack = snapshot.stack;
        machine
    }
}

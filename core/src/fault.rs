use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Conditions raised while executing a cycle.
///
/// Every fault is recovered from before `step` returns; they are reported so a
/// host can decide whether to halt, log or ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Fault {
    /// The PC can't fetch a whole instruction word. Recovered by jumping to the
    /// program entry point.
    #[error("program counter {pc:#05X} is outside of memory")]
    ProgramCounterOutOfBounds { pc: u16 },

    /// CALL with all 16 return addresses in use. Recovered by skipping the call.
    #[error("stack overflow calling from {pc:#05X}")]
    StackOverflow { pc: u16 },

    /// RET with an empty stack. Recovered by skipping the return.
    #[error("stack underflow returning from {pc:#05X}")]
    StackUnderflow { pc: u16 },

    /// The word doesn't decode to any instruction. Recovered as a no-op.
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },
}

/// Reasons a program couldn't be loaded. The core is left untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is {size} bytes but only {max} bytes are available")]
    CapacityExceeded { size: usize, max: usize },

    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn capacity_exceeded(size: usize) -> Self {
        LoadError::CapacityExceeded {
            size,
            max: MAX_PROGRAM_SIZE,
        }
    }
}

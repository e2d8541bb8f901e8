use crate::fault::Fault;
use crate::instruction::Instruction;

/// Receives diagnostics from the interpreter as it runs.
///
/// Both hooks default to doing nothing so an implementation only needs to
/// override what it cares about.
pub trait Observer: Send {
    /// Called before an instruction fetched from `pc` executes.
    fn on_instruction(&mut self, _pc: u16, _opcode: u16, _instruction: &Instruction) {}

    /// Called after a fault has been recovered from.
    fn on_fault(&mut self, _pc: u16, _fault: &Fault) {}
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_instruction(&mut self, pc: u16, opcode: u16, instruction: &Instruction) {
        log::trace!("{:#05X}: {:04X} {}", pc, opcode, instruction);
    }

    fn on_fault(&mut self, pc: u16, fault: &Fault) {
        log::warn!("recovered at {:#05X}: {}", pc, fault);
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {}

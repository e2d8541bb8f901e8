//! An interpreter for the Chip-8 instruction set: 4K of memory, sixteen 8-bit
//! registers, a 16 deep call stack, two 60Hz timers, a 64x32 monochrome display
//! and a 16 key hex keypad.
//!
//! The host drives it by calling [`Chip8::step`] at its chosen clock speed and
//! [`Chip8::tick_timers`] as often as it likes; timers only move on the wall clock.
pub use chip8::{Chip8, Cycle};
pub use constants::DEFAULT_CLOCK_HZ;
pub use fault::{Fault, LoadError};
pub use instruction::Instruction;
pub use observer::{LogObserver, NullObserver, Observer};
pub use state::{FrameBuffer, RunState, State};

mod chip8;
pub mod constants;
mod fault;
mod instruction;
mod observer;
mod opcode;
mod operations;
pub mod state;
mod timer;

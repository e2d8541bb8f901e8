use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET,
    STACK_DEPTH,
};

/// The FrameBuffer is row-major, one cell per pixel, indexed as `y * DISPLAY_WIDTH + x`.
/// Cells are 1 when lit and 0 when blank.
pub type FrameBuffer = [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// Whether the CPU is executing normally or parked on a key wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Running,
    /// `Fx0A` found no key down; it is re-executed every cycle until one is.
    AwaitingKey { register: u8 },
}

/// A snapshot of the interpreter's architectural state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - VF doubles as the carry/borrow/shift-out/collision flag
/// - (i) a 16-bit index register, only the low 12 bits reach memory
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - 16 return addresses and a stack pointer counting how many are in use
///
/// Timers
/// - delay and sound timers, both counting down to 0 at 60Hz
///
/// ## Memory
/// - 4096 bytes, glyphs at 0x050..0x0A0, programs from 0x200
/// - 64x32 frame buffer plus a flag raised whenever it may have changed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub run_state: RunState,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
            run_state: RunState::Running,
        }
    }

    /// Reads a byte, wrapping the address into memory.
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr) % MEMORY_SIZE]
    }

    /// Writes a byte, wrapping the address into memory.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr) % MEMORY_SIZE] = value;
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame_buffer[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + (x % DISPLAY_WIDTH)]
    }

    /// Sets VF to 1 or 0.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

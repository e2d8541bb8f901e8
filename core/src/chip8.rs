use std::collections::VecDeque;
use std::io::{self, Read};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    MAX_PROGRAM_SIZE, MAX_SAVED_STATES, MEMORY_SIZE, PROGRAM_START, TIMER_INTERVAL,
};
use crate::fault::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::observer::{LogObserver, Observer};
use crate::operations::{self, ProgramCounter};
use crate::state::{FrameBuffer, RunState, State};
use crate::timer::{self, TimerClock};

/// Everything `rewind` needs to undo a step, random number generator included,
/// so a replayed `Cxkk` draws the same byte again.
#[derive(Clone)]
struct Snapshot {
    state: State,
    rng: StdRng,
}

/// What a single call to `Chip8::step` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    /// The instruction ran and the PC moved on.
    Executed(Instruction),
    /// `Fx0A` found no key down; the PC still points at it.
    AwaitingKey { register: u8 },
    /// Something went wrong and was recovered from.
    Faulted(Fault),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///  - a wall clock gating the 60Hz timers
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers
/// - taking its frame buffer for rendering by some display
/// - checking whether a tone should be playing
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<Snapshot>,
    pressed_keys: [bool; 16],
    program_size: Option<usize>,
    timers: TimerClock,
    rng: StdRng,
    observer: Box<dyn Observer>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A Chip8 whose random numbers are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
            pressed_keys: [false; 16],
            program_size: None,
            timers: TimerClock::new(TIMER_INTERVAL, Instant::now()),
            rng,
            observer: Box::new(LogObserver),
        }
    }

    /// Replaces the diagnostics sink, `LogObserver` by default.
    pub fn set_observer(&mut self, observer: impl Observer + 'static) {
        self.observer = Box::new(observer);
    }

    /// Puts the machine back into its power-on state with glyphs installed and
    /// nothing loaded.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.previous_states.clear();
        self.pressed_keys = [false; 16];
        self.program_size = None;
        self.timers.restart(Instant::now());
    }

    /// Resets the machine and copies `program` into memory at 0x200.
    ///
    /// Nothing changes if the program doesn't fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::capacity_exceeded(program.len()));
        }
        self.reset();
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        self.program_size = Some(program.len());
        log::info!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from some source
    ///
    /// # Arguments
    /// * `reader` a reader that yields a whole ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        // One byte more than fits is enough to tell that it doesn't
        let limit = (MAX_PROGRAM_SIZE + 1) as u64;
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        Read::take(&mut *reader, limit).read_to_end(&mut program)?;
        if program.len() > MAX_PROGRAM_SIZE {
            // Count the rest without keeping it so the error names the real size
            let rest = io::copy(reader, &mut io::sink())?;
            let size = program.len().saturating_add(rest as usize);
            return Err(LoadError::capacity_exceeded(size));
        }
        self.load_program(&program)
    }

    /// Returns the FrameBuffer if the display should be redrawn and lowers the
    /// redraw flag, so each change is handed out once.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn redraw_requested(&self) -> bool {
        self.state.draw_flag
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether a tone should currently be playing.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index 0x0..=0xF of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index 0x0..=0xF of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    /// Keys outside of 0x0..=0xF are ignored.
    pub fn set_key(&mut self, key: u8, down: bool) {
        match self.pressed_keys.get_mut(usize::from(key)) {
            Some(pressed) => *pressed = down,
            None => log::debug!("ignoring key {:#X}", key),
        }
    }

    pub fn is_key_down(&self, key: u8) -> bool {
        self.pressed_keys
            .get(usize::from(key))
            .copied()
            .unwrap_or(false)
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc, recovering to 0x200 if it can't
    /// - decodes it, skipping over anything unknown
    /// - executes it, saving the previous state for rewinding if it completed
    pub fn step(&mut self) -> Cycle {
        let pc = self.state.pc;
        let op = match self.get_op(pc) {
            Some(op) => op,
            None => {
                self.state.pc = PROGRAM_START;
                self.state.run_state = RunState::Running;
                return self.report(pc, Fault::ProgramCounterOutOfBounds { pc });
            }
        };
        self.check_program_region(pc);

        let instruction = match Instruction::decode(op, pc) {
            Ok(instruction) => instruction,
            Err(fault) => {
                self.state.pc = pc.wrapping_add(2);
                return self.report(pc, fault);
            }
        };
        self.observer.on_instruction(pc, op, &instruction);

        let previous = Snapshot {
            state: self.state,
            rng: self.rng.clone(),
        };
        match operations::execute(
            instruction,
            &mut self.state,
            &self.pressed_keys,
            &mut self.rng,
        ) {
            Ok(ProgramCounter::Wait) => match self.state.run_state {
                RunState::AwaitingKey { register } => Cycle::AwaitingKey { register },
                RunState::Running => Cycle::Executed(instruction),
            },
            Ok(next) => {
                self.state.pc = next.apply(pc);
                self.save_state(previous);
                Cycle::Executed(instruction)
            }
            Err(fault) => {
                self.state.pc = pc.wrapping_add(2);
                self.save_state(previous);
                self.report(pc, fault)
            }
        }
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(snapshot) => {
                self.state = snapshot.state;
                self.rng = snapshot.rng;
                true
            }
            None => false,
        }
    }

    /// Decrements both timers once for every 16ms that has passed since they
    /// were last decremented.
    pub fn tick_timers(&mut self) {
        self.tick_timers_at(Instant::now());
    }

    /// `tick_timers` as of `now`. Returns how many intervals were consumed.
    pub fn tick_timers_at(&mut self, now: Instant) -> u32 {
        let ticks = self.timers.elapsed_ticks(now);
        if ticks > 0 {
            self.state.delay_timer = timer::decay(self.state.delay_timer, ticks);
            self.state.sound_timer = timer::decay(self.state.sound_timer, ticks);
        }
        ticks
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn stack_pointer(&self) -> u8 {
        self.state.sp
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }

    /// Size of the last program loaded, if any.
    pub fn program_size(&self) -> Option<usize> {
        self.program_size
    }

    /// Puts a snapshot in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self, snapshot: Snapshot) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(snapshot);
    }

    fn report(&mut self, pc: u16, fault: Fault) -> Cycle {
        self.observer.on_fault(pc, &fault);
        Cycle::Faulted(fault)
    }

    /// Code outside of what was loaded is legal, but usually a sign of a bad jump.
    fn check_program_region(&self, pc: u16) {
        if let Some(size) = self.program_size {
            let start = usize::from(PROGRAM_START);
            let addr = usize::from(pc);
            if addr < start || addr >= start + size {
                log::debug!("executing {:#05X}, outside of the loaded program", pc);
            }
        }
    }

    /// Gets the opcode at `pc`, if a whole one fits in memory.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self, pc: u16) -> Option<u16> {
        let addr = usize::from(pc);
        if addr + 1 >= MEMORY_SIZE {
            return None;
        }
        let left = u16::from(self.state.memory[addr]);
        let right = u16::from(self.state.memory[addr + 1]);
        Some(left << 8 | right)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

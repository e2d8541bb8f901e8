use std::time::Duration;

/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Programs are loaded into memory and start executing here.
pub const PROGRAM_START: u16 = 0x200;

/// Largest program that fits between `PROGRAM_START` and the end of memory.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// The sprite sheet is installed here on reset.
pub const FONT_START: u16 = 0x050;

/// Bytes per hex digit glyph.
pub const GLYPH_SIZE: u16 = 5;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// Both timers count down at ~60Hz regardless of how fast instructions execute.
pub const TIMER_INTERVAL: Duration = Duration::from_millis(16);

/// Instructions executed per second unless the host asks for something else.
pub const DEFAULT_CLOCK_HZ: u32 = 500;

/// How many past states are kept around for rewinding.
pub const MAX_SAVED_STATES: usize = 600;

/// # Sprite sheet
/// Built-in glyphs for the hex digits 0..F, 5 bytes each.
///
/// Each byte is a row of the glyph; only the high nibble is drawn, e.g. `0`:
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

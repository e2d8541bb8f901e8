use std::fmt;

use crate::fault::Fault;
use crate::opcode::Opcode;

/// The 35 operations of the instruction set, with their operands pulled out of
/// the instruction word. `x`/`y` are register indices, `kk` an immediate byte,
/// `addr` a 12-bit address and `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// 0nnn: machine code routine, ignored
    Sys { addr: u16 },
    /// 00E0
    Clr,
    /// 00EE
    Rts,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    Ske { x: usize, kk: u8 },
    /// 4xkk
    Skne { x: usize, kk: u8 },
    /// 5xy0
    Skre { x: usize, y: usize },
    /// 6xkk
    Load { x: usize, kk: u8 },
    /// 7xkk
    Add { x: usize, kk: u8 },
    /// 8xy0
    Mv { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    Addr { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6, Vy is ignored
    Shr { x: usize },
    /// 8xy7
    Subn { x: usize, y: usize },
    /// 8xyE, Vy is ignored
    Shl { x: usize },
    /// 9xy0
    Skrne { x: usize, y: usize },
    /// Annn
    Loadi { addr: u16 },
    /// Bnnn
    Jumpi { addr: u16 },
    /// Cxkk
    Rand { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    Skpr { x: usize },
    /// ExA1
    Skup { x: usize },
    /// Fx07
    Moved { x: usize },
    /// Fx0A
    Keyd { x: usize },
    /// Fx15
    Delay { x: usize },
    /// Fx18
    Sound { x: usize },
    /// Fx1E
    Addi { x: usize },
    /// Fx29
    Ldspr { x: usize },
    /// Fx33
    Bcd { x: usize },
    /// Fx55
    Stor { x: usize },
    /// Fx65
    Read { x: usize },
}

impl Instruction {
    /// Selects the Instruction for an instruction word.
    ///
    /// `pc` is only used to report where an unknown opcode was found.
    pub fn decode(op: u16, pc: u16) -> Result<Self, Fault> {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clr,
            (0x0, 0x0, 0xE, 0xE) => Rts,
            (0x0, ..) => Sys { addr },
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => Ske { x, kk },
            (0x4, ..) => Skne { x, kk },
            (0x5, .., 0x0) => Skre { x, y },
            (0x6, ..) => Load { x, kk },
            (0x7, ..) => Add { x, kk },
            (0x8, .., 0x0) => Mv { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => Addr { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x },
            (0x9, .., 0x0) => Skrne { x, y },
            (0xA, ..) => Loadi { addr },
            (0xB, ..) => Jumpi { addr },
            (0xC, ..) => Rand { x, kk },
            (0xD, ..) => Draw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skpr { x },
            (0xE, _, 0xA, 0x1) => Skup { x },
            (0xF, _, 0x0, 0x7) => Moved { x },
            (0xF, _, 0x0, 0xA) => Keyd { x },
            (0xF, _, 0x1, 0x5) => Delay { x },
            (0xF, _, 0x1, 0x8) => Sound { x },
            (0xF, _, 0x1, 0xE) => Addi { x },
            (0xF, _, 0x2, 0x9) => Ldspr { x },
            (0xF, _, 0x3, 0x3) => Bcd { x },
            (0xF, _, 0x5, 0x5) => Stor { x },
            (0xF, _, 0x6, 0x5) => Read { x },
            _ => return Err(Fault::UnknownOpcode { opcode: op, pc }),
        };
        Ok(instruction)
    }
}

/// Conventional assembler mnemonics, e.g. `LD V0, 0x05` or `DRW V1, V2, 5`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Clr => write!(f, "CLS"),
            Rts => write!(f, "RET"),
            Jump { addr } => write!(f, "JP {:#05X}", addr),
            Call { addr } => write!(f, "CALL {:#05X}", addr),
            Ske { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Skne { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Skre { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Add { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Mv { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Addr { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x } => write!(f, "SHR V{:X}", x),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x } => write!(f, "SHL V{:X}", x),
            Skrne { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Loadi { addr } => write!(f, "LD I, {:#05X}", addr),
            Jumpi { addr } => write!(f, "JP V0, {:#05X}", addr),
            Rand { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skpr { x } => write!(f, "SKP V{:X}", x),
            Skup { x } => write!(f, "SKNP V{:X}", x),
            Moved { x } => write!(f, "LD V{:X}, DT", x),
            Keyd { x } => write!(f, "LD V{:X}, K", x),
            Delay { x } => write!(f, "LD DT, V{:X}", x),
            Sound { x } => write!(f, "LD ST, V{:X}", x),
            Addi { x } => write!(f, "ADD I, V{:X}", x),
            Ldspr { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Stor { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

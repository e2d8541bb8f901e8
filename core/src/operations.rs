use rand::RngCore;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, GLYPH_SIZE, STACK_DEPTH};
use crate::fault::Fault;
use crate::instruction::Instruction;
use crate::state::{RunState, State};

/// Where the PC goes once an instruction has executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramCounter {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc is left alone so the same instruction runs again
    Wait,
}

impl ProgramCounter {
    fn skip_if(condition: bool) -> Self {
        if condition {
            ProgramCounter::Skip
        } else {
            ProgramCounter::Next
        }
    }

    /// The PC following an instruction fetched from `pc`.
    pub fn apply(self, pc: u16) -> u16 {
        match self {
            ProgramCounter::Next => pc.wrapping_add(2),
            ProgramCounter::Skip => pc.wrapping_add(4),
            ProgramCounter::Jump(addr) => addr,
            ProgramCounter::Wait => pc,
        }
    }
}

/// Executes a single instruction against `state`.
///
/// `state.pc` must still point at the instruction; the returned ProgramCounter
/// says how to move it. Stack faults leave the state untouched.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    pressed_keys: &[bool; 16],
    rng: &mut dyn RngCore,
) -> Result<ProgramCounter, Fault> {
    use Instruction::*;

    let pc = match instruction {
        Sys { addr } => sys(addr),
        Clr => clr(state),
        Rts => return rts(state),
        Jump { addr } => ProgramCounter::Jump(addr),
        Call { addr } => return call(state, addr),
        Ske { x, kk } => ProgramCounter::skip_if(state.v[x] == kk),
        Skne { x, kk } => ProgramCounter::skip_if(state.v[x] != kk),
        Skre { x, y } => ProgramCounter::skip_if(state.v[x] == state.v[y]),
        Load { x, kk } => {
            state.v[x] = kk;
            ProgramCounter::Next
        }
        Add { x, kk } => {
            state.v[x] = state.v[x].wrapping_add(kk);
            ProgramCounter::Next
        }
        Mv { x, y } => {
            state.v[x] = state.v[y];
            ProgramCounter::Next
        }
        Or { x, y } => {
            state.v[x] |= state.v[y];
            ProgramCounter::Next
        }
        And { x, y } => {
            state.v[x] &= state.v[y];
            ProgramCounter::Next
        }
        Xor { x, y } => {
            state.v[x] ^= state.v[y];
            ProgramCounter::Next
        }
        Addr { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        Shr { x } => shr(state, x),
        Subn { x, y } => subn(state, x, y),
        Shl { x } => shl(state, x),
        Skrne { x, y } => ProgramCounter::skip_if(state.v[x] != state.v[y]),
        Loadi { addr } => {
            state.i = addr;
            ProgramCounter::Next
        }
        Jumpi { addr } => ProgramCounter::Jump(addr + u16::from(state.v[0x0])),
        Rand { x, kk } => rnd(state, x, kk, rng),
        Draw { x, y, n } => draw(state, x, y, n),
        Skpr { x } => ProgramCounter::skip_if(pressed_keys[key_index(state, x)]),
        Skup { x } => ProgramCounter::skip_if(!pressed_keys[key_index(state, x)]),
        Moved { x } => {
            state.v[x] = state.delay_timer;
            ProgramCounter::Next
        }
        Keyd { x } => keyd(state, x, pressed_keys),
        Delay { x } => {
            state.delay_timer = state.v[x];
            ProgramCounter::Next
        }
        Sound { x } => {
            state.sound_timer = state.v[x];
            ProgramCounter::Next
        }
        Addi { x } => {
            state.i = state.i.wrapping_add(u16::from(state.v[x]));
            ProgramCounter::Next
        }
        Ldspr { x } => ldspr(state, x),
        Bcd { x } => bcd(state, x),
        Stor { x } => stor(state, x),
        Read { x } => read(state, x),
    };
    Ok(pc)
}

/// Machine code routines don't exist here
fn sys(addr: u16) -> ProgramCounter {
    log::debug!("ignoring SYS {:#05X}", addr);
    ProgramCounter::Next
}

/// clear
fn clr(state: &mut State) -> ProgramCounter {
    state.frame_buffer.fill(0);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<ProgramCounter, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow { pc: state.pc });
    }
    state.sp -= 1;
    Ok(ProgramCounter::Jump(state.stack[usize::from(state.sp)]))
}

/// STACK.push(PC + 2); PC = addr
fn call(state: &mut State, addr: u16) -> Result<ProgramCounter, Fault> {
    let sp = usize::from(state.sp);
    if sp >= STACK_DEPTH {
        return Err(Fault::StackOverflow { pc: state.pc });
    }
    state.stack[sp] = state.pc.wrapping_add(2);
    state.sp += 1;
    Ok(ProgramCounter::Jump(addr))
}

/// Vx += Vy; VF = carry
fn addr(state: &mut State, x: usize, y: usize) -> ProgramCounter {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.set_flag(carry);
    state.v[x] = res;
    ProgramCounter::Next
}

/// Vx -= Vy; VF = !borrow
fn sub(state: &mut State, x: usize, y: usize) -> ProgramCounter {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.set_flag(vx >= vy);
    state.v[x] = vx.wrapping_sub(vy);
    ProgramCounter::Next
}

/// Vx >>= 1; VF = bit shifted out
fn shr(state: &mut State, x: usize) -> ProgramCounter {
    let vx = state.v[x];
    state.v[0xF] = vx & 0x1;
    state.v[x] = vx >> 1;
    ProgramCounter::Next
}

/// Vx = Vy - Vx; VF = !borrow
fn subn(state: &mut State, x: usize, y: usize) -> ProgramCounter {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.set_flag(vy >= vx);
    state.v[x] = vy.wrapping_sub(vx);
    ProgramCounter::Next
}

/// Vx <<= 1; VF = bit shifted out
fn shl(state: &mut State, x: usize) -> ProgramCounter {
    let vx = state.v[x];
    state.v[0xF] = vx >> 7;
    state.v[x] = vx << 1;
    ProgramCounter::Next
}

/// Vx = rand_byte & kk
fn rnd(state: &mut State, x: usize, kk: u8, rng: &mut dyn RngCore) -> ProgramCounter {
    let [rand_byte, ..] = rng.next_u32().to_le_bytes();
    state.v[x] = rand_byte & kk;
    ProgramCounter::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at mem[I..I+n] onto the FrameBuffer, wrapping each pixel
/// around both edges. VF is set if any lit pixel was erased.
fn draw(state: &mut State, x: usize, y: usize, n: u8) -> ProgramCounter {
    let origin_x = usize::from(state.v[x]);
    let origin_y = usize::from(state.v[y]);
    let mut collision = false;

    for row in 0..n {
        let sprite = state.read(state.i.wrapping_add(u16::from(row)));
        let py = (origin_y + usize::from(row)) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            if sprite & (0x80 >> bit) == 0 {
                continue;
            }
            let px = (origin_x + bit) % DISPLAY_WIDTH;
            let cell = &mut state.frame_buffer[py * DISPLAY_WIDTH + px];
            collision |= *cell == 1;
            *cell ^= 1;
        }
    }

    state.set_flag(collision);
    state.draw_flag = true;
    ProgramCounter::Next
}

/// The key named by Vx; only its low nibble is meaningful
fn key_index(state: &State, x: usize) -> usize {
    usize::from(state.v[x] & 0xF)
}

/// Vx = lowest pressed key, or wait for one
fn keyd(state: &mut State, x: usize, pressed_keys: &[bool; 16]) -> ProgramCounter {
    match pressed_keys.iter().position(|&down| down) {
        Some(key) => {
            state.v[x] = key as u8;
            state.run_state = RunState::Running;
            ProgramCounter::Next
        }
        None => {
            state.run_state = RunState::AwaitingKey { register: x as u8 };
            ProgramCounter::Wait
        }
    }
}

/// I = address of the glyph for Vx
fn ldspr(state: &mut State, x: usize) -> ProgramCounter {
    state.i = FONT_START + u16::from(state.v[x]) * GLYPH_SIZE;
    ProgramCounter::Next
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: usize) -> ProgramCounter {
    let value = state.v[x];
    let i = state.i;
    state.write(i, value / 100);
    state.write(i.wrapping_add(1), value / 10 % 10);
    state.write(i.wrapping_add(2), value % 10);
    ProgramCounter::Next
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: usize) -> ProgramCounter {
    for (offset, register) in (0..=x).enumerate() {
        let value = state.v[register];
        state.write(state.i.wrapping_add(offset as u16), value);
    }
    ProgramCounter::Next
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: usize) -> ProgramCounter {
    for (offset, register) in (0..=x).enumerate() {
        state.v[register] = state.read(state.i.wrapping_add(offset as u16));
    }
    ProgramCounter::Next
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn run_with_keys(op: u16, state: &mut State, pressed_keys: [bool; 16]) -> ProgramCounter {
        let instruction = Instruction::decode(op, state.pc).unwrap();
        let mut rng = StdRng::seed_from_u64(0xC8);
        let pc = execute(instruction, state, &pressed_keys, &mut rng).unwrap();
        state.pc = pc.apply(state.pc);
        pc
    }

    fn run(op: u16, state: &mut State) -> ProgramCounter {
        run_with_keys(op, state, [false; 16])
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.frame_buffer[0] = 1;
        run(0x00E0, &mut state);
        assert_eq!(state.frame_buffer[0], 0);
        assert!(state.draw_flag);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.sp = 0x1;
        state.stack[0x0] = 0x0ABC;
        run(0x00EE, &mut state);
        assert_eq!(state.sp, 0x0);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_00ee_ret_underflows() {
        let mut state = State::new();
        let instruction = Instruction::decode(0x00EE, state.pc).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute(instruction, &mut state, &[false; 16], &mut rng);
        assert_eq!(result, Err(Fault::StackUnderflow { pc: 0x200 }));
        assert_eq!(state, State::new());
    }

    #[test]
    fn test_0nnn_sys_is_ignored() {
        let mut state = State::new();
        assert_eq!(run(0x0123, &mut state), ProgramCounter::Next);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        assert_eq!(run(0x1ABC, &mut state), ProgramCounter::Jump(0xABC));
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        state.pc = 0x0ABC;
        run(0x2123, &mut state);
        assert_eq!(state.sp, 0x1);
        assert_eq!(state.stack[0x0], 0x0ABE);
        assert_eq!(state.pc, 0x0123);
    }

    #[test]
    fn test_2nnn_call_overflows() {
        let mut state = State::new();
        state.sp = STACK_DEPTH as u8;
        let before = state;
        let instruction = Instruction::decode(0x2300, state.pc).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let result = execute(instruction, &mut state, &[false; 16], &mut rng);
        assert_eq!(result, Err(Fault::StackOverflow { pc: 0x200 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_3xkk_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x3111, &mut state);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_3xkk_se_doesntskip() {
        let mut state = State::new();
        run(0x3111, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_4xkk_sne_skips() {
        let mut state = State::new();
        run(0x4111, &mut state);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_4xkk_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x4111, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(0x5120, &mut state);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x5120, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_6xkk_ld() {
        let mut state = State::new();
        run(0x6122, &mut state);
        assert_eq!(state.v[0x1], 0x22);
    }

    #[test]
    fn test_7xkk_add_wraps_without_flag() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        run(0x7102, &mut state);
        assert_eq!(state.v[0x1], 0x01);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.v[0x2] = 0x1;
        run(0x8120, &mut state);
        assert_eq!(state.v[0x1], 0x1);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(0x8121, &mut state);
        assert_eq!(state.v[0x1], 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(0x8122, &mut state);
        assert_eq!(state.v[0x1], 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = State::new();
        state.v[0x1] = 0x6;
        state.v[0x2] = 0x3;
        run(0x8123, &mut state);
        assert_eq!(state.v[0x1], 0x5);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.v[0x1] = 0xEE;
        state.v[0x2] = 0x11;
        run(0x8124, &mut state);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        state.v[0x2] = 0x11;
        run(0x8124, &mut state);
        assert_eq!(state.v[0x1], 0x10);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x33;
        state.v[0x2] = 0x11;
        run(0x8125, &mut state);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_equal_is_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(0x8125, &mut state);
        assert_eq!(state.v[0x1], 0x00);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x12;
        run(0x8125, &mut state);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.v[0x1] = 0x5;
        run(0x8106, &mut state);
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        state.v[0x2] = 0xFF;
        run(0x8126, &mut state);
        assert_eq!(state.v[0x1], 0x2);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x33;
        run(0x8127, &mut state);
        assert_eq!(state.v[0x1], 0x22);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.v[0x1] = 0x12;
        state.v[0x2] = 0x11;
        run(0x8127, &mut state);
        assert_eq!(state.v[0x1], 0xFF);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.v[0x1] = 0xFF;
        run(0x810E, &mut state);
        // 0xFF * 2 = 0x01FE
        assert_eq!(state.v[0x1], 0xFE);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.v[0x1] = 0x4;
        run(0x810E, &mut state);
        assert_eq!(state.v[0x1], 0x8);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        run(0x9120, &mut state);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        state.v[0x1] = 0x11;
        state.v[0x2] = 0x11;
        run(0x9120, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        run(0xAABC, &mut state);
        assert_eq!(state.i, 0xABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.v[0x0] = 0x2;
        run(0xBABC, &mut state);
        assert_eq!(state.pc, 0xABE);
    }

    #[test]
    fn test_bnnn_jp_past_memory_is_not_checked() {
        let mut state = State::new();
        state.v[0x0] = 0xFF;
        run(0xBFFF, &mut state);
        assert_eq!(state.pc, 0x10FE);
    }

    #[test]
    fn test_cxkk_rnd_masks() {
        let mut state = State::new();
        state.v[0xF] = 0x7;
        run(0xC10F, &mut state);
        assert_eq!(state.v[0x1] & !0x0F, 0);
        assert_eq!(state.v[0xF], 0x7);

        run(0xC200, &mut state);
        assert_eq!(state.v[0x2], 0);
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.v[0x0] = 0x1;
        state.i = FONT_START;
        // Draw the 0x0 glyph with a 1x 1y offset
        run(0xD005, &mut state);
        let rows = [[1, 1, 1, 1], [1, 0, 0, 1], [1, 0, 0, 1], [1, 0, 0, 1], [1, 1, 1, 1]];
        for (dy, row) in rows.iter().enumerate() {
            for (dx, &pixel) in row.iter().enumerate() {
                assert_eq!(state.pixel(1 + dx, 1 + dy), pixel, "({}, {})", dx, dy);
            }
        }
        assert_eq!(state.frame_buffer.iter().filter(|&&p| p == 1).count(), 14);
        assert_eq!(state.v[0xF], 0x0);
        assert!(state.draw_flag);
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.frame_buffer[0] = 1;
        state.i = FONT_START;
        run(0xD001, &mut state);
        assert_eq!(state.v[0xF], 0x1);
        assert_eq!(state.frame_buffer[0], 0);
    }

    #[test]
    fn test_dxyn_drw_xors() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300] = 0b1100_0000;
        state.v[0x0] = 2;
        // 0 1 0 1 -> Set
        state.frame_buffer[2..6].copy_from_slice(&[0, 1, 0, 1]);
        // 1 1 0 0 -> Draw xor
        run(0xD011, &mut state);
        assert_eq!(state.frame_buffer[2..6], [1, 0, 0, 1]);
        assert_eq!(state.v[0xF], 0x1);
    }

    #[test]
    fn test_dxyn_drw_zero_rows_still_requests_redraw() {
        let mut state = State::new();
        state.v[0xF] = 1;
        run(0xD000, &mut state);
        assert!(state.draw_flag);
        assert_eq!(state.v[0xF], 0x0);
    }

    #[test]
    fn test_dxyn_drw_wraps_vertically() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x302].copy_from_slice(&[0x80, 0x80]);
        state.v[0x1] = 31;
        run(0xD012, &mut state);
        assert_eq!(state.pixel(0, 31), 1);
        assert_eq!(state.pixel(0, 0), 1);
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        let mut pressed_keys = [false; 16];
        pressed_keys[0xE] = true;
        state.v[0x1] = 0xE;
        run_with_keys(0xE19E, &mut state, pressed_keys);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        run(0xE19E, &mut state);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        run(0xE1A1, &mut state);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        let mut pressed_keys = [false; 16];
        pressed_keys[0xE] = true;
        state.v[0x1] = 0xE;
        run_with_keys(0xE1A1, &mut state, pressed_keys);
        assert_eq!(state.pc, 0x0202);
    }

    #[test]
    fn test_ex9e_uses_low_nibble_of_vx() {
        let mut state = State::new();
        let mut pressed_keys = [false; 16];
        pressed_keys[0x3] = true;
        state.v[0x1] = 0xF3;
        run_with_keys(0xE19E, &mut state, pressed_keys);
        assert_eq!(state.pc, 0x0204);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.delay_timer = 0xF;
        run(0xF107, &mut state);
        assert_eq!(state.v[0x1], 0xF);
    }

    #[test]
    fn test_fx0a_ld_waits_without_key() {
        let mut state = State::new();
        assert_eq!(run(0xF10A, &mut state), ProgramCounter::Wait);
        assert_eq!(state.pc, 0x0200);
        assert_eq!(state.run_state, RunState::AwaitingKey { register: 0x1 });
    }

    #[test]
    fn test_fx0a_ld_takes_lowest_key() {
        let mut state = State::new();
        state.run_state = RunState::AwaitingKey { register: 0x1 };
        let mut pressed_keys = [false; 16];
        pressed_keys[0x9] = true;
        pressed_keys[0x4] = true;
        run_with_keys(0xF10A, &mut state, pressed_keys);
        assert_eq!(state.v[0x1], 0x4);
        assert_eq!(state.pc, 0x0202);
        assert_eq!(state.run_state, RunState::Running);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        run(0xF115, &mut state);
        assert_eq!(state.delay_timer, 0xF);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.v[0x1] = 0xF;
        run(0xF118, &mut state);
        assert_eq!(state.sound_timer, 0xF);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.i = 0x1;
        state.v[0x1] = 0x1;
        run(0xF11E, &mut state);
        assert_eq!(state.i, 0x2);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.v[0x1] = 0x2;
        run(0xF129, &mut state);
        assert_eq!(state.i, 0x05A);
        assert_eq!(state.memory[0x05A..0x05F], [0xF0, 0x10, 0xF0, 0x80, 0xF0]);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        // 0x7B -> 123
        state.v[0x1] = 0x7B;
        state.i = 0x300;
        run(0xF133, &mut state);
        assert_eq!(state.memory[0x300..0x303], [0x1, 0x2, 0x3]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx33_ld_wraps_at_end_of_memory() {
        let mut state = State::new();
        state.v[0x1] = 255;
        state.i = 0xFFF;
        run(0xF133, &mut state);
        assert_eq!(state.memory[0xFFF], 2);
        assert_eq!(state.memory[0x000..0x002], [5, 5]);
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.v[0x0..0x5].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5]);
        run(0xF455, &mut state);
        assert_eq!(state.memory[0x300..0x306], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = State::new();
        state.i = 0x300;
        state.memory[0x300..0x306].copy_from_slice(&[0x1, 0x2, 0x3, 0x4, 0x5, 0x6]);
        run(0xF465, &mut state);
        assert_eq!(state.v[0x0..0x6], [0x1, 0x2, 0x3, 0x4, 0x5, 0x0]);
        assert_eq!(state.i, 0x300);
    }
}

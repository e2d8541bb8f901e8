/// # Opcodes
///
/// Instruction words are 16 bits, fetched big-endian from two consecutive bytes.
/// Decoding cases on the family nibble first and, for the `0`, `8`, `E` and `F`
/// families, on the low nibble or low byte as well.
///
/// ```text
/// F X Y N
/// │ │ │ └─ n: sprite height / ALU selector
/// │ │ └─── y: register Vy
/// │ └───── x: register Vx, or the last register of V0..Vx
/// └─────── family
///     └─┴─ kk:  8-bit immediate
///   └─┴─┴─ nnn: 12-bit address
/// ```
pub trait Opcode {
    /// The word split into its four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[_x__]` as a register index
    fn x(&self) -> usize;

    /// `[__y_]` as a register index
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        let [high, low] = self.to_be_bytes();
        (high >> 4, high & 0xF, low >> 4, low & 0xF)
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

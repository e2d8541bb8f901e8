use sdl2::keyboard::Keycode;

/// Host controls that sit outside the Chip-8 keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    FastForward,
    Rewind,
    Quit,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keypad(key: Keycode) -> Option<u8> {
    let hex = match key {
        Keycode::Num1 => 0x1,
        Keycode::Num2 => 0x2,
        Keycode::Num3 => 0x3,
        Keycode::Num4 => 0xC,
        Keycode::Q => 0x4,
        Keycode::W => 0x5,
        Keycode::E => 0x6,
        Keycode::R => 0xD,
        Keycode::A => 0x7,
        Keycode::S => 0x8,
        Keycode::D => 0x9,
        Keycode::F => 0xE,
        Keycode::Z => 0xA,
        Keycode::X => 0x0,
        Keycode::C => 0xB,
        Keycode::V => 0xF,
        _ => return None,
    };
    Some(hex)
}

/// Space holds fast-forward, Backspace holds rewind and Escape quits.
pub fn control(key: Keycode) -> Option<Control> {
    match key {
        Keycode::Space => Some(Control::FastForward),
        Keycode::Backspace => Some(Control::Rewind),
        Keycode::Escape => Some(Control::Quit),
        _ => None,
    }
}

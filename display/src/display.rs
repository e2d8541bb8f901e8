use sdl2::pixels::PixelFormatEnum;

use chipvm_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chipvm_core::FrameBuffer;

/// Bytes per pixel in an RGB24 texture.
const CHANNELS: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a row-major FrameBuffer.
/// The display only gets a call to `render` when the Chip-8 hands out a changed FrameBuffer.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chipvm",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| e.to_string())?;

        let mut display = Display { canvas };
        display.render(&[0; DISPLAY_WIDTH * DISPLAY_HEIGHT])?;
        Ok(display)
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 texture is a 1D array of ints that represent concatenated rows of RGB pixels.
    /// The FrameBuffer is already row-major, so each cell only needs to be triplicated and
    /// scaled from a binary state to 0-255 intensity.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|&pixel| std::iter::repeat(pixel * 255).take(CHANNELS))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // Rows may be padded past DISPLAY_WIDTH * CHANNELS
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * CHANNELS).enumerate() {
                let offset = row * pitch;
                buffer[offset..offset + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

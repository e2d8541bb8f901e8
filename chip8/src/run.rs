use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use sdl2::event::Event;

use chipvm_core::constants::TIMER_INTERVAL;
use chipvm_core::Chip8;
use display::Display;

use crate::audio;
use crate::keymap::{control, keypad, Control};

/// Everything the run loop needs to know from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub rom: PathBuf,
    pub clock_hz: u32,
    pub scale: u32,
    pub seed: Option<u64>,
    pub mute: bool,
}

impl Config {
    fn cycle_time(&self) -> Duration {
        Duration::from_secs(1) / self.clock_hz.max(1)
    }
}

/// Caps how often a changed frame reaches the display.
///
/// Programs raise the redraw flag on every CLS and DRW; presenting each one
/// would tie the clock to the display instead of `--clock-hz`.
struct FramePacer {
    interval: Duration,
    last_render: Option<Instant>,
}

impl FramePacer {
    fn new(interval: Duration) -> Self {
        FramePacer {
            interval,
            last_render: None,
        }
    }

    /// Whether a frame may be rendered at `now`; if so, counts it as rendered.
    fn ready(&mut self, now: Instant) -> bool {
        match self.last_render {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_render = Some(now);
                true
            }
        }
    }
}

pub fn run(config: Config) -> Result<(), String> {
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let file = File::open(&config.rom)
        .map_err(|e| format!("unable to open {}: {}", config.rom.display(), e))?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader).map_err(|e| e.to_string())?;

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut events = sdl.event_pump()?;
    let speaker = if config.mute {
        None
    } else {
        Some(audio::open_playback(&sdl)?)
    };

    let cycle_time = config.cycle_time();
    let mut pacer = FramePacer::new(TIMER_INTERVAL);
    let mut last_cycle = Instant::now();

    // Whether or not the configured clock speed should be respected
    let mut fast_forward = false;
    // Whether the machine's state should be cycled forwards or backwards
    let mut rewind = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (keypad(key), control(key)) {
                    (Some(hex), _) => chip8.key_press(hex),
                    (_, Some(Control::FastForward)) => fast_forward = true,
                    (_, Some(Control::Rewind)) => rewind = true,
                    (_, Some(Control::Quit)) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (keypad(key), control(key)) {
                    (Some(hex), _) => chip8.key_release(hex),
                    (_, Some(Control::FastForward)) => fast_forward = false,
                    (_, Some(Control::Rewind)) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            if !chip8.rewind() {
                log::debug!("no earlier state to rewind to");
            }
        } else {
            chip8.step();
            chip8.tick_timers();
        }

        // If the draw flag is set and a refresh is due, unset it and render the current frame
        if chip8.redraw_requested() && pacer.ready(Instant::now()) {
            if let Some(frame) = chip8.take_frame() {
                display.render(&frame)?;
            }
        }

        if let Some(speaker) = &speaker {
            if chip8.sound_active() {
                speaker.resume();
            } else {
                speaker.pause();
            }
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}

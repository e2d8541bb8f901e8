use std::f32::consts::TAU;

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

const SAMPLE_RATE: i32 = 44_100;
const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

/// A continuous sine wave; the run loop pauses and resumes the device around it.
pub struct Tone {
    phase: f32,
    step: f32,
}

impl Tone {
    fn new(freq: i32) -> Self {
        Tone {
            phase: 0.0,
            step: TONE_HZ / freq as f32,
        }
    }
}

impl AudioCallback for Tone {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = VOLUME * (self.phase * TAU).sin();
            self.phase = (self.phase + self.step) % 1.0;
        }
    }
}

/// Opens a paused mono playback device producing the 440Hz tone.
pub fn open_playback(sdl: &sdl2::Sdl) -> Result<AudioDevice<Tone>, String> {
    let audio_subsystem = sdl.audio()?;
    let desired = AudioSpecDesired {
        freq: Some(SAMPLE_RATE),
        channels: Some(1),
        samples: None,
    };
    audio_subsystem.open_playback(None, &desired, |spec| Tone::new(spec.freq))
}

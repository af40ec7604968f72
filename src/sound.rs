//! Synthesized sound effects.

use fundsp::prelude64::*;
use rodio::{OutputStream, OutputStreamHandle, Sink, buffer::SamplesBuffer};

const SAMPLE_RATE: u32 = 44100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Flap,
    Score,
    Crash,
}

impl Sound {
    const ALL: [Sound; 3] = [Sound::Flap, Sound::Score, Sound::Crash];

    /// Renders the effect to mono samples.
    pub fn samples(self) -> Vec<f32> {
        match self {
            Sound::Flap => {
                // Short upward chirp.
                let freq = lfo(|t: f64| lerp(300.0, 650.0, (t / 0.08).min(1.0)));
                let gain = lfo(|t: f64| lerp(0.12, 0.0, (t / 0.1).min(1.0)));
                take(Box::new((freq >> sine()) * gain), 0.1)
            }
            Sound::Score => {
                // Two quick tones, a fifth apart.
                let freq = lfo(|t: f64| if t < 0.06 { 880.0 } else { 1320.0 });
                let gain = lfo(|t: f64| lerp(0.1, 0.0, (t / 0.16).min(1.0)));
                take(Box::new((freq >> sine()) * gain), 0.16)
            }
            Sound::Crash => {
                // 400Hz down to 80Hz over 0.4s, fading out over 0.5s.
                let freq = lfo(|t: f64| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
                let gain = lfo(|t: f64| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
                take(Box::new((freq >> saw()) * gain), 0.5)
            }
        }
    }
}

fn take(mut unit: Box<dyn AudioUnit>, secs: f64) -> Vec<f32> {
    unit.set_sample_rate(SAMPLE_RATE as f64);
    let n = (SAMPLE_RATE as f64 * secs) as usize;
    (0..n).map(|_| unit.get_mono() as f32).collect()
}

/// Default output device plus pre-rendered effects.
pub struct Audio {
    // Dropping the stream silences everything.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: Vec<(Sound, Vec<f32>)>,
}

impl Audio {
    /// Opens the default output. `None` when muted or no device is usable.
    pub fn open(muted: bool) -> Option<Self> {
        if muted {
            log::info!("audio muted");
            return None;
        }
        match OutputStream::try_default() {
            Ok((stream, handle)) => {
                let bank = Sound::ALL.iter().map(|&s| (s, s.samples())).collect();
                Some(Audio {
                    _stream: stream,
                    handle,
                    bank,
                })
            }
            Err(e) => {
                log::warn!("no audio output, playing silently: {}", e);
                None
            }
        }
    }

    pub fn play(&self, sound: Sound) {
        let Some((_, samples)) = self.bank.iter().find(|(s, _)| *s == sound) else {
            return;
        };
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples.clone()));
                sink.detach(); // Play in background
            }
            Err(e) => log::warn!("cannot play {:?}: {}", sound, e),
        }
    }
}

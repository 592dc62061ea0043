//! Percussion voices — pitched kick plus noise-burst snare and hat.
//!
//! The noise voices draw from a `ChaCha8Rng` seeded with a fixed constant,
//! so drum sound never varies between renders; only the melody seed does.

use std::f64::consts::PI;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::schedule::{Pitch, ScheduledEvent};

use super::envelope::Envelope;
use super::oscillator::midi_to_freq;
use super::{RenderContext, Voice};

/// Seed for the snare burst; the hat uses the next seed up.
const NOISE_SEED: u64 = 42;

/// Kick drum: a sine with a fast exponential pitch sweep.
///
/// The oscillator starts `octaves` above the event's note and glides down to
/// it across `pitch_decay` seconds, shaped by a percussive envelope.
pub struct KickVoice {
    envelope: Envelope,
    pitch_decay: f64,
    octaves: f64,
}

impl KickVoice {
    pub fn new() -> Self {
        Self {
            envelope: Envelope::new(0.001, 0.4, 0.01, 1.4),
            pitch_decay: 0.05,
            octaves: 8.0,
        }
    }
}

impl Default for KickVoice {
    fn default() -> Self {
        Self::new()
    }
}

impl Voice for KickVoice {
    fn render(&self, event: &ScheduledEvent, ctx: &RenderContext) -> Vec<f32> {
        let note = match event.pitch {
            Pitch::Note(note) => note,
            Pitch::Chord(_) => return Vec::new(),
        };

        if event.velocity <= 0.0 {
            return Vec::new();
        }

        let base_freq = midi_to_freq(note);
        let held = event.duration.seconds(ctx.bpm);
        let total_secs = self.envelope.total_secs(held);
        let num_samples = (total_secs * ctx.sample_rate as f64) as usize;

        let mut phase = 0.0_f64;
        let mut output = Vec::with_capacity(num_samples * ctx.channels as usize);

        for i in 0..num_samples {
            let t = i as f64 / ctx.sample_rate as f64;
            let env = self.envelope.level(t, held);

            // Log-linear glide from base * 2^octaves down to base.
            let sweep = (1.0 - t / self.pitch_decay).max(0.0);
            let freq = base_freq * (self.octaves * sweep).exp2();

            let sample = ((phase * 2.0 * PI).sin() * env * event.velocity as f64) as f32;

            for _ in 0..ctx.channels {
                output.push(sample);
            }

            phase = (phase + freq / ctx.sample_rate as f64).fract();
        }

        output
    }

    fn name(&self) -> &str {
        "kick"
    }
}

/// Unpitched noise burst replayed per event. The burst spans the envelope's
/// attack plus decay and is rendered once at construction.
pub struct NoiseVoice {
    name: &'static str,
    burst: Vec<f32>,
}

impl NoiseVoice {
    fn new(name: &'static str, envelope: Envelope, sample_rate: u32, seed: u64) -> Self {
        let burst_secs = envelope.attack + envelope.decay;
        let num_samples = (burst_secs * sample_rate as f64) as usize;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut burst = Vec::with_capacity(num_samples);

        for i in 0..num_samples {
            let t = i as f64 / sample_rate as f64;
            let noise: f64 = rng.gen_range(-1.0..1.0);
            burst.push((noise * envelope.level(t, burst_secs)) as f32);
        }

        Self { name, burst }
    }

    /// Snare: a sharp 150ms noise burst.
    pub fn snare(sample_rate: u32) -> Self {
        Self::new(
            "snare",
            Envelope::new(0.001, 0.15, 0.0, 0.0),
            sample_rate,
            NOISE_SEED,
        )
    }

    /// Closed hat: a 50ms tick.
    pub fn hat(sample_rate: u32) -> Self {
        Self::new(
            "hat",
            Envelope::new(0.001, 0.05, 0.0, 0.0),
            sample_rate,
            NOISE_SEED.wrapping_add(1),
        )
    }

    pub fn burst_len(&self) -> usize {
        self.burst.len()
    }
}

impl Voice for NoiseVoice {
    fn render(&self, event: &ScheduledEvent, ctx: &RenderContext) -> Vec<f32> {
        if event.velocity <= 0.0 {
            return Vec::new();
        }

        // Pitch is nominal for noise voices; every event replays the burst.
        let mut output = Vec::with_capacity(self.burst.len() * ctx.channels as usize);
        for &s in &self.burst {
            let scaled = s * event.velocity;
            for _ in 0..ctx.channels {
                output.push(scaled);
            }
        }

        output
    }

    fn name(&self) -> &str {
        self.name
    }
}

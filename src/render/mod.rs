//! Offline renderer — mixes a scheduled clip into a fixed audio buffer.

pub mod buffer;

pub use buffer::RenderBuffer;

use serde::{Deserialize, Serialize};

use crate::schedule::{schedule_clip, CLIP_SECONDS};
use crate::spec::MusicSpec;
use crate::voice::{RenderContext, VoiceBank};

/// Render configuration errors.
#[derive(Debug)]
pub enum RenderConfigError {
    /// Sample rate must be positive.
    InvalidSampleRate(u32),
    /// Duration must be positive and finite.
    InvalidDuration(f64),
    /// Channel count must be positive.
    InvalidChannels(u16),
    /// Encoder format disagrees with the buffer layout.
    ChannelMismatch { format: u16, buffer: u16 },
}

impl std::fmt::Display for RenderConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderConfigError::InvalidSampleRate(rate) => {
                write!(f, "invalid sample rate: {rate}")
            }
            RenderConfigError::InvalidDuration(secs) => {
                write!(f, "invalid duration: {secs}s")
            }
            RenderConfigError::InvalidChannels(channels) => {
                write!(f, "invalid channel count: {channels}")
            }
            RenderConfigError::ChannelMismatch { format, buffer } => {
                write!(f, "format expects {format} channels but buffer has {buffer}")
            }
        }
    }
}

impl std::error::Error for RenderConfigError {}

/// Output parameters for one render.
///
/// `seed` drives the melody's random walk; `None` draws a fresh seed per
/// render. Drum noise is internally seeded and never varies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f64,
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            duration_secs: CLIP_SECONDS,
            seed: None,
        }
    }
}

impl RenderOptions {
    /// Reject configurations the renderer cannot honor.
    pub fn validate(&self) -> Result<(), RenderConfigError> {
        if self.sample_rate == 0 {
            return Err(RenderConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.channels == 0 {
            return Err(RenderConfigError::InvalidChannels(self.channels));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(RenderConfigError::InvalidDuration(self.duration_secs));
        }
        Ok(())
    }
}

/// Render a spec into an interleaved audio buffer.
///
/// Scheduling and synthesis are deterministic for a fixed spec and seed, so
/// two renders with the same inputs produce identical buffers.
pub fn render(
    spec: &MusicSpec,
    options: &RenderOptions,
) -> Result<RenderBuffer, RenderConfigError> {
    options.validate()?;

    let seed = options.seed.unwrap_or_else(rand::random);
    let events = schedule_clip(spec, options.duration_secs, seed);
    let bank = VoiceBank::from_spec(spec, options.sample_rate);
    let ctx = RenderContext {
        sample_rate: options.sample_rate,
        channels: options.channels,
        bpm: spec.bpm,
    };

    let mut buffer =
        RenderBuffer::silence(options.sample_rate, options.channels, options.duration_secs);

    for event in &events {
        let rendered = bank.voice(event.voice).render(event, &ctx);
        if rendered.is_empty() {
            continue;
        }
        let start_frame = (event.onset_secs * options.sample_rate as f64).round() as usize;
        buffer.mix_at(start_frame, &rendered);
    }

    Ok(buffer)
}

//! Voices — the six sound sources a clip can play.

pub mod envelope;
pub mod oscillator;
pub mod percussion;
pub mod tone;

pub use envelope::Envelope;
pub use oscillator::{midi_note_name, midi_to_freq, oscillator, Waveform};
pub use percussion::{KickVoice, NoiseVoice};
pub use tone::ToneVoice;

use crate::schedule::{ScheduledEvent, VoiceId};
use crate::spec::MusicSpec;

/// Sample-space parameters shared by every voice render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub sample_rate: u32,
    pub channels: u16,
    pub bpm: u16,
}

/// Common interface for all voices.
///
/// Each voice takes a scheduled event and render context and produces
/// interleaved samples covering the note and its release tail.
pub trait Voice: Send {
    /// Render a single event into interleaved samples.
    fn render(&self, event: &ScheduledEvent, ctx: &RenderContext) -> Vec<f32>;

    /// Human-readable name for this voice.
    fn name(&self) -> &str;
}

/// The full voice set for one render, built from a spec's sound selection.
pub struct VoiceBank {
    pad: ToneVoice,
    lead: ToneVoice,
    bass: ToneVoice,
    kick: KickVoice,
    snare: NoiseVoice,
    hat: NoiseVoice,
}

impl VoiceBank {
    pub fn from_spec(spec: &MusicSpec, sample_rate: u32) -> Self {
        Self {
            pad: ToneVoice::pad(spec.sound.pad),
            lead: ToneVoice::lead(spec.sound.lead),
            bass: ToneVoice::bass(spec.sound.bass),
            kick: KickVoice::new(),
            snare: NoiseVoice::snare(sample_rate),
            hat: NoiseVoice::hat(sample_rate),
        }
    }

    /// The voice a scheduled event addresses.
    pub fn voice(&self, id: VoiceId) -> &dyn Voice {
        match id {
            VoiceId::Pad => &self.pad,
            VoiceId::Lead => &self.lead,
            VoiceId::Bass => &self.bass,
            VoiceId::Kick => &self.kick,
            VoiceId::Snare => &self.snare,
            VoiceId::Hat => &self.hat,
        }
    }
}

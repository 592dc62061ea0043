//! Tone voices — pad, lead, and bass rendered from a single oscillator core.
//!
//! One `ToneVoice` covers all three melodic roles; they differ only in
//! envelope and in the waveform picked from the spec's sound selection.
//! Chords render additively, one phase accumulator per note, with no
//! normalization of the sum.

use crate::schedule::ScheduledEvent;
use crate::spec::Timbre;

use super::envelope::Envelope;
use super::oscillator::{midi_to_freq, oscillator, Waveform};
use super::{RenderContext, Voice};

/// A melodic voice: one waveform shaped by one envelope.
pub struct ToneVoice {
    name: &'static str,
    waveform: Waveform,
    envelope: Envelope,
}

impl ToneVoice {
    /// Sustained chord pad: slow attack, long release.
    pub fn pad(timbre: Timbre) -> Self {
        Self {
            name: "pad",
            waveform: timbre.into(),
            envelope: Envelope::new(0.8, 0.1, 0.3, 1.5),
        }
    }

    /// Melody voice: near-instant attack, short tail.
    pub fn lead(timbre: Timbre) -> Self {
        Self {
            name: "lead",
            waveform: timbre.into(),
            envelope: Envelope::new(0.01, 0.2, 0.2, 0.4),
        }
    }

    /// Bass voice: punchy decay with a firm sustain.
    pub fn bass(timbre: Timbre) -> Self {
        Self {
            name: "bass",
            waveform: timbre.into(),
            envelope: Envelope::new(0.01, 0.15, 0.4, 0.2),
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }
}

impl Voice for ToneVoice {
    fn render(&self, event: &ScheduledEvent, ctx: &RenderContext) -> Vec<f32> {
        let notes = event.pitch.notes();
        if notes.is_empty() || event.velocity <= 0.0 {
            return Vec::new();
        }

        let held = event.duration.seconds(ctx.bpm);
        let total_secs = self.envelope.total_secs(held);
        let num_samples = (total_secs * ctx.sample_rate as f64) as usize;

        let freqs: Vec<f64> = notes.iter().map(|&note| midi_to_freq(note)).collect();
        let mut phases = vec![0.0_f64; freqs.len()];

        let mut output = Vec::with_capacity(num_samples * ctx.channels as usize);

        for i in 0..num_samples {
            let t = i as f64 / ctx.sample_rate as f64;
            let env = self.envelope.level(t, held);

            let mut mixed = 0.0;
            for (phase, freq) in phases.iter_mut().zip(&freqs) {
                mixed += oscillator(self.waveform, *phase);
                *phase = (*phase + freq / ctx.sample_rate as f64).fract();
            }

            let sample = (mixed * env * event.velocity as f64) as f32;

            for _ in 0..ctx.channels {
                output.push(sample);
            }
        }

        output
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{NoteLen, VoiceId};

    fn ctx() -> RenderContext {
        RenderContext {
            sample_rate: 44100,
            channels: 2,
            bpm: 120,
        }
    }

    #[test]
    fn renders_a_note() {
        let voice = ToneVoice::lead(Timbre::Triangle);
        let event = ScheduledEvent::note(VoiceId::Lead, 0.0, NoteLen::Eighth, 72, 0.25);
        let out = voice.render(&event, &ctx());
        assert!(!out.is_empty());
        assert!(out.iter().any(|&s| s.abs() > 0.01));
    }

    #[test]
    fn renders_a_chord_additively() {
        let voice = ToneVoice::pad(Timbre::Saw);
        let chord = ScheduledEvent::chord(VoiceId::Pad, 0.0, NoteLen::Bar, vec![60, 64, 67], 0.35);
        let single = ScheduledEvent::note(VoiceId::Pad, 0.0, NoteLen::Bar, 60, 0.35);
        let chord_out = voice.render(&chord, &ctx());
        let single_out = voice.render(&single, &ctx());
        assert_eq!(chord_out.len(), single_out.len());
        let peak = |samples: &[f32]| samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak(&chord_out) > peak(&single_out));
    }

    #[test]
    fn zero_velocity_silent() {
        let voice = ToneVoice::bass(Timbre::Square);
        let event = ScheduledEvent::note(VoiceId::Bass, 0.0, NoteLen::Eighth, 36, 0.0);
        assert!(voice.render(&event, &ctx()).is_empty());
    }

    #[test]
    fn empty_chord_silent() {
        let voice = ToneVoice::pad(Timbre::Saw);
        let event = ScheduledEvent::chord(VoiceId::Pad, 0.0, NoteLen::Bar, vec![], 0.35);
        assert!(voice.render(&event, &ctx()).is_empty());
    }

    #[test]
    fn stereo_output_duplicates_frames() {
        let voice = ToneVoice::lead(Timbre::Sine);
        let event = ScheduledEvent::note(VoiceId::Lead, 0.0, NoteLen::Eighth, 72, 0.25);
        let out = voice.render(&event, &ctx());
        assert_eq!(out.len() % 2, 0);
        for frame in out.chunks(2) {
            assert!((frame[0] - frame[1]).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn length_covers_note_plus_release() {
        let voice = ToneVoice::lead(Timbre::Sine);
        let event = ScheduledEvent::note(VoiceId::Lead, 0.0, NoteLen::Eighth, 72, 0.25);
        let out = voice.render(&event, &ctx());
        // "8n" at 120 bpm holds 0.25s; the lead release adds 0.4s.
        let expected = (0.65 * 44100.0) as usize * 2;
        assert_eq!(out.len(), expected);
    }

    #[test]
    fn single_note_output_bounded_by_velocity() {
        let voice = ToneVoice::bass(Timbre::Square);
        let event = ScheduledEvent::note(VoiceId::Bass, 0.0, NoteLen::Eighth, 36, 0.5);
        for &s in &voice.render(&event, &ctx()) {
            assert!(s.abs() <= 0.5 + f32::EPSILON, "sample out of bounds: {s}");
        }
    }

    #[test]
    fn slow_pad_attack_starts_quiet() {
        let voice = ToneVoice::pad(Timbre::Saw);
        let event = ScheduledEvent::chord(VoiceId::Pad, 0.0, NoteLen::Bar, vec![60, 64, 67], 1.0);
        let out = voice.render(&event, &ctx());
        let early = &out[..100];
        let rms: f32 = (early.iter().map(|s| s * s).sum::<f32>() / early.len() as f32).sqrt();
        assert!(rms < 0.1, "start should be quiet, rms={rms}");
    }

    #[test]
    fn voice_names_follow_roles() {
        assert_eq!(Voice::name(&ToneVoice::pad(Timbre::Saw)), "pad");
        assert_eq!(Voice::name(&ToneVoice::lead(Timbre::Sine)), "lead");
        assert_eq!(Voice::name(&ToneVoice::bass(Timbre::Square)), "bass");
    }
}

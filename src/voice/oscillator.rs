//! Oscillator primitives — waveform generation and pitch helpers.

use std::f64::consts::PI;

use crate::spec::Timbre;

/// Waveform shapes the voices can sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Sine,
    Saw,
    Square,
    Triangle,
}

impl From<Timbre> for Waveform {
    fn from(timbre: Timbre) -> Self {
        match timbre {
            Timbre::Sine => Waveform::Sine,
            Timbre::Triangle => Waveform::Triangle,
            Timbre::Saw => Waveform::Saw,
            Timbre::Square => Waveform::Square,
        }
    }
}

impl From<Waveform> for Timbre {
    fn from(waveform: Waveform) -> Self {
        match waveform {
            Waveform::Sine => Timbre::Sine,
            Waveform::Triangle => Timbre::Triangle,
            Waveform::Saw => Timbre::Saw,
            Waveform::Square => Timbre::Square,
        }
    }
}

/// Generate a single sample for the given waveform at the specified phase.
///
/// `phase` is in the range [0.0, 1.0), representing one full cycle.
/// Returns a value in [-1.0, 1.0].
pub fn oscillator(waveform: Waveform, phase: f64) -> f64 {
    match waveform {
        Waveform::Sine => (phase * 2.0 * PI).sin(),
        Waveform::Saw => 2.0 * phase - 1.0,
        Waveform::Square => {
            if phase < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        Waveform::Triangle => {
            if phase < 0.25 {
                4.0 * phase
            } else if phase < 0.75 {
                2.0 - 4.0 * phase
            } else {
                4.0 * phase - 4.0
            }
        }
    }
}

/// Convert a MIDI note number to frequency in Hz.
///
/// Standard tuning: A4 (MIDI 69) = 440 Hz.
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * 2.0f64.powf((note as f64 - 69.0) / 12.0)
}

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Display name for a MIDI note: 60 is "C4", 69 is "A4".
pub fn midi_note_name(note: u8) -> String {
    let name = NOTE_NAMES[note as usize % 12];
    let octave = i32::from(note) / 12 - 1;
    format!("{name}{octave}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_at_zero_and_quarter() {
        assert!(oscillator(Waveform::Sine, 0.0).abs() < 1e-10);
        assert!((oscillator(Waveform::Sine, 0.25) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn saw_ramps_across_the_cycle() {
        assert!((oscillator(Waveform::Saw, 0.0) - (-1.0)).abs() < 1e-10);
        assert!(oscillator(Waveform::Saw, 0.5).abs() < 1e-10);
        assert!((oscillator(Waveform::Saw, 1.0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn square_flips_at_half() {
        assert!((oscillator(Waveform::Square, 0.25) - 1.0).abs() < 1e-10);
        assert!((oscillator(Waveform::Square, 0.75) - (-1.0)).abs() < 1e-10);
    }

    #[test]
    fn triangle_peaks_at_quarter_points() {
        assert!(oscillator(Waveform::Triangle, 0.0).abs() < 1e-10);
        assert!((oscillator(Waveform::Triangle, 0.25) - 1.0).abs() < 1e-10);
        assert!(oscillator(Waveform::Triangle, 0.5).abs() < 1e-10);
        assert!((oscillator(Waveform::Triangle, 0.75) - (-1.0)).abs() < 1e-10);
    }

    #[test]
    fn all_waveforms_bounded() {
        for wf in [
            Waveform::Sine,
            Waveform::Saw,
            Waveform::Square,
            Waveform::Triangle,
        ] {
            for i in 0..1000 {
                let phase = i as f64 / 1000.0;
                let v = oscillator(wf, phase);
                assert!(
                    v >= -1.0 && v <= 1.0,
                    "{wf:?} at phase {phase}: {v} out of bounds"
                );
            }
        }
    }

    #[test]
    fn timbre_round_trips_through_waveform() {
        for timbre in [Timbre::Sine, Timbre::Triangle, Timbre::Saw, Timbre::Square] {
            assert_eq!(Timbre::from(Waveform::from(timbre)), timbre);
        }
    }

    #[test]
    fn midi_69_is_440() {
        let f = midi_to_freq(69);
        assert!((f - 440.0).abs() < 0.01);
    }

    #[test]
    fn midi_60_is_middle_c() {
        let f = midi_to_freq(60);
        assert!((f - 261.63).abs() < 0.1);
    }

    #[test]
    fn midi_octave_doubles_freq() {
        let f1 = midi_to_freq(60);
        let f2 = midi_to_freq(72);
        assert!((f2 / f1 - 2.0).abs() < 1e-10);
    }

    #[test]
    fn note_names_span_the_midi_range() {
        assert_eq!(midi_note_name(60), "C4");
        assert_eq!(midi_note_name(69), "A4");
        assert_eq!(midi_note_name(24), "C1");
        assert_eq!(midi_note_name(0), "C-1");
        assert_eq!(midi_note_name(127), "G9");
    }
}

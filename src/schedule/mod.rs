//! Event scheduler — expands a music spec into a four-bar clip of timed events.
//!
//! Scheduling is deterministic for a given spec and seed. Events whose onset
//! falls at or past the clip end are dropped, but random decisions are always
//! drawn in full first so the seed produces the same material at every tempo.

pub mod contour;
pub mod event;
pub mod time;

pub use contour::contour_steps;
pub use event::{NoteLen, Pitch, ScheduledEvent, VoiceId};
pub use time::{TimeMap, BARS_PER_CLIP, BEATS_PER_BAR, CLIP_SECONDS};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::spec::{BassPattern, Degree, MusicSpec};

pub const PAD_VELOCITY: f32 = 0.35;
pub const BASS_VELOCITY: f32 = 0.5;
pub const LEAD_VELOCITY: f32 = 0.25;
pub const KICK_VELOCITY: f32 = 0.9;
pub const SNARE_VELOCITY: f32 = 0.3;
pub const HAT_VELOCITY: f32 = 0.08;

/// Pad chords sit around middle C; the lead an octave above, the bass two
/// octaves below.
const PAD_ROOT: i32 = 60;
const LEAD_ROOT: i32 = 72;
const BASS_ROOT: i32 = 36;

/// Root, major third, fifth above the chord root.
const PAD_CHORD_OFFSETS: [i32; 3] = [0, 4, 7];

/// Nominal drum-map notes. The percussion voices key their sound off the
/// voice, not the pitch, but every event still carries one.
pub const KICK_NOTE: u8 = 24;
pub const SNARE_NOTE: u8 = 38;
pub const HAT_NOTE: u8 = 42;

const LEAD_STEPS: usize = 16;
const BASS_STEPS_PER_BAR: u32 = 8;
const HATS_PER_BEAT: u32 = 2;

/// Schedule every event of a four-bar clip.
///
/// Returns events grouped by voice in emission order: pad, bass, lead, then
/// drums bar by bar. Onsets within each voice never decrease.
pub fn schedule_clip(spec: &MusicSpec, clip_seconds: f64, seed: u64) -> Vec<ScheduledEvent> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let map = TimeMap::new(spec.bpm);
    let mut events = Vec::new();

    schedule_pad(spec, &map, clip_seconds, &mut events);
    schedule_bass(spec, &map, clip_seconds, &mut events);
    schedule_lead(spec, &map, clip_seconds, &mut rng, &mut events);
    schedule_drums(spec, &map, clip_seconds, &mut events);

    events
}

/// One sustained triad per bar, transposed by the bar's chord degree.
fn schedule_pad(
    spec: &MusicSpec,
    map: &TimeMap,
    clip_seconds: f64,
    events: &mut Vec<ScheduledEvent>,
) {
    let root = PAD_ROOT + spec.key.semitone_offset();
    for bar in 0..BARS_PER_CLIP {
        let onset = map.seconds_at(bar, 0, 0.0);
        if onset >= clip_seconds {
            continue;
        }
        let semis = chord_at(&spec.chords, bar).semitones();
        let notes = PAD_CHORD_OFFSETS
            .iter()
            .map(|offset| midi_u8(root + semis + offset))
            .collect();
        events.push(ScheduledEvent::chord(
            VoiceId::Pad,
            onset,
            NoteLen::Bar,
            notes,
            PAD_VELOCITY,
        ));
    }
}

/// Eight bass hits per bar on the chord root, packed into the first beat.
/// The root-fifths pattern lifts every other hit to the fifth.
fn schedule_bass(
    spec: &MusicSpec,
    map: &TimeMap,
    clip_seconds: f64,
    events: &mut Vec<ScheduledEvent>,
) {
    let root = BASS_ROOT + spec.key.semitone_offset();
    for bar in 0..BARS_PER_CLIP {
        let base = root + chord_at(&spec.chords, bar).semitones();
        for i in 0..BASS_STEPS_PER_BAR {
            let onset = map.seconds_at(bar, 0, f64::from(i) / 8.0);
            if onset >= clip_seconds {
                continue;
            }
            let note = if spec.bass_pattern == BassPattern::RootFifths && i % 2 == 1 {
                base + 7
            } else {
                base
            };
            events.push(ScheduledEvent::note(
                VoiceId::Bass,
                onset,
                NoteLen::Eighth,
                midi_u8(note),
                BASS_VELOCITY,
            ));
        }
    }
}

/// Sixteen melody notes, one per beat, walking the scale along the contour.
fn schedule_lead(
    spec: &MusicSpec,
    map: &TimeMap,
    clip_seconds: f64,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<ScheduledEvent>,
) {
    let root = LEAD_ROOT + spec.key.semitone_offset();
    let intervals = spec.scale.intervals();
    let len = intervals.len() as i32;
    // The full walk is drawn before any onset filtering so the rng stream
    // does not depend on tempo.
    let steps = contour_steps(spec.melody_contour, LEAD_STEPS, rng);
    for (i, step) in steps.iter().enumerate() {
        let bar = (i / 4) as u32;
        let beat = (i % 4) as u32;
        let onset = map.seconds_at(bar, beat, 0.0);
        if onset >= clip_seconds {
            continue;
        }
        let idx = ((step % len) + len) % len;
        let note = root + intervals[idx as usize];
        events.push(ScheduledEvent::note(
            VoiceId::Lead,
            onset,
            NoteLen::Eighth,
            midi_u8(note),
            LEAD_VELOCITY,
        ));
    }
}

/// Kick, snare, and closed hats on a fixed grid. The kick lands on every
/// beat for four-on-the-floor and ambient styles, otherwise on beats 0 and
/// 2; the snare answers on 1 and 3; hats tick twice per beat.
fn schedule_drums(
    spec: &MusicSpec,
    map: &TimeMap,
    clip_seconds: f64,
    events: &mut Vec<ScheduledEvent>,
) {
    let kick_every_beat = spec.drum_style.kick_every_beat();
    for bar in 0..BARS_PER_CLIP {
        for beat in 0..BEATS_PER_BAR {
            let onset = map.seconds_at(bar, beat, 0.0);
            if onset < clip_seconds {
                if kick_every_beat || beat % 2 == 0 {
                    events.push(ScheduledEvent::note(
                        VoiceId::Kick,
                        onset,
                        NoteLen::Eighth,
                        KICK_NOTE,
                        KICK_VELOCITY,
                    ));
                }
                if beat % 2 == 1 {
                    events.push(ScheduledEvent::note(
                        VoiceId::Snare,
                        onset,
                        NoteLen::Sixteenth,
                        SNARE_NOTE,
                        SNARE_VELOCITY,
                    ));
                }
            }
            for sub in 0..HATS_PER_BEAT {
                let hat_onset = map.seconds_at(bar, beat, f64::from(sub) / 8.0);
                if hat_onset >= clip_seconds {
                    continue;
                }
                events.push(ScheduledEvent::note(
                    VoiceId::Hat,
                    hat_onset,
                    NoteLen::ThirtySecond,
                    HAT_NOTE,
                    HAT_VELOCITY,
                ));
            }
        }
    }
}

fn chord_at(chords: &[Degree], bar: u32) -> Degree {
    if chords.is_empty() {
        return Degree::Tonic;
    }
    chords[bar as usize % chords.len()]
}

fn midi_u8(value: i32) -> u8 {
    value.clamp(0, 127) as u8
}

//! Music spec — the canonical clip description and its lenient normalizer.
//!
//! [`MusicSpec::from_value`] accepts any JSON-like value and always returns a
//! valid spec: absent, mistyped, or out-of-domain fields degrade to their
//! documented defaults instead of failing. The canonical struct serializes
//! back out under the same field names the normalizer reads.

pub mod types;

pub use types::{
    degree_to_semitones, BassPattern, Degree, DrumStyle, Key, MelodyContour, ScaleKind,
    SoundSelection, Timbre,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

const BPM_DEFAULT: f64 = 110.0;
const BPM_MIN: f64 = 60.0;
const BPM_MAX: f64 = 160.0;

/// Chord slots in the canonical progression.
const CHORD_SLOTS: usize = 4;

const DEFAULT_PROGRESSION: [Degree; CHORD_SLOTS] = [
    Degree::Tonic,
    Degree::Submediant,
    Degree::Subdominant,
    Degree::Dominant,
];

/// Canonical description of one rendered loop.
///
/// Always valid by construction: `bpm` sits in [60, 160] and `chords` holds
/// exactly four degrees. Strict deserialization fills missing fields with
/// defaults but does not re-clamp; run untrusted input through
/// [`MusicSpec::from_value`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MusicSpec {
    pub bpm: u16,
    pub key: Key,
    pub scale: ScaleKind,
    pub chords: Vec<Degree>,
    pub bass_pattern: BassPattern,
    pub drum_style: DrumStyle,
    pub melody_contour: MelodyContour,
    pub sound: SoundSelection,
}

impl Default for MusicSpec {
    fn default() -> Self {
        Self {
            bpm: BPM_DEFAULT as u16,
            key: Key::default(),
            scale: ScaleKind::default(),
            chords: DEFAULT_PROGRESSION.to_vec(),
            bass_pattern: BassPattern::default(),
            drum_style: DrumStyle::default(),
            melody_contour: MelodyContour::default(),
            sound: SoundSelection::default(),
        }
    }
}

impl MusicSpec {
    /// Normalize an untrusted JSON-like value into a canonical spec.
    ///
    /// Never fails. A non-object value yields the all-defaults spec; within
    /// an object, each field is coerced independently.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.as_object().and_then(|obj| obj.get(name));

        Self {
            bpm: normalize_bpm(field("bpm")),
            key: normalize_name(field("key"), Key::from_name),
            scale: normalize_name(field("scale"), ScaleKind::from_name),
            chords: normalize_chords(field("chords")),
            bass_pattern: normalize_name(field("bassPattern"), BassPattern::from_name),
            drum_style: normalize_name(field("drumStyle"), DrumStyle::from_name),
            melody_contour: normalize_name(field("melodyContour"), MelodyContour::from_name),
            sound: normalize_sound(field("sound")),
        }
    }
}

/// Clamp a numeric bpm into range; absent, non-numeric, non-finite, or zero
/// values take the default before clamping.
fn normalize_bpm(value: Option<&Value>) -> u16 {
    let raw = value
        .and_then(Value::as_f64)
        .filter(|bpm| bpm.is_finite() && *bpm != 0.0)
        .unwrap_or(BPM_DEFAULT);
    raw.clamp(BPM_MIN, BPM_MAX).round() as u16
}

fn normalize_name<T: Default>(value: Option<&Value>, parse: fn(&str) -> Option<T>) -> T {
    value
        .and_then(Value::as_str)
        .and_then(parse)
        .unwrap_or_default()
}

/// Coerce a chord list to exactly [`CHORD_SLOTS`] degrees.
///
/// Longer lists are truncated. Anything shorter than four entries (including
/// absent or non-array values) is replaced by the default progression
/// wholesale; bad entries in a long-enough list fall back to the tonic.
fn normalize_chords(value: Option<&Value>) -> Vec<Degree> {
    let entries = match value.and_then(Value::as_array) {
        Some(list) if list.len() >= CHORD_SLOTS => &list[..CHORD_SLOTS],
        _ => return DEFAULT_PROGRESSION.to_vec(),
    };
    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .and_then(Degree::from_symbol)
                .unwrap_or(Degree::Tonic)
        })
        .collect()
}

/// Resolve per-role timbres. Absent roles take the role default; present but
/// unrecognized values fall back to sine. The pad never carries a square
/// wave, so a square pad is coerced back to the pad default.
fn normalize_sound(value: Option<&Value>) -> SoundSelection {
    let defaults = SoundSelection::default();
    let obj = match value.and_then(Value::as_object) {
        Some(obj) => obj,
        None => return defaults,
    };

    let role = |name: &str, fallback: Timbre| match obj.get(name) {
        None | Some(Value::Null) => fallback,
        Some(v) => v
            .as_str()
            .and_then(Timbre::from_name)
            .unwrap_or(Timbre::Sine),
    };

    let lead = role("lead", defaults.lead);
    let bass = role("bass", defaults.bass);
    let mut pad = role("pad", defaults.pad);
    if pad == Timbre::Square {
        pad = defaults.pad;
    }

    SoundSelection { lead, pad, bass }
}

//! Spec vocabulary — keys, scales, chord degrees, patterns, and timbres.
//!
//! Every enum carries its wire spelling via serde so a canonical spec
//! serializes with the same names the normalizer accepts. The `from_name`
//! constructors implement the lenient side: they return `None` for anything
//! outside the vocabulary and leave the defaulting to the normalizer.

use serde::{Deserialize, Serialize};

/// Pitch class of the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    #[serde(rename = "D#")]
    DSharp,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    #[serde(rename = "A#")]
    ASharp,
    B,
}

impl Key {
    /// Parse an exact pitch-class name ("C", "F#", ...).
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name {
            "C" => Key::C,
            "C#" => Key::CSharp,
            "D" => Key::D,
            "D#" => Key::DSharp,
            "E" => Key::E,
            "F" => Key::F,
            "F#" => Key::FSharp,
            "G" => Key::G,
            "G#" => Key::GSharp,
            "A" => Key::A,
            "A#" => Key::ASharp,
            "B" => Key::B,
            _ => return None,
        };
        Some(key)
    }

    /// Semitones above C.
    pub fn semitone_offset(&self) -> i32 {
        match self {
            Key::C => 0,
            Key::CSharp => 1,
            Key::D => 2,
            Key::DSharp => 3,
            Key::E => 4,
            Key::F => 5,
            Key::FSharp => 6,
            Key::G => 7,
            Key::GSharp => 8,
            Key::A => 9,
            Key::ASharp => 10,
            Key::B => 11,
        }
    }

    /// Wire spelling of the pitch class.
    pub fn name(&self) -> &'static str {
        match self {
            Key::C => "C",
            Key::CSharp => "C#",
            Key::D => "D",
            Key::DSharp => "D#",
            Key::E => "E",
            Key::F => "F",
            Key::FSharp => "F#",
            Key::G => "G",
            Key::GSharp => "G#",
            Key::A => "A",
            Key::ASharp => "A#",
            Key::B => "B",
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::C
    }
}

/// Scale flavor selecting the seven-entry semitone table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Major,
    Minor,
    Dorian,
    Mixolydian,
    Phrygian,
}

impl ScaleKind {
    pub fn from_name(name: &str) -> Option<ScaleKind> {
        let scale = match name {
            "major" => ScaleKind::Major,
            "minor" => ScaleKind::Minor,
            "dorian" => ScaleKind::Dorian,
            "mixolydian" => ScaleKind::Mixolydian,
            "phrygian" => ScaleKind::Phrygian,
            _ => return None,
        };
        Some(scale)
    }

    /// Semitone offsets of the seven scale degrees above the root.
    pub fn intervals(&self) -> [i32; 7] {
        match self {
            ScaleKind::Major => [0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Minor => [0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Dorian => [0, 2, 3, 5, 7, 9, 10],
            ScaleKind::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            ScaleKind::Phrygian => [0, 1, 3, 5, 7, 8, 10],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScaleKind::Major => "major",
            ScaleKind::Minor => "minor",
            ScaleKind::Dorian => "dorian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::Phrygian => "phrygian",
        }
    }
}

impl Default for ScaleKind {
    fn default() -> Self {
        ScaleKind::Major
    }
}

/// Chord degree of the progression, in roman-numeral spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degree {
    #[serde(rename = "I")]
    Tonic,
    #[serde(rename = "ii")]
    Supertonic,
    #[serde(rename = "iii")]
    Mediant,
    #[serde(rename = "IV")]
    Subdominant,
    #[serde(rename = "V")]
    Dominant,
    #[serde(rename = "vi")]
    Submediant,
    #[serde(rename = "vii°")]
    LeadingTone,
}

impl Degree {
    /// Parse an exact roman-numeral symbol.
    pub fn from_symbol(symbol: &str) -> Option<Degree> {
        let degree = match symbol {
            "I" => Degree::Tonic,
            "ii" => Degree::Supertonic,
            "iii" => Degree::Mediant,
            "IV" => Degree::Subdominant,
            "V" => Degree::Dominant,
            "vi" => Degree::Submediant,
            "vii°" => Degree::LeadingTone,
            _ => return None,
        };
        Some(degree)
    }

    /// Semitones the degree transposes the chord root by.
    pub fn semitones(&self) -> i32 {
        match self {
            Degree::Tonic => 0,
            Degree::Supertonic => 2,
            Degree::Mediant => 4,
            Degree::Subdominant => 5,
            Degree::Dominant => 7,
            Degree::Submediant => 9,
            Degree::LeadingTone => 11,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Degree::Tonic => "I",
            Degree::Supertonic => "ii",
            Degree::Mediant => "iii",
            Degree::Subdominant => "IV",
            Degree::Dominant => "V",
            Degree::Submediant => "vi",
            Degree::LeadingTone => "vii°",
        }
    }
}

/// Semitone offset for a degree symbol; unrecognized symbols map to the tonic.
pub fn degree_to_semitones(symbol: &str) -> i32 {
    Degree::from_symbol(symbol).map_or(0, |d| d.semitones())
}

/// Bass line pattern over each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BassPattern {
    RootEighths,
    RootFifths,
    Walking,
}

impl BassPattern {
    pub fn from_name(name: &str) -> Option<BassPattern> {
        let pattern = match name {
            "root-eighths" => BassPattern::RootEighths,
            "root-fifths" => BassPattern::RootFifths,
            "walking" => BassPattern::Walking,
            _ => return None,
        };
        Some(pattern)
    }
}

impl Default for BassPattern {
    fn default() -> Self {
        BassPattern::RootEighths
    }
}

/// Drum feel. Only the kick placement differs between styles today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrumStyle {
    FourOnTheFloor,
    Breakbeat,
    BoomBap,
    Ambient,
}

impl DrumStyle {
    pub fn from_name(name: &str) -> Option<DrumStyle> {
        let style = match name {
            "fourOnTheFloor" => DrumStyle::FourOnTheFloor,
            "breakbeat" => DrumStyle::Breakbeat,
            "boomBap" => DrumStyle::BoomBap,
            "ambient" => DrumStyle::Ambient,
            _ => return None,
        };
        Some(style)
    }

    /// Whether the kick fires on every beat instead of beats 0 and 2.
    pub fn kick_every_beat(&self) -> bool {
        matches!(self, DrumStyle::FourOnTheFloor | DrumStyle::Ambient)
    }
}

impl Default for DrumStyle {
    fn default() -> Self {
        DrumStyle::Breakbeat
    }
}

/// Shape of the lead melody's step cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MelodyContour {
    Ascending,
    Descending,
    Arched,
    RandomWalk,
}

impl MelodyContour {
    pub fn from_name(name: &str) -> Option<MelodyContour> {
        let contour = match name {
            "ascending" => MelodyContour::Ascending,
            "descending" => MelodyContour::Descending,
            "arched" => MelodyContour::Arched,
            "randomWalk" => MelodyContour::RandomWalk,
            _ => return None,
        };
        Some(contour)
    }
}

impl Default for MelodyContour {
    fn default() -> Self {
        MelodyContour::RandomWalk
    }
}

/// Oscillator timbre name as the spec vocabulary spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timbre {
    Sine,
    Triangle,
    Saw,
    Square,
}

impl Timbre {
    /// Parse a timbre name. Unlike the other vocabularies this is
    /// case-insensitive and accepts "sawtooth" as an alias for "saw".
    pub fn from_name(name: &str) -> Option<Timbre> {
        let timbre = match name.to_ascii_lowercase().as_str() {
            "sine" => Timbre::Sine,
            "triangle" => Timbre::Triangle,
            "saw" | "sawtooth" => Timbre::Saw,
            "square" => Timbre::Square,
            _ => return None,
        };
        Some(timbre)
    }
}

impl Default for Timbre {
    fn default() -> Self {
        Timbre::Sine
    }
}

/// Timbre choice per melodic role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundSelection {
    pub lead: Timbre,
    pub pad: Timbre,
    pub bass: Timbre,
}

impl Default for SoundSelection {
    fn default() -> Self {
        Self {
            lead: Timbre::Triangle,
            pad: Timbre::Saw,
            bass: Timbre::Square,
        }
    }
}

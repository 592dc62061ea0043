//! Scheduled events — what plays, when, and how loud.

/// The six voices a clip can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceId {
    Pad,
    Lead,
    Bass,
    Kick,
    Snare,
    Hat,
}

impl VoiceId {
    pub fn name(&self) -> &'static str {
        match self {
            VoiceId::Pad => "pad",
            VoiceId::Lead => "lead",
            VoiceId::Bass => "bass",
            VoiceId::Kick => "kick",
            VoiceId::Snare => "snare",
            VoiceId::Hat => "hat",
        }
    }
}

/// Pitch content of an event: a single MIDI note or a stacked chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pitch {
    Note(u8),
    Chord(Vec<u8>),
}

impl Pitch {
    /// All notes in the event, chord or not.
    pub fn notes(&self) -> &[u8] {
        match self {
            Pitch::Note(note) => std::slice::from_ref(note),
            Pitch::Chord(notes) => notes.as_slice(),
        }
    }
}

/// Symbolic note length, resolved against the clip tempo at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLen {
    Bar,
    Eighth,
    Sixteenth,
    ThirtySecond,
}

impl NoteLen {
    /// Held duration in seconds at the given tempo.
    pub fn seconds(&self, bpm: u16) -> f64 {
        let beat = 60.0 / f64::from(bpm);
        match self {
            NoteLen::Bar => beat * 4.0,
            NoteLen::Eighth => beat / 2.0,
            NoteLen::Sixteenth => beat / 4.0,
            NoteLen::ThirtySecond => beat / 8.0,
        }
    }
}

/// One voice playing one pitch at one point on the clip timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub voice: VoiceId,
    pub onset_secs: f64,
    pub duration: NoteLen,
    pub pitch: Pitch,
    pub velocity: f32,
}

impl ScheduledEvent {
    /// Single-note event.
    pub fn note(
        voice: VoiceId,
        onset_secs: f64,
        duration: NoteLen,
        note: u8,
        velocity: f32,
    ) -> Self {
        Self {
            voice,
            onset_secs,
            duration,
            pitch: Pitch::Note(note),
            velocity,
        }
    }

    /// Chord event holding several notes at once.
    pub fn chord(
        voice: VoiceId,
        onset_secs: f64,
        duration: NoteLen,
        notes: Vec<u8>,
        velocity: f32,
    ) -> Self {
        Self {
            voice,
            onset_secs,
            duration,
            pitch: Pitch::Chord(notes),
            velocity,
        }
    }
}

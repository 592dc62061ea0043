//! Tempo math — maps musical positions onto the clip timeline.

/// Bars in one scheduled clip.
pub const BARS_PER_CLIP: u32 = 4;

/// Beats in one bar.
pub const BEATS_PER_BAR: u32 = 4;

/// Length of the rendered clip in seconds. Events at or past this point are
/// dropped by the scheduler.
pub const CLIP_SECONDS: f64 = 10.0;

/// Converts bar/beat positions into seconds for a fixed tempo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeMap {
    seconds_per_beat: f64,
}

impl TimeMap {
    pub fn new(bpm: u16) -> Self {
        Self {
            seconds_per_beat: 60.0 / f64::from(bpm),
        }
    }

    pub fn seconds_per_beat(&self) -> f64 {
        self.seconds_per_beat
    }

    pub fn seconds_per_bar(&self) -> f64 {
        self.seconds_per_beat * f64::from(BEATS_PER_BAR)
    }

    /// Seconds at `bar` + `beat` + a fractional beat offset.
    ///
    /// `subdivision` is measured in beats, so `seconds_at(1, 2, 0.5)` lands
    /// half a beat after beat two of bar one.
    pub fn seconds_at(&self, bar: u32, beat: u32, subdivision: f64) -> f64 {
        f64::from(bar) * self.seconds_per_bar()
            + (f64::from(beat) + subdivision) * self.seconds_per_beat
    }
}

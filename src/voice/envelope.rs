//! ADSR envelope shaping for the clip voices.

/// Attack-Decay-Sustain-Release envelope.
///
/// All time values are in seconds. Sustain is a level (0.0–1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl Envelope {
    pub const fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Amplitude at time `t` for a note held for `held` seconds.
    ///
    /// Ramps linearly 0 to 1 across the attack, 1 down to sustain across the
    /// decay, holds sustain until `held`, then ramps to 0 across the release.
    /// The decay always runs to completion, even past a shorter `held`.
    pub fn level(&self, t: f64, held: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }

        if t < self.attack {
            if self.attack <= 0.0 {
                1.0
            } else {
                t / self.attack
            }
        } else if t < self.attack + self.decay {
            if self.decay <= 0.0 {
                self.sustain
            } else {
                let decay_t = (t - self.attack) / self.decay;
                1.0 - decay_t * (1.0 - self.sustain)
            }
        } else if t < held {
            self.sustain
        } else if t < held + self.release {
            if self.release <= 0.0 {
                0.0
            } else {
                let release_t = (t - held) / self.release;
                self.sustain * (1.0 - release_t)
            }
        } else {
            0.0
        }
    }

    /// Seconds of sound for a note held `held` seconds, release tail included.
    pub fn total_secs(&self, held: f64) -> f64 {
        held + self.release
    }
}

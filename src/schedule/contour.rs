//! Melody contours — step sequences the lead line walks through a scale.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::spec::MelodyContour;

/// Generate `count` scale steps following the given contour.
///
/// The walk starts at zero and moves before each emitted step, so the first
/// step is already displaced from the root. Only [`MelodyContour::RandomWalk`]
/// draws from `rng`; the shaped contours leave it untouched.
pub fn contour_steps(contour: MelodyContour, count: usize, rng: &mut ChaCha8Rng) -> Vec<i32> {
    let mut steps = Vec::with_capacity(count);
    let mut pos: i32 = 0;
    for i in 0..count {
        pos += match contour {
            MelodyContour::Ascending => {
                if i % 3 == 0 {
                    2
                } else {
                    1
                }
            }
            MelodyContour::Descending => {
                if i % 3 == 0 {
                    -2
                } else {
                    -1
                }
            }
            MelodyContour::Arched => {
                if i < count / 2 {
                    1
                } else {
                    -1
                }
            }
            MelodyContour::RandomWalk => {
                if rng.gen_bool(0.5) {
                    1
                } else {
                    -1
                }
            }
        };
        steps.push(pos);
    }
    steps
}

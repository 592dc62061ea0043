//! Render buffer — fixed-length interleaved storage the clip mixes into.

/// Interleaved f32 audio of a fixed length. Voices mix into it additively;
/// anything that runs past the end is dropped.
pub struct RenderBuffer {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl RenderBuffer {
    /// Allocate a silent buffer spanning `duration_secs`.
    pub fn silence(sample_rate: u32, channels: u16, duration_secs: f64) -> Self {
        let frames = (duration_secs * sample_rate as f64).round() as usize;
        Self {
            samples: vec![0.0f32; frames * channels as usize],
            channels,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mix interleaved samples into the buffer starting at `start_frame`.
    pub fn mix_at(&mut self, start_frame: usize, data: &[f32]) {
        let start = start_frame * self.channels as usize;
        for (i, &sample) in data.iter().enumerate() {
            let pos = start + i;
            if pos >= self.samples.len() {
                break;
            }
            self.samples[pos] += sample;
        }
    }
}

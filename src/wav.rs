//! WAV container — 16-bit PCM encoding of a rendered buffer.
//!
//! Output is a plain 44-byte RIFF/WAVE header followed by little-endian
//! interleaved PCM16 data, with no padding or extra chunks.

use std::io::{self, Write};

use crate::render::{RenderBuffer, RenderConfigError};

pub const BITS_PER_SAMPLE: u16 = 16;
pub const BYTES_PER_SAMPLE: usize = 2;
pub const HEADER_LEN: usize = 44;

/// PCM16 output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

impl WavFormat {
    /// CD-style stereo at 44.1 kHz.
    pub fn stereo() -> Self {
        Self {
            channels: 2,
            sample_rate: 44100,
        }
    }

    /// Format matching a rendered buffer's layout.
    pub fn from_buffer(buffer: &RenderBuffer) -> Self {
        Self {
            channels: buffer.channels(),
            sample_rate: buffer.sample_rate(),
        }
    }

    pub fn block_align(&self) -> u16 {
        self.channels * 2
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

/// Quantize one sample to PCM16.
///
/// The scale is asymmetric so both rails are reachable: negative samples
/// scale by 32768, non-negative by 32767. The result truncates toward zero.
fn pcm16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

fn check(format: &WavFormat, buffer: &RenderBuffer) -> Result<(), RenderConfigError> {
    if format.sample_rate == 0 {
        return Err(RenderConfigError::InvalidSampleRate(format.sample_rate));
    }
    if format.channels == 0 {
        return Err(RenderConfigError::InvalidChannels(format.channels));
    }
    if format.channels != buffer.channels() {
        return Err(RenderConfigError::ChannelMismatch {
            format: format.channels,
            buffer: buffer.channels(),
        });
    }
    Ok(())
}

fn header(format: &WavFormat, data_len: u32) -> [u8; HEADER_LEN] {
    let mut h = [0u8; HEADER_LEN];
    h[0..4].copy_from_slice(b"RIFF");
    h[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
    h[8..12].copy_from_slice(b"WAVE");
    h[12..16].copy_from_slice(b"fmt ");
    h[16..20].copy_from_slice(&16u32.to_le_bytes());
    h[20..22].copy_from_slice(&1u16.to_le_bytes());
    h[22..24].copy_from_slice(&format.channels.to_le_bytes());
    h[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    h[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    h[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    h[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    h[36..40].copy_from_slice(b"data");
    h[40..44].copy_from_slice(&data_len.to_le_bytes());
    h
}

/// Encode a buffer into a complete WAV byte vector.
pub fn encode(format: &WavFormat, buffer: &RenderBuffer) -> Result<Vec<u8>, RenderConfigError> {
    check(format, buffer)?;

    let samples = buffer.samples();
    let data_len = (samples.len() * BYTES_PER_SAMPLE) as u32;
    let mut out = Vec::with_capacity(HEADER_LEN + samples.len() * BYTES_PER_SAMPLE);
    out.extend_from_slice(&header(format, data_len));
    for &sample in samples {
        out.extend_from_slice(&pcm16(sample).to_le_bytes());
    }
    Ok(out)
}

/// Stream a buffer as WAV into any writer.
///
/// Configuration problems surface as [`io::ErrorKind::InvalidInput`].
pub fn write_wav<W: Write>(
    writer: &mut W,
    format: &WavFormat,
    buffer: &RenderBuffer,
) -> io::Result<()> {
    check(format, buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let samples = buffer.samples();
    let data_len = (samples.len() * BYTES_PER_SAMPLE) as u32;
    writer.write_all(&header(format, data_len))?;
    for &sample in samples {
        writer.write_all(&pcm16(sample).to_le_bytes())?;
    }
    Ok(())
}

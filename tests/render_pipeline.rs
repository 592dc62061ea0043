//! Full pipeline integration tests — spec value → normalize → schedule →
//! render → WAV bytes.
//!
//! These tests drive the whole offline path and pin down the output
//! contract: fixed clip length, deterministic bytes, and a well-formed
//! PCM16 WAV container.

use std::collections::HashSet;
use std::io::{BufWriter, Write};

use serde_json::json;
use tempfile::NamedTempFile;

use loopforge::render::{render, RenderOptions};
use loopforge::schedule::{schedule_clip, ScheduledEvent, VoiceId, CLIP_SECONDS};
use loopforge::spec::MusicSpec;
use loopforge::wav::{encode, write_wav, WavFormat, HEADER_LEN};

const WAV_LEN: usize = 1_764_044;
const DATA_LEN: u32 = 1_764_000;

/// Helper: the demo spec — a bright four-on-the-floor loop in C major.
fn demo_spec() -> MusicSpec {
    MusicSpec::from_value(&json!({
        "bpm": 120,
        "key": "C",
        "scale": "major",
        "chords": ["I", "vi", "IV", "V"],
        "bassPattern": "root-eighths",
        "drumStyle": "fourOnTheFloor",
        "melodyContour": "ascending",
        "sound": { "lead": "triangle", "pad": "saw", "bass": "square" }
    }))
}

fn options_with_seed(seed: u64) -> RenderOptions {
    RenderOptions {
        seed: Some(seed),
        ..RenderOptions::default()
    }
}

/// Helper: render a spec under a fixed seed and encode it to WAV bytes.
fn render_wav_bytes(spec: &MusicSpec, seed: u64) -> Vec<u8> {
    let buffer = render(spec, &options_with_seed(seed)).expect("render failed");
    encode(&WavFormat::from_buffer(&buffer), &buffer).expect("encode failed")
}

fn count(events: &[ScheduledEvent], voice: VoiceId) -> usize {
    events.iter().filter(|e| e.voice == voice).count()
}

fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}

// =============================================================================
// Test 1: The demo spec renders audible audio
// =============================================================================

#[test]
fn demo_spec_produces_sound() {
    let buffer = render(&demo_spec(), &options_with_seed(1)).expect("render failed");

    assert_eq!(buffer.frames(), 441_000);
    let loud_samples = buffer.samples().iter().filter(|s| s.abs() > 0.01).count();
    assert!(
        loud_samples > 44_100,
        "clip should be audibly busy, got {loud_samples} loud samples"
    );
}

// =============================================================================
// Test 2: WAV output honors the fixed container contract
// =============================================================================

#[test]
fn wav_container_contract() {
    let bytes = render_wav_bytes(&demo_spec(), 1);

    assert_eq!(bytes.len(), WAV_LEN);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    assert_eq!(&bytes[36..40], b"data");
    assert_eq!(u32_at(&bytes, 4), 36 + DATA_LEN);
    assert_eq!(u32_at(&bytes, 24), 44_100, "sample rate");
    assert_eq!(u32_at(&bytes, 40), DATA_LEN);
    assert_eq!(u16::from_le_bytes([bytes[22], bytes[23]]), 2, "channels");
    assert_eq!(u16::from_le_bytes([bytes[34], bytes[35]]), 16, "bit depth");
}

// =============================================================================
// Test 3: Any input value renders to the same fixed-size WAV
// =============================================================================

#[test]
fn nasty_inputs_still_render_full_clips() {
    let nasty = [
        json!(null),
        json!("not even an object"),
        json!([1, 2, 3]),
        json!({ "bpm": "fast", "chords": 7, "sound": "loud" }),
        json!({ "bpm": 1e9, "key": "Q", "scale": 3, "drumStyle": "jazz" }),
    ];

    for value in &nasty {
        let spec = MusicSpec::from_value(value);
        let bytes = render_wav_bytes(&spec, 1);
        assert_eq!(bytes.len(), WAV_LEN, "input {value} broke the clip size");
        assert_eq!(u32_at(&bytes, 40), DATA_LEN);
    }
}

// =============================================================================
// Test 4: Event counts at 120 BPM — everything fits in ten seconds
// =============================================================================

#[test]
fn event_counts_at_120_bpm() {
    let events = schedule_clip(&demo_spec(), CLIP_SECONDS, 1);

    assert_eq!(count(&events, VoiceId::Pad), 4);
    assert_eq!(count(&events, VoiceId::Bass), 32);
    assert_eq!(count(&events, VoiceId::Lead), 16);
    assert_eq!(count(&events, VoiceId::Kick), 16, "four-on-the-floor kick");
    assert_eq!(count(&events, VoiceId::Snare), 8);
    assert_eq!(count(&events, VoiceId::Hat), 32);
}

// =============================================================================
// Test 5: Event counts at 60 BPM — the clip end truncates the last bar
// =============================================================================

#[test]
fn event_counts_at_60_bpm() {
    let spec = MusicSpec::from_value(&json!({ "bpm": 60 }));
    let events = schedule_clip(&spec, CLIP_SECONDS, 1);

    assert_eq!(count(&events, VoiceId::Pad), 3);
    assert_eq!(count(&events, VoiceId::Bass), 24);
    assert_eq!(count(&events, VoiceId::Lead), 10);
    assert_eq!(count(&events, VoiceId::Kick), 5);
    assert_eq!(count(&events, VoiceId::Snare), 5);
    assert_eq!(count(&events, VoiceId::Hat), 20);
}

// =============================================================================
// Test 6: Every onset lands inside the clip, in order per voice
// =============================================================================

#[test]
fn onsets_in_range_and_ordered() {
    for bpm in [60, 97, 110, 120, 160] {
        let spec = MusicSpec::from_value(&json!({ "bpm": bpm }));
        let events = schedule_clip(&spec, CLIP_SECONDS, 3);

        assert!(events
            .iter()
            .all(|e| e.onset_secs >= 0.0 && e.onset_secs < CLIP_SECONDS));

        for voice in [
            VoiceId::Pad,
            VoiceId::Bass,
            VoiceId::Lead,
            VoiceId::Kick,
            VoiceId::Snare,
            VoiceId::Hat,
        ] {
            let onsets: Vec<f64> = events
                .iter()
                .filter(|e| e.voice == voice)
                .map(|e| e.onset_secs)
                .collect();
            assert!(
                onsets.windows(2).all(|w| w[0] <= w[1]),
                "{voice:?} out of order at {bpm} BPM"
            );
        }
    }
}

// =============================================================================
// Test 7: Shaped contours render byte-identically under any seed
// =============================================================================

#[test]
fn ascending_render_ignores_the_seed() {
    let spec = demo_spec();
    let a = render_wav_bytes(&spec, 1);
    let b = render_wav_bytes(&spec, 999);
    assert_eq!(a, b, "ascending contour must not consume the seed");
}

// =============================================================================
// Test 8: Random walks repeat per seed and vary across seeds
// =============================================================================

#[test]
fn random_walk_seed_behavior() {
    let spec = MusicSpec::from_value(&json!({ "bpm": 120, "melodyContour": "randomWalk" }));

    let a = render_wav_bytes(&spec, 42);
    let b = render_wav_bytes(&spec, 42);
    assert_eq!(a, b, "same seed must render bit-identical bytes");

    let distinct: HashSet<Vec<u8>> = (0..8).map(|seed| render_wav_bytes(&spec, seed)).collect();
    assert!(
        distinct.len() > 1,
        "eight seeds should not all walk the same melody"
    );
}

// =============================================================================
// Test 9: Sound selection changes the rendered audio
// =============================================================================

#[test]
fn timbre_changes_the_audio() {
    let sine = MusicSpec::from_value(&json!({
        "melodyContour": "ascending",
        "sound": { "lead": "sine" }
    }));
    let square = MusicSpec::from_value(&json!({
        "melodyContour": "ascending",
        "sound": { "lead": "square" }
    }));

    let a = render_wav_bytes(&sine, 1);
    let b = render_wav_bytes(&square, 1);
    assert_eq!(a.len(), b.len());
    assert_ne!(
        a[HEADER_LEN..],
        b[HEADER_LEN..],
        "lead timbre should be audible in the bytes"
    );
}

// =============================================================================
// Test 10: Written files read back cleanly through an independent decoder
// =============================================================================

#[test]
fn wav_round_trips_through_hound() {
    let buffer = render(&demo_spec(), &options_with_seed(7)).expect("render failed");
    let format = WavFormat::from_buffer(&buffer);

    let mut file = NamedTempFile::new().expect("temp file");
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write_wav(&mut writer, &format, &buffer).expect("write wav");
        writer.flush().expect("flush");
    }

    let reader = hound::WavReader::open(file.path()).expect("open wav");
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.duration(), 441_000);
    assert_eq!(reader.len(), 882_000);

    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .map(|s| s.expect("sample"))
        .collect();
    assert!(samples.iter().any(|&s| s != 0), "decoded clip is silent");
}

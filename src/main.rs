//! Loopforge — renders a music spec into a ten-second WAV loop.
//!
//! Reads a JSON or YAML spec from a file or stdin, normalizes it, schedules
//! the four-bar clip, renders it offline, and writes a PCM16 WAV file.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use loopforge::render::{render, RenderOptions};
use loopforge::schedule::{schedule_clip, Pitch, CLIP_SECONDS};
use loopforge::spec::MusicSpec;
use loopforge::voice::midi_note_name;
use loopforge::wav::{write_wav, WavFormat};

#[derive(Parser)]
#[command(name = "loopforge")]
#[command(about = "Render a music spec into a ten-second WAV loop", version)]
struct Cli {
    /// Spec file (.json, .yaml, .yml); "-" or absent reads JSON from stdin
    spec: Option<PathBuf>,

    /// Output WAV path
    #[arg(short, long, default_value = "loop.wav")]
    out: PathBuf,

    /// Seed for the melody's random walk (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the normalized spec as JSON and exit
    #[arg(long)]
    print_spec: bool,

    /// List every scheduled event before rendering
    #[arg(short, long)]
    verbose: bool,
}

fn read_spec_text(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn is_yaml_path(path: Option<&Path>) -> bool {
    path.and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

fn parse_spec_value(path: Option<&Path>, text: &str) -> Result<serde_json::Value, String> {
    if is_yaml_path(path) {
        serde_yaml::from_str(text).map_err(|e| format!("invalid yaml: {e}"))
    } else {
        serde_json::from_str(text).map_err(|e| format!("invalid json: {e}"))
    }
}

fn describe_pitch(pitch: &Pitch) -> String {
    match pitch {
        Pitch::Note(note) => midi_note_name(*note),
        Pitch::Chord(notes) => notes
            .iter()
            .map(|&note| midi_note_name(note))
            .collect::<Vec<_>>()
            .join("+"),
    }
}

fn main() {
    let cli = Cli::parse();

    // 1. Read and normalize the spec
    let text = match read_spec_text(cli.spec.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("failed to read spec: {e}");
            process::exit(1);
        }
    };
    let value = match parse_spec_value(cli.spec.as_deref(), &text) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let spec = MusicSpec::from_value(&value);

    if cli.print_spec {
        match serde_json::to_string_pretty(&spec) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("failed to serialize spec: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!("loopforge v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "tempo: {} BPM, key: {} {}",
        spec.bpm,
        spec.key.name(),
        spec.scale.name()
    );

    // 2. Schedule the clip
    let seed = cli.seed.unwrap_or_else(rand::random);
    let events = schedule_clip(&spec, CLIP_SECONDS, seed);
    println!("scheduled {} events (seed {seed})", events.len());

    if cli.verbose {
        for event in &events {
            println!(
                "  {:>7.3}s  {:<5} {} vel {:.2}",
                event.onset_secs,
                event.voice.name(),
                describe_pitch(&event.pitch),
                event.velocity
            );
        }
    }

    // 3. Render offline
    let options = RenderOptions {
        seed: Some(seed),
        ..RenderOptions::default()
    };
    let buffer = match render(&spec, &options) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("render failed: {e}");
            process::exit(1);
        }
    };

    // 4. Encode and write the WAV
    let format = WavFormat::from_buffer(&buffer);
    let file = match File::create(&cli.out) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("failed to create {}: {e}", cli.out.display());
            process::exit(1);
        }
    };
    let mut writer = BufWriter::new(file);
    if let Err(e) = write_wav(&mut writer, &format, &buffer) {
        eprintln!("failed to write {}: {e}", cli.out.display());
        process::exit(1);
    }
    if let Err(e) = writer.flush() {
        eprintln!("failed to write {}: {e}", cli.out.display());
        process::exit(1);
    }

    println!(
        "wrote {} ({:.1}s, {} Hz, {} ch)",
        cli.out.display(),
        buffer.frames() as f64 / buffer.sample_rate() as f64,
        buffer.sample_rate(),
        buffer.channels()
    );
}

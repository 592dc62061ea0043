//! Loopforge — renders a structured music spec into a ten-second WAV loop.

pub mod render;
pub mod schedule;
pub mod spec;
pub mod voice;
pub mod wav;

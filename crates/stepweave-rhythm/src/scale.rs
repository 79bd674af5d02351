//! Scales and note pools.
//!
//! A scale is a set of semitone intervals from a root. [`note_pool`] expands
//! a root plus scale into the ascending note-name pool that
//! [`notes`](crate::notes) walks or samples.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::note::midi_to_note_name;

/// Named scale (interval set from the root).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
    Chromatic,
}

impl Scale {
    /// Semitone intervals from the root, within one octave.
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Scale::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            Scale::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Scale::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Scale::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Scale::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Scale::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Scale::MajorPentatonic => &[0, 2, 4, 7, 9],
            Scale::MinorPentatonic => &[0, 3, 5, 7, 10],
            Scale::Blues => &[0, 3, 5, 6, 7, 10],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// The snake_case name used on the wire and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Major => "major",
            Scale::NaturalMinor => "natural_minor",
            Scale::HarmonicMinor => "harmonic_minor",
            Scale::MelodicMinor => "melodic_minor",
            Scale::Dorian => "dorian",
            Scale::Phrygian => "phrygian",
            Scale::Lydian => "lydian",
            Scale::Mixolydian => "mixolydian",
            Scale::Locrian => "locrian",
            Scale::MajorPentatonic => "major_pentatonic",
            Scale::MinorPentatonic => "minor_pentatonic",
            Scale::Blues => "blues",
            Scale::Chromatic => "chromatic",
        }
    }
}

impl FromStr for Scale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Scale::Major),
            "natural_minor" | "minor" => Ok(Scale::NaturalMinor),
            "harmonic_minor" => Ok(Scale::HarmonicMinor),
            "melodic_minor" => Ok(Scale::MelodicMinor),
            "dorian" => Ok(Scale::Dorian),
            "phrygian" => Ok(Scale::Phrygian),
            "lydian" => Ok(Scale::Lydian),
            "mixolydian" => Ok(Scale::Mixolydian),
            "locrian" => Ok(Scale::Locrian),
            "major_pentatonic" => Ok(Scale::MajorPentatonic),
            "minor_pentatonic" => Ok(Scale::MinorPentatonic),
            "blues" => Ok(Scale::Blues),
            "chromatic" => Ok(Scale::Chromatic),
            other => Err(format!("unknown scale: {other}")),
        }
    }
}

/// Build an ascending note-name pool from a root over `octaves` octaves.
///
/// `octaves` is coerced to at least 1. Notes past the top of the MIDI range
/// are dropped, so a pool near the ceiling simply comes out shorter.
pub fn note_pool(root_midi: u8, scale: Scale, octaves: u8) -> Vec<String> {
    let octaves = octaves.max(1);
    let mut pool = Vec::new();

    for octave in 0..octaves {
        for &interval in scale.intervals() {
            let midi = root_midi as u32 + octave as u32 * 12 + interval as u32;
            if midi <= 127 {
                pool.push(midi_to_note_name(midi as u8));
            }
        }
    }

    pool
}

//! Note-name and MIDI conversion.
//!
//! Note names are the sequencer-facing currency ("C2", "A#3", "Bb5");
//! everything numeric goes through MIDI note numbers (0-127, C-1 = 0,
//! A4 = 69).

/// Semitone offsets for note letters (C=0, D=2, E=4, F=5, G=7, A=9, B=11).
const SEMITONE_MAP: [(char, i8); 7] = [
    ('C', 0),
    ('D', 2),
    ('E', 4),
    ('F', 5),
    ('G', 7),
    ('A', 9),
    ('B', 11),
];

/// Note names per semitone, sharps canonical.
const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Convert a note name (e.g., "C4", "A#3", "Bb5") to a MIDI note number.
///
/// Sharps and flats are both accepted ("Bb3" parses the same as "A#3").
/// Octaves follow the MIDI convention where C-1 is note 0, so "C4" is 60.
/// Out-of-range results are clamped into 0-127; unparseable names yield
/// `None`.
///
/// # Examples
/// ```
/// use stepweave_rhythm::note_name_to_midi;
///
/// assert_eq!(note_name_to_midi("C4"), Some(60));
/// assert_eq!(note_name_to_midi("A4"), Some(69));
/// assert_eq!(note_name_to_midi("Bb3"), Some(58));
/// assert_eq!(note_name_to_midi("H2"), None);
/// ```
pub fn note_name_to_midi(name: &str) -> Option<u8> {
    let name = name.trim().to_uppercase();
    let chars: Vec<char> = name.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let note_char = chars[0];
    let semitone = SEMITONE_MAP
        .iter()
        .find(|(c, _)| *c == note_char)
        .map(|(_, s)| *s as i32)?;

    let mut idx = 1;

    // Accidental: '#' raises; 'B' lowers when followed by an octave digit
    // (uppercase because the input was uppercased).
    let semitone = if idx < chars.len() {
        match chars[idx] {
            '#' => {
                idx += 1;
                semitone + 1
            }
            'B' if chars
                .get(idx + 1)
                .is_some_and(|c| c.is_ascii_digit() || *c == '-') =>
            {
                idx += 1;
                semitone - 1
            }
            _ => semitone,
        }
    } else {
        semitone
    };

    let octave_str: String = chars[idx..].iter().collect();
    let octave: i32 = octave_str.parse().ok()?;

    let midi = (octave + 1) * 12 + semitone;
    Some(midi.clamp(0, 127) as u8)
}

/// Convert a MIDI note number to its canonical sharp-based name.
///
/// # Examples
/// ```
/// use stepweave_rhythm::midi_to_note_name;
///
/// assert_eq!(midi_to_note_name(60), "C4");
/// assert_eq!(midi_to_note_name(70), "A#4");
/// ```
pub fn midi_to_note_name(midi: u8) -> String {
    let midi = midi.min(127);
    let octave = midi as i32 / 12 - 1;
    let semitone = midi as usize % 12;
    format!("{}{}", NOTE_NAMES[semitone], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_name_to_midi() {
        assert_eq!(note_name_to_midi("C4"), Some(60));
        assert_eq!(note_name_to_midi("c4"), Some(60));
        assert_eq!(note_name_to_midi("A#3"), Some(58));
        assert_eq!(note_name_to_midi("Bb3"), Some(58)); // Bb = A#
        assert_eq!(note_name_to_midi("C-1"), Some(0));
        assert_eq!(note_name_to_midi("G9"), Some(127));
        assert_eq!(note_name_to_midi("B9"), Some(127)); // clamped
        assert_eq!(note_name_to_midi(""), None);
        assert_eq!(note_name_to_midi("X3"), None);
        assert_eq!(note_name_to_midi("C"), None);
    }

    #[test]
    fn test_b_is_note_not_flat() {
        // Bare "B3" is the note B, not a flat marker.
        assert_eq!(note_name_to_midi("B3"), Some(59));
        assert_eq!(note_name_to_midi("Bb3"), Some(58));
    }

    #[test]
    fn test_midi_to_note_name() {
        assert_eq!(midi_to_note_name(0), "C-1");
        assert_eq!(midi_to_note_name(60), "C4");
        assert_eq!(midi_to_note_name(69), "A4");
        assert_eq!(midi_to_note_name(70), "A#4");
    }

    #[test]
    fn test_roundtrip() {
        for midi in 0..=127u8 {
            let name = midi_to_note_name(midi);
            assert_eq!(
                note_name_to_midi(&name),
                Some(midi),
                "roundtrip failed for {midi}: {name}"
            );
        }
    }
}

//! Note list parsing for offline rendering.
//!
//! A note is written `NOTE[:VELOCITY][@START[+LENGTH]]`, with `NOTE` a MIDI
//! number (`60`) or a name (`C4`, `F#3`, `Bb2`), times in seconds:
//!
//! ```text
//! 60            middle C at t = 0 for the default length
//! E4:90@0.5     E4, velocity 90, starting at 0.5 s
//! 67@1+0.25     G4 at 1 s, held for 0.25 s
//! ```

use vibra_synth::NoteEvent;

const DEFAULT_VELOCITY: u8 = 100;

/// One note of a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSpec {
    /// MIDI note number.
    pub note: u8,
    /// MIDI velocity, 1-127.
    pub velocity: u8,
    /// Start time in seconds.
    pub start: f64,
    /// Hold time in seconds; `None` uses the render's default length.
    pub length: Option<f64>,
}

impl NoteSpec {
    /// Frame of the note-on and note-off at `sample_rate`.
    pub fn frames(&self, sample_rate: f64, default_length: f64) -> (usize, usize) {
        let on = (self.start * sample_rate).round() as usize;
        let held = (self.length.unwrap_or(default_length) * sample_rate).round() as usize;
        (on, on + held)
    }
}

/// Parse one note for clap's `value_parser`.
pub fn parse_note(s: &str) -> Result<NoteSpec, String> {
    let (pitch_part, timing) = match s.split_once('@') {
        Some((pitch, timing)) => (pitch, Some(timing)),
        None => (s, None),
    };
    let (pitch, velocity) = match pitch_part.split_once(':') {
        Some((pitch, velocity)) => {
            let velocity: u8 = velocity
                .parse()
                .map_err(|_| format!("invalid velocity '{velocity}' in '{s}'"))?;
            if !(1..=127).contains(&velocity) {
                return Err(format!("velocity {velocity} outside 1-127 in '{s}'"));
            }
            (pitch, velocity)
        }
        None => (pitch_part, DEFAULT_VELOCITY),
    };
    let note = parse_pitch(pitch).ok_or_else(|| format!("invalid note '{pitch}' in '{s}'"))?;

    let (start, length) = match timing {
        None => (0.0, None),
        Some(timing) => {
            let (start, length) = match timing.split_once('+') {
                Some((start, length)) => (start, Some(length)),
                None => (timing, None),
            };
            let start = parse_seconds(start, s)?;
            let length = length.map(|l| parse_seconds(l, s)).transpose()?;
            (start, length)
        }
    };

    Ok(NoteSpec {
        note,
        velocity,
        start,
        length,
    })
}

fn parse_seconds(text: &str, whole: &str) -> Result<f64, String> {
    let value: f64 = text
        .parse()
        .map_err(|_| format!("invalid time '{text}' in '{whole}'"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("time '{text}' must be a non-negative number in '{whole}'"))
    }
}

/// MIDI number or scientific pitch name (C4 = 60).
fn parse_pitch(text: &str) -> Option<u8> {
    if let Ok(number) = text.parse::<u8>() {
        return (number <= 127).then_some(number);
    }

    let mut chars = text.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let base: i32 = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest = chars.as_str();
    let (shift, octave) = if let Some(octave) = rest.strip_prefix('#') {
        (1, octave)
    } else if let Some(octave) = rest.strip_prefix('b') {
        (-1, octave)
    } else {
        (0, rest)
    };
    let octave: i32 = octave.parse().ok()?;
    let number = (octave + 1) * 12 + base + shift;
    u8::try_from(number).ok().filter(|&n| n <= 127)
}

/// Note events falling in `[block_start, block_start + len)`, note-offs
/// first at equal frames so a repeated pitch re-attacks.
pub fn events_in_block(
    notes: &[NoteSpec],
    sample_rate: f64,
    default_length: f64,
    block_start: usize,
    len: usize,
) -> Vec<NoteEvent> {
    let range = block_start..block_start + len;
    let mut timed: Vec<(usize, bool, NoteEvent)> = Vec::new();
    for spec in notes {
        let (on, off) = spec.frames(sample_rate, default_length);
        if range.contains(&off) {
            timed.push((off, false, NoteEvent::Off { note: spec.note }));
        }
        if range.contains(&on) {
            timed.push((
                on,
                true,
                NoteEvent::On {
                    note: spec.note,
                    velocity: spec.velocity,
                },
            ));
        }
    }
    timed.sort_by_key(|&(frame, is_on, _)| (frame, is_on));
    timed.into_iter().map(|(_, _, event)| event).collect()
}

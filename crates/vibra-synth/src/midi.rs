//! Note events and MIDI note decoding.
//!
//! Only note-on and note-off channel messages are understood. A note-on with
//! velocity 0 is a note-off, as the MIDI running-status convention requires.

use libm::pow;

/// A note event delivered to the synth at block start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    /// Start a note.
    On {
        /// MIDI note number (0-127).
        note: u8,
        /// MIDI velocity (1-127).
        velocity: u8,
    },
    /// Release a note.
    Off {
        /// MIDI note number (0-127).
        note: u8,
    },
}

impl NoteEvent {
    /// Decode a raw MIDI channel message.
    ///
    /// Returns `None` for anything other than a complete note-on/note-off.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vibra_synth::NoteEvent;
    ///
    /// assert_eq!(
    ///     NoteEvent::from_midi(&[0x90, 69, 100]),
    ///     Some(NoteEvent::On { note: 69, velocity: 100 })
    /// );
    /// assert_eq!(NoteEvent::from_midi(&[0x91, 69, 0]), Some(NoteEvent::Off { note: 69 }));
    /// assert_eq!(NoteEvent::from_midi(&[0xB0, 7, 100]), None);
    /// ```
    pub fn from_midi(bytes: &[u8]) -> Option<Self> {
        let &[status, note, velocity, ..] = bytes else {
            return None;
        };
        if note > 127 || velocity > 127 {
            return None;
        }
        match status & 0xF0 {
            0x90 if velocity > 0 => Some(NoteEvent::On { note, velocity }),
            0x90 | 0x80 => Some(NoteEvent::Off { note }),
            _ => None,
        }
    }

    /// The MIDI note number.
    pub fn note(self) -> u8 {
        match self {
            NoteEvent::On { note, .. } | NoteEvent::Off { note } => note,
        }
    }

    /// Frequency of the note in Hz.
    pub fn frequency(self) -> f64 {
        midi_to_freq(self.note())
    }
}

/// Convert a MIDI note number to frequency in Hz (A4 = note 69 = 440 Hz).
#[inline]
pub fn midi_to_freq(note: u8) -> f64 {
    440.0 * pow(2.0, (f64::from(note) - 69.0) / 12.0)
}

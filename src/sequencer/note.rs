// Note set - the eight playable pitches and their key bindings
// One octave of C major; the ordering here is the dispatch order everywhere.

use std::fmt;

/// One of the eight playable notes.
///
/// The set is fixed: a diatonic octave from C4 to C5, each bound to exactly
/// one keyboard key. `Note::ALL` is the canonical ordering used for tick
/// dispatch and for serialization, and `index()` is a stable array index.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Note {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
}

impl Note {
    /// Every note, in canonical (ascending pitch) order.
    pub const ALL: [Note; 8] = [
        Note::C4,
        Note::D4,
        Note::E4,
        Note::F4,
        Note::G4,
        Note::A4,
        Note::B4,
        Note::C5,
    ];

    /// Number of notes in the fixed set.
    pub const COUNT: usize = Self::ALL.len();

    /// Position within `Note::ALL`, usable as an array index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// MIDI note number (60 = C4).
    pub fn midi(self) -> u8 {
        match self {
            Note::C4 => 60,
            Note::D4 => 62,
            Note::E4 => 64,
            Note::F4 => 65,
            Note::G4 => 67,
            Note::A4 => 69,
            Note::B4 => 71,
            Note::C5 => 72,
        }
    }

    /// Note name, e.g. "C4".
    pub fn name(self) -> &'static str {
        match self {
            Note::C4 => "C4",
            Note::D4 => "D4",
            Note::E4 => "E4",
            Note::F4 => "F4",
            Note::G4 => "G4",
            Note::A4 => "A4",
            Note::B4 => "B4",
            Note::C5 => "C5",
        }
    }

    pub fn from_name(name: &str) -> Option<Note> {
        Note::ALL.iter().copied().find(|n| n.name() == name)
    }

    /// The keyboard key bound to this note (home row, a through k).
    pub fn key(self) -> char {
        match self {
            Note::C4 => 'a',
            Note::D4 => 's',
            Note::E4 => 'd',
            Note::F4 => 'f',
            Note::G4 => 'g',
            Note::A4 => 'h',
            Note::B4 => 'j',
            Note::C5 => 'k',
        }
    }

    /// Resolve a pressed key to its note, if any.
    pub fn from_key(key: char) -> Option<Note> {
        Note::ALL.iter().copied().find(|n| n.key() == key)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

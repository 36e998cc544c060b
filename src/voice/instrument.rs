// Instrument kinds - tagged selection of the engine voice flavour

use crate::sequencer::Note;
use std::fmt;

/// The instrument flavours a voice can be created with.
///
/// Adding a kind is a variant addition here plus a factory arm in the
/// engine; nothing in the pool or sequencer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum InstrumentKind {
    SynthLead,
    FmLead,
    DrumHit,
}

impl InstrumentKind {
    /// Fixed pitch every drum trigger lands on (C2).
    pub const DRUM_PITCH: u8 = 36;

    /// Engine pitch for a requested note.
    ///
    /// Drums ignore the requested note and always hit one low pitch; the
    /// melodic kinds use the note's own pitch verbatim.
    pub fn pitch_for(self, note: Note) -> u8 {
        match self {
            InstrumentKind::DrumHit => Self::DRUM_PITCH,
            InstrumentKind::SynthLead | InstrumentKind::FmLead => note.midi(),
        }
    }
}

impl Default for InstrumentKind {
    fn default() -> Self {
        InstrumentKind::SynthLead
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::SynthLead => "synth",
            InstrumentKind::FmLead => "fm",
            InstrumentKind::DrumHit => "drum",
        };
        write!(f, "{name}")
    }
}

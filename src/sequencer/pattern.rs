// Step pattern - per-note on/off grid for one sequencer

use crate::sequencer::note::Note;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of steps in one pattern cycle.
pub const STEP_COUNT: usize = 8;

/// An 8x8 on/off grid: one row of eight steps per note.
///
/// Every note in the fixed set always has exactly one row of exactly
/// `STEP_COUNT` booleans; cells are mutated only through `toggle`.
/// Serialized as a map from note name to step row, so stored patterns stay
/// readable and independent of the in-memory layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPattern {
    steps: [[bool; STEP_COUNT]; Note::COUNT],
}

impl StepPattern {
    /// Create an all-off pattern.
    pub fn new() -> Self {
        Self {
            steps: [[false; STEP_COUNT]; Note::COUNT],
        }
    }

    /// Flip exactly one cell.
    pub fn toggle(&mut self, note: Note, step: usize) {
        assert!(step < STEP_COUNT, "step index must be 0-7");
        self.steps[note.index()][step] = !self.steps[note.index()][step];
    }

    /// Read one cell without mutation.
    pub fn is_active(&self, note: Note, step: usize) -> bool {
        assert!(step < STEP_COUNT, "step index must be 0-7");
        self.steps[note.index()][step]
    }

    /// Reset every cell to off.
    pub fn clear(&mut self) {
        self.steps = [[false; STEP_COUNT]; Note::COUNT];
    }

    /// Notes active at `step`, in canonical `Note::ALL` order.
    pub fn active_notes(&self, step: usize) -> impl Iterator<Item = Note> + '_ {
        assert!(step < STEP_COUNT, "step index must be 0-7");
        Note::ALL
            .iter()
            .copied()
            .filter(move |note| self.steps[note.index()][step])
    }

    /// True when no cell is active.
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|row| row.iter().all(|cell| !cell))
    }

    /// Number of active cells across the whole grid.
    pub fn active_count(&self) -> usize {
        self.steps
            .iter()
            .map(|row| row.iter().filter(|cell| **cell).count())
            .sum()
    }
}

impl Default for StepPattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for StepPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Note::COUNT))?;
        for note in Note::ALL {
            map.serialize_entry(note.name(), &self.steps[note.index()])?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StepPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PatternVisitor;

        impl<'de> Visitor<'de> for PatternVisitor {
            type Value = StepPattern;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map of note names to {STEP_COUNT} step booleans")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pattern = StepPattern::new();
                let mut seen = [false; Note::COUNT];

                while let Some((name, row)) = access.next_entry::<String, Vec<bool>>()? {
                    let note = Note::from_name(&name)
                        .ok_or_else(|| de::Error::custom(format!("unknown note '{name}'")))?;
                    if row.len() != STEP_COUNT {
                        return Err(de::Error::custom(format!(
                            "note '{name}' has {} steps, expected {STEP_COUNT}",
                            row.len()
                        )));
                    }
                    if seen[note.index()] {
                        return Err(de::Error::custom(format!("duplicate note '{name}'")));
                    }
                    seen[note.index()] = true;
                    for (step, cell) in row.into_iter().enumerate() {
                        pattern.steps[note.index()][step] = cell;
                    }
                }

                for note in Note::ALL {
                    if !seen[note.index()] {
                        return Err(de::Error::custom(format!("missing note '{note}'")));
                    }
                }

                Ok(pattern)
            }
        }

        deserializer.deserialize_map(PatternVisitor)
    }
}
